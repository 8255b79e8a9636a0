use crate::analysis::stats::mean;
use crate::model::bands::{ItemBand, ItemScheme};
use crate::model::matrix::ScaleMatrix;
use crate::model::results::ItemSummary;

/// Per-item mean, band and rank, sorted by mean descending. The sort is
/// stable, so tied items keep their original column order.
pub fn summarize(matrix: &ScaleMatrix, scheme: ItemScheme) -> Vec<ItemSummary> {
    let mut summaries: Vec<ItemSummary> = (0..matrix.n_items)
        .map(|item| {
            let m = mean(&matrix.item_column(item));
            ItemSummary {
                label: matrix.item_labels[item].clone(),
                mean: m,
                rank: 0,
                band: ItemBand::classify(m, scheme),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (idx, summary) in summaries.iter_mut().enumerate() {
        summary.rank = idx + 1;
    }
    summaries
}

/// First `n` of the descending-sorted summaries.
pub fn highest(summaries: &[ItemSummary], n: usize) -> &[ItemSummary] {
    &summaries[..n.min(summaries.len())]
}

/// Last `n` of the descending-sorted summaries.
pub fn lowest(summaries: &[ItemSummary], n: usize) -> &[ItemSummary] {
    &summaries[summaries.len() - n.min(summaries.len())..]
}

/// The positional slice between the 1/3 and 2/3 rank positions of the
/// sorted sequence. Deliberately not a median-centered window; downstream
/// output depends on this exact slice.
pub fn middle_band(summaries: &[ItemSummary]) -> &[ItemSummary] {
    let len = summaries.len();
    &summaries[len / 3..len * 2 / 3]
}
