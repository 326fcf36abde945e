//! Ranks catalog records against a seed title by cosine similarity over the
//! combined feature space, with optional category filtering.

use serde::Serialize;

use crate::record::normalize_title;
use crate::{Error, FeatureSpace, Rating, Record, Result};

/// One ranked result. Carries the candidate's display fields plus its
/// similarity score rounded to two decimals; rounding is presentation-only
/// and never affects rank order.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
    pub categories: String,
    pub rating: Rating,
    pub clean_description: String,
    pub similarity: f32,
}

impl Recommendation {
    fn from_record(record: &Record, similarity: f32) -> Self {
        Self {
            title: record.title.clone(),
            author: record.author.clone(),
            categories: record.categories.clone(),
            rating: record.rating.clone(),
            clean_description: record.clean_description.clone(),
            similarity: round2(similarity),
        }
    }
}

#[inline]
fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

/// Return up to `top_n` records most similar to `seed_title`.
///
/// The seed is matched case-insensitively against the vectorizable records;
/// a title that exists in the catalog but lacks a usable description is
/// [`Error::TitleNotFound`] here, by design. When `filter_categories` is
/// non-empty, a candidate is kept only if it shares at least one label with
/// the filter set. An empty result after filtering is a valid success,
/// distinct from `TitleNotFound`.
pub fn recommend(
    catalog: &[Record],
    seed_title: &str,
    filter_categories: &[String],
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    let space = FeatureSpace::build(catalog)?;

    let seed = space
        .find_row(seed_title)
        .ok_or_else(|| Error::TitleNotFound(seed_title.trim().to_string()))?;

    let sims = space.similarities(seed);

    // Stable sort: equal scores keep catalog order, so results are
    // reproducible across runs on unchanged data.
    let mut order: Vec<usize> = (0..sims.len()).collect();
    order.sort_by(|&a, &b| {
        sims[b]
            .partial_cmp(&sims[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let filters: Vec<String> = filter_categories
        .iter()
        .map(|f| normalize_title(f))
        .filter(|f| !f.is_empty())
        .collect();

    let mut results = Vec::with_capacity(top_n.min(sims.len()));
    for row in order {
        if row == seed {
            continue;
        }

        let record = space.record(row);
        if !filters.is_empty() {
            let labels = record.category_labels();
            if !filters.iter().any(|f| labels.iter().any(|l| l == f)) {
                continue;
            }
        }

        results.push(Recommendation::from_record(record, sims[row]));
        if results.len() >= top_n {
            break;
        }
    }

    Ok(results)
}
