//! Builds the combined feature space for one recommendation request.
//!
//! Two channels per record, concatenated into one row vector:
//!
//! - **Text**: TF-IDF over `clean_description` + lower-cased `categories`,
//!   unigrams and bigrams, English stop words removed, document-frequency
//!   bounds pruning rare and near-universal terms, rows L2-normalized.
//! - **Category**: multi-hot over every label observed in the corpus,
//!   scaled down so a shared broad label (e.g. "fiction") cannot outweigh
//!   actual descriptive overlap.
//!
//! The space is rebuilt from the full catalog on every request so results
//! always reflect the latest writes. Row indices are local to one build.

use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

use crate::record::normalize_title;
use crate::stopwords::is_stop_word;
use crate::{Error, Record, Result, Vector};

/// Weight applied to the category multi-hot channel. Category overlap is a
/// coarse binary signal next to descriptive text overlap.
const CATEGORY_WEIGHT: f32 = 0.5;

/// A term must appear in at least this many documents to be kept.
const MIN_DF: usize = 2;

/// A term appearing in more than this fraction of documents is treated as
/// non-discriminative and dropped.
const MAX_DF: f32 = 0.8;

/// Tokenize text for feature extraction.
/// Uses lowercase normalization and removes punctuation; single characters
/// are dropped.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|s| !s.is_empty() && s.len() > 1)
        .collect()
}

/// Unigrams plus bigrams over a stop-word-filtered token stream.
fn ngrams(tokens: &[String]) -> Vec<String> {
    let mut terms = Vec::with_capacity(tokens.len() * 2);
    terms.extend(tokens.iter().cloned());
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// The combined vector space over the vectorizable subset of a catalog.
///
/// Holds the surviving records (in catalog order) alongside their combined
/// row vectors; row index `i` always refers to `records()[i]`.
pub struct FeatureSpace {
    records: Vec<Record>,
    rows: Vec<Vector>,
}

impl FeatureSpace {
    /// Build the feature space from a catalog snapshot.
    ///
    /// Records without a usable `clean_description` are excluded entirely;
    /// they can be neither seeds nor candidates. Returns
    /// [`Error::EmptyCorpus`] when nothing survives the filter.
    pub fn build(catalog: &[Record]) -> Result<Self> {
        let records: Vec<Record> = catalog
            .iter()
            .filter(|r| r.is_vectorizable())
            .cloned()
            .collect();

        if records.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let documents: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                let combined = format!("{} {}", r.clean_description, r.categories.to_lowercase());
                let tokens: Vec<String> = tokenize(&combined)
                    .into_iter()
                    .filter(|t| !is_stop_word(t))
                    .collect();
                ngrams(&tokens)
            })
            .collect();

        let n_docs = records.len();

        // Document frequency per term
        let mut doc_freq: AHashMap<&str, usize> = AHashMap::new();
        for doc in &documents {
            let unique: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Prune by document frequency, then fix column order lexicographically
        // so two builds over the same catalog produce identical spaces.
        let max_df_count = MAX_DF * n_docs as f32;
        let vocabulary: BTreeMap<&str, usize> = {
            let kept: BTreeSet<&str> = doc_freq
                .iter()
                .filter(|(_, &df)| df >= MIN_DF && df as f32 <= max_df_count)
                .map(|(&term, _)| term)
                .collect();
            kept.into_iter()
                .enumerate()
                .map(|(idx, term)| (term, idx))
                .collect()
        };

        // Smoothed IDF per vocabulary column
        let mut idf = vec![0.0f32; vocabulary.len()];
        for (term, &col) in &vocabulary {
            let df = doc_freq[term] as f32;
            idf[col] = ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0;
        }

        // Category label columns, union over survivors, sorted
        let label_set: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.category_labels())
            .collect();
        let label_columns: BTreeMap<String, usize> = label_set
            .into_iter()
            .enumerate()
            .map(|(idx, label)| (label, idx))
            .collect();

        let rows = records
            .iter()
            .zip(documents.iter())
            .map(|(record, doc)| {
                let mut text = Vector::zeros(vocabulary.len());
                {
                    let data = text.as_mut_slice();
                    for term in doc {
                        if let Some(&col) = vocabulary.get(term.as_str()) {
                            data[col] += 1.0;
                        }
                    }
                    for (col, weight) in idf.iter().enumerate() {
                        data[col] *= weight;
                    }
                }
                text.normalize();

                let mut genres = Vector::zeros(label_columns.len());
                {
                    let data = genres.as_mut_slice();
                    for label in record.category_labels() {
                        if let Some(&col) = label_columns.get(&label) {
                            data[col] = 1.0;
                        }
                    }
                }
                genres.scale(CATEGORY_WEIGHT);

                let mut combined = text;
                combined.extend_from(&genres);
                combined
            })
            .collect();

        Ok(Self { records, rows })
    }

    /// Number of surviving records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Surviving records, in catalog order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[inline]
    #[must_use]
    pub fn record(&self, row: usize) -> &Record {
        &self.records[row]
    }

    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &Vector {
        &self.rows[row]
    }

    /// Locate a record's row by normalized title. Returns the first match;
    /// records filtered out at build time are not findable here.
    #[must_use]
    pub fn find_row(&self, title: &str) -> Option<usize> {
        let needle = normalize_title(title);
        self.records
            .iter()
            .position(|r| r.normalized_title() == needle)
    }

    /// Cosine similarity of one row against every row, including itself.
    #[must_use]
    pub fn similarities(&self, row: usize) -> Vec<f32> {
        let seed = &self.rows[row];
        self.rows.iter().map(|r| seed.cosine_similarity(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, desc: &str, categories: &str) -> Record {
        Record::new(title)
            .with_clean_description(desc)
            .with_categories(categories)
    }

    #[test]
    fn test_tokenize_drops_punctuation_and_single_chars() {
        let tokens = tokenize("A wizard's dragon, flying east!");
        assert_eq!(tokens, vec!["wizard", "dragon", "flying", "east"]);
    }

    #[test]
    fn test_unvectorizable_records_are_excluded() {
        let catalog = vec![
            record("A", "a long shared story about dragons", "Fantasy"),
            record("B", "", "Fantasy"),
            record("C", "another shared story about dragons", "Fantasy"),
        ];
        let space = FeatureSpace::build(&catalog).unwrap();
        assert_eq!(space.len(), 2);
        assert!(space.find_row("B").is_none());
        assert!(space.find_row("A").is_some());
    }

    #[test]
    fn test_empty_corpus() {
        let catalog = vec![record("A", "  ", "Fantasy")];
        assert!(matches!(
            FeatureSpace::build(&catalog),
            Err(Error::EmptyCorpus)
        ));
        assert!(matches!(FeatureSpace::build(&[]), Err(Error::EmptyCorpus)));
    }

    #[test]
    fn test_shared_terms_drive_similarity() {
        // "wizard"/"dragon" appear in two of four docs (df=2, kept);
        // every doc-unique word has df=1 and is pruned.
        let catalog = vec![
            record("A", "wizard fights dragon across stormy peaks", ""),
            record("B", "wizard rides dragon beyond frozen valleys", ""),
            record("C", "lovers quarrel beside seaside cottages", ""),
            record("D", "detectives interrogate suspects downtown", ""),
        ];
        let space = FeatureSpace::build(&catalog).unwrap();
        let sims = space.similarities(space.find_row("A").unwrap());
        let b = space.find_row("B").unwrap();
        let c = space.find_row("C").unwrap();
        assert!(sims[b] > sims[c]);
        assert!(sims[b] > 0.0);
    }

    #[test]
    fn test_category_channel_contributes_at_half_weight() {
        // No shared text terms at all: similarity comes only from the
        // category columns.
        let catalog = vec![
            record("A", "alpha bravo charlie", "Fantasy"),
            record("B", "delta echo foxtrot", "Fantasy"),
            record("C", "golf hotel india", "Romance"),
        ];
        let space = FeatureSpace::build(&catalog).unwrap();
        let sims = space.similarities(space.find_row("A").unwrap());
        let b = space.find_row("B").unwrap();
        let c = space.find_row("C").unwrap();
        assert!((sims[b] - 1.0).abs() < 1e-6); // identical category vectors
        assert!((sims[c] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_near_universal_terms_are_pruned() {
        // "common" appears in all five docs: df fraction 1.0 > 0.8, dropped.
        // "rare" appears in two docs and survives.
        let catalog = vec![
            record("A", "common rare things", ""),
            record("B", "common rare stuff", ""),
            record("C", "common items", ""),
            record("D", "common gear", ""),
            record("E", "common wares", ""),
        ];
        let space = FeatureSpace::build(&catalog).unwrap();
        let sims = space.similarities(space.find_row("A").unwrap());
        let b = space.find_row("B").unwrap();
        let c = space.find_row("C").unwrap();
        // A and B share "rare"; A and C share only the pruned "common".
        assert!(sims[b] > 0.0);
        assert!((sims[c] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_is_deterministic() {
        let catalog = vec![
            record("A", "wizard fights dragon in the mountains", "Fantasy, Adventure"),
            record("B", "wizard and dragon cross the mountains", "Fantasy, Adventure"),
            record("C", "two lovers meet in a seaside town", "Romance"),
        ];
        let first = FeatureSpace::build(&catalog).unwrap();
        let second = FeatureSpace::build(&catalog).unwrap();
        for i in 0..first.len() {
            assert_eq!(first.row(i), second.row(i));
        }
    }
}
