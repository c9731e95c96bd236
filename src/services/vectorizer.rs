use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Splits text into lowercase terms of at least two word characters
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
}

/// Sparse, L2-normalized term weight vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    /// (term index, weight), sorted by term index
    weights: Vec<(usize, f64)>,
}

impl TermVector {
    /// Builds a normalized vector from raw weights
    fn normalized(raw: BTreeMap<usize, f64>) -> Self {
        let norm = raw.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            weights: raw.into_iter().map(|(i, w)| (i, w / norm)).collect(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.weights.len() && j < other.weights.len() {
            let (a_idx, a_w) = self.weights[i];
            let (b_idx, b_w) = other.weights[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn weights(&self) -> &[(usize, f64)] {
        &self.weights
    }
}

/// Vocabulary and inverse document frequencies learned from a corpus
///
/// Catalog entries and queries must be projected through the same space for
/// their similarities to be meaningful, so both go through [`VectorSpace::project`].
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl VectorSpace {
    /// Learns the vocabulary and smoothed idf weights of `corpus`
    ///
    /// Term indices follow alphabetical order, so fitting the same corpus
    /// always yields the same space.
    pub fn fit<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut n_docs = 0usize;

        for doc in corpus {
            n_docs += 1;
            let terms: BTreeSet<String> = tokenize(doc.as_ref()).collect();
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            // ln((1 + n) / (1 + df)) + 1 keeps terms present everywhere non-zero
            idf.push(((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Maps text into this space; unknown terms are ignored
    pub fn project(&self, text: &str) -> TermVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let weighted = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        TermVector::normalized(weighted)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}
