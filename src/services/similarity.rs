use super::vectorizer::TermVector;

/// Cosine of the angle between two vectors, 0 when either is all-zero
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

/// Scores `query` against every vector, in order
pub fn score_all(query: &TermVector, vectors: &[TermVector]) -> Vec<f64> {
    vectors.iter().map(|v| cosine(query, v)).collect()
}

/// Index of the highest score; the last one wins ties
pub fn best_match(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
            Some((_, b)) if b > s => best,
            _ => Some((i, s)),
        })
        .map(|(i, _)| i)
}
