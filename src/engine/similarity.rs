// src/engine/similarity.rs
//! Two-document TF-IDF cosine similarity.
//!
//! The vocabulary and IDF weights come from the résumé and the job
//! description alone, so a score only ranks one pair. Scores against
//! different job descriptions are not comparable in absolute terms.

use super::normalizer::{normalize, Stopwords};
use crate::utils::round2;
use std::collections::BTreeMap;

/// Smoothed IDF: `ln((1 + n) / (1 + df)) + 1`.
///
/// With two documents a term found in both weighs 1.0 and a term found in
/// only one weighs `ln(1.5) + 1`.
fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    ((1.0 + doc_count as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

/// Raw term counts of a whitespace-joined document, keyed in term order so
/// sums are order-independent.
fn term_counts(text: &str) -> BTreeMap<&str, f64> {
    let mut counts = BTreeMap::new();
    for token in text.split_whitespace() {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity in `[0, 1]` between two normalized, space-joined documents.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let tf_a = term_counts(a);
    let tf_b = term_counts(b);
    if tf_a.is_empty() || tf_b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    let mut vocabulary: Vec<&str> = tf_a.keys().chain(tf_b.keys()).copied().collect();
    vocabulary.sort_unstable();
    vocabulary.dedup();

    for term in vocabulary {
        let count_a = tf_a.get(term).copied().unwrap_or(0.0);
        let count_b = tf_b.get(term).copied().unwrap_or(0.0);
        let doc_freq = usize::from(count_a > 0.0) + usize::from(count_b > 0.0);
        let weight = idf(2, doc_freq);

        let wa = count_a * weight;
        let wb = count_b * weight;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return 0.0;
    }

    (dot / magnitude).clamp(0.0, 1.0)
}

/// Match score between a résumé and a job description, 0 to 100 with two
/// decimals. Empty inputs or inputs with no usable tokens score 0.
pub fn score(resume_text: &str, job_description: &str, stopwords: &Stopwords) -> f64 {
    if resume_text.is_empty() || job_description.is_empty() {
        return 0.0;
    }

    let resume = normalize(resume_text, stopwords);
    let job = normalize(job_description, stopwords);

    round2(cosine_similarity(&resume.as_text(), &job.as_text()) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_en(a: &str, b: &str) -> f64 {
        score(a, b, &Stopwords::english())
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score_en("python developer", ""), 0.0);
        assert_eq!(score_en("", "python developer"), 0.0);
        assert_eq!(score_en("", ""), 0.0);
    }

    #[test]
    fn test_no_usable_tokens_scores_zero() {
        assert_eq!(score_en("the and of", "python developer"), 0.0);
        assert_eq!(score_en("12 34 !!", "?? 56"), 0.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        assert_eq!(score_en("python developer", "ballet dancer"), 0.0);
    }

    #[test]
    fn test_identical_documents_score_hundred() {
        let text = "Experienced Python and SQL developer building data pipelines";
        assert_eq!(score_en(text, text), 100.0);
        assert_eq!(score_en("rust rust tokio", "rust rust tokio"), 100.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("Experienced Python and SQL developer", "We need a Python developer with SQL skills"),
            ("rust tokio axum rust", "tokio services written in rust and python"),
            ("Senior accountant, auditing", "Junior accountant with payroll experience"),
        ];
        for (a, b) in pairs {
            assert_eq!(score_en(a, b), score_en(b, a));
        }
    }

    #[test]
    fn test_related_job_scores_higher_than_unrelated() {
        let resume = "Experienced Python and SQL developer";
        let related = score_en(resume, "We need a Python developer with SQL skills");
        let unrelated = score_en(resume, "We need a ballet dancer");

        assert!(related > 0.0);
        assert!(related > unrelated);
    }

    #[test]
    fn test_known_value() {
        // resume:  experienced python sql developer
        // job:     need python developer sql skills
        // shared terms weigh 1.0, unique terms ln(1.5) + 1
        let w = 1.5f64.ln() + 1.0;
        let expected = 3.0 / ((3.0 + w * w).sqrt() * (3.0 + 2.0 * w * w).sqrt());
        let got = score_en(
            "Experienced Python and SQL developer",
            "We need a Python developer with SQL skills",
        );
        assert_eq!(got, round2(expected * 100.0));
    }

    #[test]
    fn test_cosine_on_joined_text() {
        assert_eq!(cosine_similarity("", "python"), 0.0);
        assert!((cosine_similarity("python  sql", "sql python") - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity("python", "dancer"), 0.0);

        let stopwords = Stopwords::english();
        let resume = normalize("Experienced Python and SQL developer", &stopwords);
        let job = normalize("We need a Python developer with SQL skills", &stopwords);
        assert_eq!(
            round2(cosine_similarity(&resume.as_text(), &job.as_text()) * 100.0),
            score_en(
                "Experienced Python and SQL developer",
                "We need a Python developer with SQL skills"
            )
        );
    }

    #[test]
    fn test_score_in_range() {
        let s = score_en("python python python java", "python java java kotlin");
        assert!((0.0..=100.0).contains(&s));
    }
}
