// src/engine/mod.rs
//! Résumé matching: normalization, skill extraction, TF-IDF scoring and
//! category ranking over a taxonomy loaded once at startup.

pub mod normalizer;
pub mod ranker;
pub mod similarity;
pub mod skills;
pub mod taxonomy;

pub use normalizer::{normalize, NormalizedDocument, Stopwords};
pub use ranker::{suggest, CategorySuggestion, DEFAULT_SUGGESTION_LIMIT};
pub use skills::{extract_skills, SkillMatcher, SkillSet};
pub use taxonomy::{JobCategory, SkillVocabulary, Taxonomy, TaxonomyLoader};

use crate::core::MatcherConfig;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Everything the analysis page shows for one résumé
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Present only when a job description was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub skills: SkillSet,
    pub suggestions: Vec<CategorySuggestion>,
    pub generated_at: DateTime<Utc>,
}

/// Immutable matching state built once before any request is served.
///
/// Every method takes `&self` and allocates only call-local data, so one
/// engine can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    taxonomy: Taxonomy,
    vocabulary: SkillVocabulary,
    stopwords: Stopwords,
    matcher: SkillMatcher,
}

impl MatchEngine {
    pub fn new(taxonomy: Taxonomy, vocabulary: SkillVocabulary, stopwords: Stopwords) -> Result<Self> {
        let matcher = SkillMatcher::new(&vocabulary)?;
        debug!("Compiled {} skill patterns", matcher.len());
        Ok(Self {
            taxonomy,
            vocabulary,
            stopwords,
            matcher,
        })
    }

    /// Engine over an in-memory taxonomy with the bundled stopwords
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Result<Self> {
        let vocabulary = taxonomy.vocabulary();
        Self::new(taxonomy, vocabulary, Stopwords::english())
    }

    /// Load taxonomy and stopwords as configured
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let (taxonomy, vocabulary) = TaxonomyLoader::load(&config.taxonomy_path);

        let stopwords = match &config.stopwords_path {
            Some(path) => Stopwords::from_path(path),
            None => Stopwords::english(),
        };

        info!("Loaded {} job categories", taxonomy.len());
        info!("Total {} unique skills loaded", vocabulary.len());
        info!("Using {} stopwords", stopwords.len());

        Self::new(taxonomy, vocabulary, stopwords)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn normalize(&self, text: &str) -> NormalizedDocument {
        normalize(text, &self.stopwords)
    }

    pub fn extract_skills(&self, resume_text: &str) -> SkillSet {
        self.matcher.extract(resume_text)
    }

    /// Résumé vs. job description score, 0 to 100
    pub fn score(&self, resume_text: &str, job_description: &str) -> f64 {
        similarity::score(resume_text, job_description, &self.stopwords)
    }

    pub fn suggest(&self, skills: &SkillSet, limit: usize) -> Vec<CategorySuggestion> {
        suggest(skills, &self.taxonomy, limit)
    }

    /// Score against the job description (if any), extract skills and rank categories
    pub fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
        limit: usize,
    ) -> AnalysisReport {
        let match_score = job_description.map(|jd| self.score(resume_text, jd));
        let skills = self.extract_skills(resume_text);
        let suggestions = self.suggest(&skills, limit);

        debug!(
            "Analysis: score={:?}, {} skills, {} suggestions",
            match_score,
            skills.len(),
            suggestions.len()
        );

        AnalysisReport {
            match_score,
            skills,
            suggestions,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MatchEngine {
        MatchEngine::with_taxonomy(Taxonomy::from_categories(vec![
            JobCategory::new("Data", &["python", "sql"]),
            JobCategory::new("Web", &["javascript", "html"]),
        ]))
        .unwrap()
    }

    #[test]
    fn test_end_to_end_suggestions() {
        let engine = engine();
        let resume = "Analyst with five years of Python. Wrote SQL reports daily.";

        let skills = engine.extract_skills(resume);
        assert_eq!(skills.iter().collect::<Vec<_>>(), vec!["Python", "Sql"]);

        let suggestions = engine.suggest(&skills, DEFAULT_SUGGESTION_LIMIT);
        let ranked: Vec<(&str, f64)> = suggestions
            .iter()
            .map(|s| (s.category.as_str(), s.score))
            .collect();
        assert_eq!(ranked, vec![("Data", 100.0), ("Web", 0.0)]);
    }

    #[test]
    fn test_end_to_end_score() {
        let engine = engine();
        let resume = "Experienced Python and SQL developer";
        let related = engine.score(resume, "We need a Python developer with SQL skills");
        let unrelated = engine.score(resume, "We need a ballet dancer");
        assert!(related > 0.0);
        assert!(related > unrelated);
    }

    #[test]
    fn test_analyze_report() {
        let engine = engine();
        let report = engine.analyze(
            "Frontend work in JavaScript and HTML",
            Some("JavaScript developer"),
            1,
        );
        assert!(report.match_score.unwrap() > 0.0);
        assert_eq!(report.skills.len(), 2);
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].category, "Web");

        let report = engine.analyze("Frontend work", None, 5);
        assert!(report.match_score.is_none());
        assert!(report.skills.is_empty());
        assert_eq!(report.suggestions.len(), 2);
    }

    #[test]
    fn test_empty_taxonomy_engine() {
        let engine = MatchEngine::with_taxonomy(Taxonomy::default()).unwrap();
        let report = engine.analyze("Python developer", Some("Python developer"), 5);
        assert_eq!(report.match_score, Some(100.0));
        assert!(report.skills.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_from_config_missing_taxonomy() {
        let config = MatcherConfig {
            taxonomy_path: "/nonexistent/job_categories.csv".into(),
            ..MatcherConfig::default()
        };
        let engine = MatchEngine::from_config(&config).unwrap();
        assert!(engine.taxonomy().is_empty());
        assert!(engine.vocabulary().is_empty());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MatchEngine>();
    }

    #[test]
    fn test_report_serializes() {
        let report = engine().analyze("python", None, 5);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("match_score").is_none());
        assert_eq!(json["skills"], serde_json::json!(["Python"]));
        assert_eq!(json["suggestions"][0]["category"], "Data");
    }
}
