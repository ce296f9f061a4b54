//! Résumé matching engine: TF-IDF similarity against a job description and
//! skill-overlap ranking against a fixed table of job categories.
//!
//! The engine is built once ([`MatchEngine::from_config`]) and then used
//! read-only from the CLI and from the JSON API.

pub mod cli;
pub mod core;
pub mod engine;
pub mod utils;
pub mod web;

pub use engine::{
    AnalysisReport, CategorySuggestion, JobCategory, MatchEngine, SkillSet, SkillVocabulary,
    Stopwords, Taxonomy, TaxonomyLoader,
};
pub use web::start_web_server;
