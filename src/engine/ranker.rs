// src/engine/ranker.rs
use super::skills::SkillSet;
use super::taxonomy::Taxonomy;
use crate::utils::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// How well a résumé covers one job category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: String,
    /// Percentage of the category's required skills found, 0 to 100
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Score every category by the share of its required skills the candidate
/// has, best first, and keep the top `limit`.
///
/// Only the required-skill count is used as denominator: extra skills the
/// candidate has never lower a score. Ties keep taxonomy order.
pub fn suggest(skills: &SkillSet, taxonomy: &Taxonomy, limit: usize) -> Vec<CategorySuggestion> {
    let candidate = skills.lowercased();

    let mut suggestions: Vec<CategorySuggestion> = taxonomy
        .iter()
        .map(|category| {
            let required: BTreeSet<&str> =
                category.required_skills.iter().map(String::as_str).collect();
            let (matched, missing): (Vec<&str>, Vec<&str>) = required
                .iter()
                .copied()
                .partition(|skill| candidate.contains(*skill));

            let score = if required.is_empty() {
                0.0
            } else {
                round2(matched.len() as f64 / required.len() as f64 * 100.0)
            };

            CategorySuggestion {
                category: category.name.clone(),
                score,
                matched_skills: matched.into_iter().map(String::from).collect(),
                missing_skills: missing.into_iter().map(String::from).collect(),
            }
        })
        .collect();

    // stable: equal scores stay in taxonomy order
    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(limit);
    suggestions
}
