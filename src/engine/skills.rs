// src/engine/skills.rs
use super::taxonomy::SkillVocabulary;
use crate::utils::title_case;
use anyhow::{Context, Result};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::error;

/// Skills found in one résumé, in title-case display form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: BTreeSet<String>,
}

impl SkillSet {
    /// Lowercase forms, for case-insensitive comparison against required skills
    pub fn lowercased(&self) -> HashSet<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whole-word matchers for every vocabulary term, compiled once.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    terms: Vec<String>,
    patterns: RegexSet,
}

impl SkillMatcher {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let terms: Vec<String> = vocabulary.iter().map(String::from).collect();
        let patterns = RegexSet::new(
            terms
                .iter()
                .map(|term| format!(r"\b{}\b", regex::escape(term))),
        )
        .context("Failed to compile skill patterns")?;

        Ok(Self { terms, patterns })
    }

    /// Scan the lowercased raw text, so short skills such as "r" or "go"
    /// are not lost to stopword and length filtering.
    pub fn extract(&self, resume_text: &str) -> SkillSet {
        if resume_text.is_empty() || self.terms.is_empty() {
            return SkillSet::default();
        }

        let text = resume_text.to_lowercase();
        self.patterns
            .matches(&text)
            .into_iter()
            .map(|i| title_case(&self.terms[i]))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

/// Find every vocabulary skill mentioned in the résumé as a whole word or phrase.
///
/// Compiles the vocabulary on every call; long-lived callers should go
/// through `MatchEngine::extract_skills`, which reuses one `SkillMatcher`.
/// A vocabulary that fails to compile is logged and yields no skills.
pub fn extract_skills(resume_text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    if resume_text.is_empty() || vocabulary.is_empty() {
        return SkillSet::default();
    }

    match SkillMatcher::new(vocabulary) {
        Ok(matcher) => matcher.extract(resume_text),
        Err(e) => {
            error!("Skill extraction skipped: {:#}", e);
            SkillSet::default()
        }
    }
}
