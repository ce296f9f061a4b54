// src/engine/taxonomy.rs
//! Job category table and the skill vocabulary derived from it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{error, info, warn};

/// A job category and the skills it requires, lowercase, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub name: String,
    pub required_skills: Vec<String>,
}

impl JobCategory {
    pub fn new(name: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            name: name.into(),
            required_skills: skills.iter().map(|s| s.trim().to_lowercase()).collect(),
        }
    }
}

/// Unique lowercase skill terms across every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl SkillVocabulary {
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillVocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Categories keyed by name, iterated in source table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<JobCategory>,
    index: HashMap<String, usize>,
}

impl Taxonomy {
    /// Build from categories. A repeated name keeps its first position and
    /// takes the later skill list.
    pub fn from_categories(categories: impl IntoIterator<Item = JobCategory>) -> Self {
        let mut taxonomy = Self::default();
        for category in categories {
            taxonomy.insert(category);
        }
        taxonomy
    }

    fn insert(&mut self, category: JobCategory) {
        match self.index.get(&category.name) {
            Some(&pos) => self.categories[pos].required_skills = category.required_skills,
            None => {
                self.index.insert(category.name.clone(), self.categories.len());
                self.categories.push(category);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&JobCategory> {
        self.index.get(name).map(|&pos| &self.categories[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Vocabulary made of every skill the categories require
    pub fn vocabulary(&self) -> SkillVocabulary {
        self.categories
            .iter()
            .flat_map(|c| c.required_skills.iter().cloned())
            .collect()
    }
}

/// One row of the category table. Both columns are required.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Skills")]
    skills: Option<String>,
}

/// Split a comma-separated skills cell into lowercase, trimmed entries.
/// Empty entries (`"a,,b"`, trailing commas) are dropped.
pub fn parse_skills_cell(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub struct TaxonomyLoader;

impl TaxonomyLoader {
    /// Load the category table from a CSV file.
    ///
    /// Never fails: a missing or unreadable source yields an empty taxonomy
    /// and vocabulary so that every downstream operation still works.
    pub fn load(path: &Path) -> (Taxonomy, SkillVocabulary) {
        if !path.exists() {
            error!(
                "Job categories file not found at {}. Skill analysis will be limited.",
                path.display()
            );
            return (Taxonomy::default(), SkillVocabulary::default());
        }

        match Self::try_load(path) {
            Ok(loaded) => {
                info!(
                    "Loaded {} job categories and {} unique skills from {}",
                    loaded.0.len(),
                    loaded.1.len(),
                    path.display()
                );
                loaded
            }
            Err(e) => {
                error!("Failed to load job data: {:#}", e);
                (Taxonomy::default(), SkillVocabulary::default())
            }
        }
    }

    fn try_load(path: &Path) -> Result<(Taxonomy, SkillVocabulary)> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Parse a category table. Fails only when the header lacks the
    /// `Category` or `Skills` column; bad rows are skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<(Taxonomy, SkillVocabulary)> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?;
        for column in ["Category", "Skills"] {
            if !headers.iter().any(|h| h == column) {
                anyhow::bail!("Missing required column '{}' in job categories header", column);
            }
        }

        let mut categories = Vec::new();
        let mut vocabulary = BTreeSet::new();

        for (line, result) in reader.deserialize::<CategoryRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping malformed job category row {}: {}", line + 1, e);
                    continue;
                }
            };

            let name = row.category.as_deref().map(str::trim).unwrap_or("");
            let Some(skills) = row.skills.as_deref() else {
                warn!("Skipping job category row {}: missing Skills", line + 1);
                continue;
            };
            if name.is_empty() {
                warn!("Skipping job category row {}: missing Category", line + 1);
                continue;
            }

            let required_skills = parse_skills_cell(skills);
            vocabulary.extend(required_skills.iter().cloned());
            categories.push(JobCategory {
                name: name.to_string(),
                required_skills,
            });
        }

        let vocabulary = SkillVocabulary { terms: vocabulary };
        Ok((Taxonomy::from_categories(categories), vocabulary))
    }
}
