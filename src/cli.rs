// src/cli.rs
use crate::core::{ConfigManager, MatcherConfig};
use crate::engine::MatchEngine;
use crate::utils::read_text_document;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cvmatch")]
#[command(about = "Match resumes against job descriptions and job categories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (YAML, `local`/`production` sections)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Job categories CSV, overrides the configured path and CVMATCH_TAXONOMY
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the JSON API server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Score a resume against one job description
    Score {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        job: PathBuf,
    },
    /// List the skills found in a resume
    Skills {
        #[arg(long)]
        resume: PathBuf,
    },
    /// Rank job categories for a resume
    Suggest {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Full analysis: match score, skills and category suggestions
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        job: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the loaded job categories
    Categories,
}

impl Cli {
    /// Resolve configuration: file, then env, then command line flags
    pub fn matcher_config(&self) -> Result<MatcherConfig> {
        let mut config = ConfigManager::load(self.config.as_deref())?.matcher;

        if let Some(path) = &self.taxonomy {
            config.taxonomy_path = crate::utils::resolve_path(path)?;
        }
        if let Command::Serve { port: Some(port) } = &self.command {
            config.port = *port;
        }

        Ok(config)
    }
}

fn resolve_limit(requested: Option<usize>, config: &MatcherConfig) -> Result<usize> {
    match requested {
        Some(0) => anyhow::bail!("--limit must be at least 1"),
        Some(limit) => Ok(limit),
        None => Ok(config.suggestion_limit),
    }
}

async fn read_resume(path: &Path) -> Result<String> {
    let text = read_text_document(path)
        .await
        .context("Failed to load resume text")?;
    if text.trim().is_empty() {
        anyhow::bail!("Resume file {} contains no text", path.display());
    }
    Ok(text)
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = cli.matcher_config()?;

    // Startup barrier: everything is loaded before any command runs
    let engine = Arc::new(MatchEngine::from_config(&config)?);

    match cli.command {
        Command::Serve { .. } => {
            crate::web::start_web_server(engine, config).await?;
        }

        Command::Score { resume, job } => {
            let resume_text = read_resume(&resume).await?;
            let job_text = read_text_document(&job)
                .await
                .context("Failed to load job description")?;

            let score = engine.score(&resume_text, &job_text);
            info!("Scored {} against {}", resume.display(), job.display());
            println!("Specific Job Match Score: {}%", score);
        }

        Command::Skills { resume } => {
            let resume_text = read_resume(&resume).await?;
            let skills = engine.extract_skills(&resume_text);

            if skills.is_empty() {
                println!("No known skills found.");
            }
            for skill in skills.iter() {
                println!("{}", skill);
            }
        }

        Command::Suggest { resume, limit } => {
            let limit = resolve_limit(limit, &config)?;
            let resume_text = read_resume(&resume).await?;
            let skills = engine.extract_skills(&resume_text);
            let suggestions = engine.suggest(&skills, limit);

            if suggestions.is_empty() {
                println!("No job categories loaded; no suggestions possible.");
            }
            for (rank, suggestion) in suggestions.iter().enumerate() {
                println!(
                    "{:>2}. {:<30} {:>6.2}%",
                    rank + 1,
                    suggestion.category,
                    suggestion.score
                );
            }
        }

        Command::Analyze {
            resume,
            job,
            limit,
            json,
        } => {
            let limit = resolve_limit(limit, &config)?;
            let resume_text = read_resume(&resume).await?;
            let job_text = match &job {
                Some(path) => Some(
                    read_text_document(path)
                        .await
                        .context("Failed to load job description")?,
                ),
                None => None,
            };

            let report = engine.analyze(&resume_text, job_text.as_deref(), limit);

            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize analysis report")?;
                println!("{}", out);
            } else {
                if let Some(score) = report.match_score {
                    println!("Specific Job Match Score: {}%", score);
                }
                let skills: Vec<&str> = report.skills.iter().collect();
                println!("Skills ({}): {}", skills.len(), skills.join(", "));
                println!("Top job categories:");
                for suggestion in &report.suggestions {
                    println!("  {:<30} {:>6.2}%", suggestion.category, suggestion.score);
                    if !suggestion.missing_skills.is_empty() {
                        println!("      missing: {}", suggestion.missing_skills.join(", "));
                    }
                }
            }
        }

        Command::Categories => {
            let taxonomy = engine.taxonomy();
            println!(
                "{} job categories, {} unique skills",
                taxonomy.len(),
                engine.vocabulary().len()
            );
            println!("{}", "-".repeat(30));
            for category in taxonomy.iter() {
                println!(
                    "{:<30} {}",
                    category.name,
                    category.required_skills.join(", ")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "cvmatch", "analyze", "--resume", "cv.txt", "--job", "jd.txt", "--limit", "3", "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze {
                resume,
                job,
                limit,
                json,
            } => {
                assert_eq!(resume, PathBuf::from("cv.txt"));
                assert_eq!(job, Some(PathBuf::from("jd.txt")));
                assert_eq!(limit, Some(3));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cvmatch",
            "categories",
            "--taxonomy",
            "cats.csv",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(cli.taxonomy, Some(PathBuf::from("cats.csv")));
        assert!(cli.json_logs);
    }

    #[test]
    fn test_taxonomy_flag_defaults_to_config() {
        let cli = Cli::try_parse_from(["cvmatch", "categories"]).unwrap();
        assert_eq!(cli.taxonomy, None);
    }

    #[test]
    fn test_score_requires_job() {
        assert!(Cli::try_parse_from(["cvmatch", "score", "--resume", "cv.txt"]).is_err());
    }

    #[test]
    fn test_resolve_limit() {
        let config = MatcherConfig::default();
        assert_eq!(resolve_limit(None, &config).unwrap(), 5);
        assert_eq!(resolve_limit(Some(2), &config).unwrap(), 2);
        assert!(resolve_limit(Some(0), &config).is_err());
    }

    #[tokio::test]
    async fn test_read_resume_rejects_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "   \n").unwrap();
        assert!(read_resume(&path).await.is_err());
    }
}
