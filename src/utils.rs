// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Round a value to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Capitalize the first letter of every word, lowercase the rest.
///
/// A "word" starts after any non-alphabetic character, so `node.js`
/// becomes `Node.Js` and `c++` stays `C++`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }

    out
}

/// Resolve a possibly relative path against the current directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Read a plain-text document supplied by the caller (résumé or job description)
pub async fn read_text_document(path: &Path) -> Result<String> {
    if let Some(ext) = path.to_str().and_then(get_file_extension) {
        if ext == "pdf" {
            anyhow::bail!(
                "{} is a PDF. Extract its text first and pass a plain-text file.",
                path.display()
            );
        }
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(99.999_999_999_997), 100.0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("python"), "Python");
        assert_eq!(title_case("sql"), "Sql");
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(title_case("MATLAB"), "Matlab");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("resume.txt"), Some("txt".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[tokio::test]
    async fn test_read_text_document_rejects_pdf() {
        let err = read_text_document(Path::new("resume.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("PDF"));
    }

    #[tokio::test]
    async fn test_read_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Python developer").unwrap();
        assert_eq!(read_text_document(&path).await.unwrap(), "Python developer");
    }
}
