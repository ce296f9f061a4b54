// src/engine/normalizer.rs
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Tokens of this many characters or fewer are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

/// NLTK English stopword list.
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Words removed during normalization
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// The bundled English list
    pub fn english() -> Self {
        ENGLISH_STOPWORDS.iter().copied().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a newline-separated list. Blank lines and `#` comments are ignored.
    ///
    /// An unreadable file leaves normalization running without any
    /// stopword filtering.
    pub fn from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let stopwords: Self = content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(str::to_lowercase)
                    .collect();
                info!(
                    "Loaded {} stopwords from {}",
                    stopwords.len(),
                    path.display()
                );
                stopwords
            }
            Err(e) => {
                warn!(
                    "Could not load stopwords from {}: {}. Text preprocessing may be less effective.",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cleaned tokens of one document, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDocument {
    tokens: Vec<String>,
}

impl NormalizedDocument {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces
    pub fn as_text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Lowercase, strip everything but `a-z` and whitespace, then drop
/// stopwords and tokens of two characters or fewer.
pub fn normalize(text: &str, stopwords: &Stopwords) -> NormalizedDocument {
    if text.is_empty() {
        return NormalizedDocument::default();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();

    let tokens = cleaned
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_CHARS && !stopwords.contains(t))
        .map(String::from)
        .collect();

    NormalizedDocument { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize("", &Stopwords::english()).is_empty());
        assert_eq!(normalize("", &Stopwords::english()).as_text(), "");
    }

    #[test]
    fn test_basic_normalization() {
        let doc = normalize(
            "Experienced Python and SQL developer!",
            &Stopwords::english(),
        );
        assert_eq!(doc.tokens(), &["experienced", "python", "sql", "developer"]);
        assert_eq!(doc.as_text(), "experienced python sql developer");
    }

    #[test]
    fn test_strips_digits_punctuation_and_accents() {
        let doc = normalize("C++ 10yrs café, e-mail", &Stopwords::english());
        // "c" is too short once "++" is gone; "yrs" survives the digit strip
        assert_eq!(doc.tokens(), &["yrs", "caf", "email"]);
    }

    #[test]
    fn test_no_short_tokens_or_stopwords() {
        let stopwords = Stopwords::english();
        let doc = normalize(
            "I am an R and Go dev who has worked with the AWS cloud over the years",
            &stopwords,
        );
        for token in doc.tokens() {
            assert!(token.len() > 2, "short token {}", token);
            assert!(!stopwords.contains(token), "stopword {}", token);
        }
        assert_eq!(doc.as_text(), "dev worked aws cloud years");
    }

    #[test]
    fn test_stopword_only_input() {
        assert!(normalize("the and of with", &Stopwords::english()).is_empty());
    }

    #[test]
    fn test_empty_stopwords_still_filters_length() {
        let doc = normalize("the cat is on a mat", &Stopwords::empty());
        assert_eq!(doc.tokens(), &["the", "cat", "mat"]);
    }

    #[test]
    fn test_stopwords_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop.txt");
        std::fs::write(&path, "# custom\nDeveloper\n\nsenior\n").unwrap();

        let stopwords = Stopwords::from_path(&path);
        assert_eq!(stopwords.len(), 2);
        assert!(stopwords.contains("developer"));
    }

    #[test]
    fn test_stopwords_missing_file_is_empty() {
        let stopwords = Stopwords::from_path(Path::new("/nonexistent/stop.txt"));
        assert!(stopwords.is_empty());
    }

    #[test]
    fn test_bundled_list() {
        let stopwords = Stopwords::english();
        assert_eq!(stopwords.len(), 179);
        assert!(stopwords.contains("the"));
        assert!(!stopwords.contains("python"));
    }
}
