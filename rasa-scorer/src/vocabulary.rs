//! Fixed vocabulary of domain adjectives looked up in review comments.

use std::collections::BTreeSet;

use thiserror::Error;

/// Adjectives recognised in review comments by default.
pub const DEFAULT_SENTIMENT_WORDS: [&str; 9] = [
    "enak", "lezat", "pedas", "murah", "mahal", "nyaman", "ramai", "cepat", "lambat",
];

/// Errors raised when building a [`SentimentVocabulary`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    /// An entry was empty or only whitespace.
    #[error("vocabulary entry {position} is empty")]
    EmptyWord {
        /// Zero-based position of the entry in the input.
        position: usize,
    },
    /// An entry contained whitespace and could never match a single token.
    #[error("vocabulary entry '{word}' contains whitespace")]
    MultipleTokens {
        /// Offending entry.
        word: String,
    },
}

/// Words whose presence in a review comment is counted as a taste signal.
///
/// Entries are lower-cased and de-duplicated. Matching is by exact token, so
/// `"enak"` matches the comment `"enak banget"` but not `"enaknya"`.
///
/// # Examples
/// ```
/// use rasa_scorer::SentimentVocabulary;
///
/// let vocabulary = SentimentVocabulary::new(["Gurih", "pedas", "PEDAS"])?;
/// assert_eq!(vocabulary.len(), 2);
/// assert!(vocabulary.contains("gurih"));
/// assert!(SentimentVocabulary::default().contains("enak"));
/// # Ok::<(), rasa_scorer::VocabularyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentVocabulary {
    words: BTreeSet<String>,
}

impl SentimentVocabulary {
    /// Build a vocabulary from arbitrary words.
    ///
    /// # Errors
    /// Returns [`VocabularyError`] when an entry is blank or contains
    /// whitespace.
    pub fn new<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded = BTreeSet::new();
        for (position, word) in words.into_iter().enumerate() {
            let trimmed = word.as_ref().trim();
            if trimmed.is_empty() {
                return Err(VocabularyError::EmptyWord { position });
            }
            if trimmed.contains(char::is_whitespace) {
                return Err(VocabularyError::MultipleTokens {
                    word: trimmed.to_owned(),
                });
            }
            folded.insert(trimmed.to_lowercase());
        }
        Ok(Self { words: folded })
    }

    /// Whether `token` is part of the vocabulary. Tokens must already be
    /// lower-cased.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Iterate over the words in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for SentimentVocabulary {
    fn default() -> Self {
        Self {
            words: DEFAULT_SENTIMENT_WORDS
                .iter()
                .map(|word| (*word).to_owned())
                .collect(),
        }
    }
}
