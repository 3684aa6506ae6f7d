//! Validation patterns for human-entered text fields
//!
//! Four named regular-expression contracts over an extended Latin letter set
//! (accented vowels and ñ/Ñ included). Patterns are anchored start-to-end and
//! compiled once; matching is a pure predicate with no shared mutable state.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character class for a single letter, including accented vowels and ñ/Ñ
const LETTER: &str = "[a-zA-ZáéíóúÁÉÍÓÚñÑ]";

/// Character class for a single letter or ASCII digit
const LETTER_OR_NUMBER: &str = "[a-zA-Z0-9áéíóúÁÉÍÓÚñÑ]";

static LETTERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{LETTER}*$")).unwrap());

static LETTERS_WITH_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^({LETTER}+[\s]?)*{LETTER}$")).unwrap());

static LETTERS_AND_NUMBERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{LETTER_OR_NUMBER}*$")).unwrap());

static LETTERS_AND_NUMBERS_WITH_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^({LETTER_OR_NUMBER}+[\s]?)*{LETTER_OR_NUMBER}$")).unwrap()
});

/// Named validation pattern for free-text input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPattern {
    /// Zero or more letters; the empty string matches
    LettersOnly,
    /// Space-separated letter groups, no leading/trailing/double space;
    /// must end with a letter, so the empty string fails
    LettersWithSpace,
    /// Zero or more letters or digits; the empty string matches
    LettersAndNumbers,
    /// Space-separated letter-or-digit groups, same spacing rules as
    /// `LettersWithSpace`
    LettersAndNumbersWithSpace,
}

impl ValidationPattern {
    /// Check whether the entire candidate string satisfies this pattern
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex().is_match(candidate)
    }

    /// The compiled regex backing this pattern
    pub fn regex(&self) -> &'static Regex {
        match self {
            Self::LettersOnly => &LETTERS_ONLY,
            Self::LettersWithSpace => &LETTERS_WITH_SPACE,
            Self::LettersAndNumbers => &LETTERS_AND_NUMBERS,
            Self::LettersAndNumbersWithSpace => &LETTERS_AND_NUMBERS_WITH_SPACE,
        }
    }
}

impl std::fmt::Display for ValidationPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LettersOnly => "LETTERS_ONLY",
            Self::LettersWithSpace => "LETTERS_WITH_SPACE",
            Self::LettersAndNumbers => "LETTERS_AND_NUMBERS",
            Self::LettersAndNumbersWithSpace => "LETTERS_AND_NUMBERS_WITH_SPACE",
        };
        write!(f, "{}", name)
    }
}
