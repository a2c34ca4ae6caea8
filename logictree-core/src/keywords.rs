//! Condition indicator keywords
//!
//! The same keyword set decides whether builder text "looks like a condition"
//! and whether validator text is well formed, so both compile it from here.

use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};

pub const DEFAULT_CONDITION_KEYWORDS: [&str; 3] = ["if", "check", "when"];

#[derive(Debug, Clone)]
pub struct ConditionKeywords {
    words: Vec<String>,
    // keyword at the very start of the text
    leading: Regex,
    // keyword followed by a space anywhere in the text
    embedded: Regex,
}

impl ConditionKeywords {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Result<Self, ConfigError> {
        let words: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(ConfigError::NoKeywords);
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        let leading = RegexBuilder::new(&format!("^(?:{alternation})"))
            .case_insensitive(true)
            .build()?;
        let embedded = RegexBuilder::new(&format!("(?:{alternation}) "))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            words,
            leading,
            embedded,
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Text begins with a keyword, e.g. "If Claim Type is Auto".
    pub fn starts_condition(&self, text: &str) -> bool {
        self.leading.is_match(text)
    }

    /// Text contains a keyword followed by a space, e.g. "Pay if approved".
    pub fn mentions_condition(&self, text: &str) -> bool {
        self.embedded.is_match(text)
    }

    /// Action-slot text that is really an unconverted condition.
    pub fn looks_like_condition(&self, text: &str) -> bool {
        self.starts_condition(text) || self.mentions_condition(text)
    }

    /// Human-readable keyword list: `'If', 'Check', or 'When'`
    pub fn describe(&self) -> String {
        let quoted: Vec<String> = self
            .words
            .iter()
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => format!("'{}{}'", first.to_uppercase(), chars.as_str()),
                    None => String::new(),
                }
            })
            .collect();
        match quoted.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        }
    }
}

impl Default for ConditionKeywords {
    fn default() -> Self {
        Self::new(&DEFAULT_CONDITION_KEYWORDS).expect("Failed to compile default condition keywords")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("If Claim Type is Auto", true)]
    #[case("if damage > 1000", true)]
    #[case("CHECK coverage", true)]
    #[case("When filed late", true)]
    #[case("Maybe do something", false)]
    #[case("Pay claim", false)]
    fn detects_leading_keyword(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(ConditionKeywords::default().starts_condition(text), expected);
    }

    #[rstest]
    #[case("Pay claim if approved", true)]
    #[case("Escalate when flagged", true)]
    #[case("Verify claim", false)]
    #[case("Notify adjuster", false)]
    fn detects_embedded_keyword(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(ConditionKeywords::default().mentions_condition(text), expected);
    }

    #[test]
    fn custom_keywords_replace_defaults() {
        let keywords = ConditionKeywords::new(&["unless"]).unwrap();
        assert!(keywords.starts_condition("Unless paid"));
        assert!(!keywords.starts_condition("If paid"));
        assert_eq!(keywords.words(), ["unless"]);
    }

    #[test]
    fn keywords_are_escaped() {
        let keywords = ConditionKeywords::new(&["a.b"]).unwrap();
        assert!(keywords.starts_condition("a.b then"));
        assert!(!keywords.starts_condition("axb then"));
    }

    #[test]
    fn empty_keyword_set_is_rejected() {
        let empty: [&str; 2] = ["", "  "];
        assert!(matches!(
            ConditionKeywords::new(&empty),
            Err(ConfigError::NoKeywords)
        ));
    }

    #[test]
    fn describe_lists_capitalized_keywords() {
        assert_eq!(
            ConditionKeywords::default().describe(),
            "'If', 'Check', or 'When'"
        );
    }
}
