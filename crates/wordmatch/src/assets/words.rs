use serde::{Deserialize, Serialize};
use crate::error::GameError;

/// One vocabulary entry: a source-language term and its target-language translation.
/// Loaded from a JSON file at runtime and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermPair {
    #[serde(rename = "sourceTerm", alias = "source_term", alias = "english")]
    pub source_term: String,
    #[serde(rename = "targetTerm", alias = "target_term", alias = "french")]
    pub target_term: String,
}

impl TermPair {
    pub fn new(source_term: impl Into<String>, target_term: impl Into<String>) -> Self {
        Self {
            source_term: source_term.into(),
            target_term: target_term.into(),
        }
    }
}

/// Parse a word list from a JSON array of records.
///
/// Accepts `sourceTerm`/`targetTerm`, `source_term`/`target_term`, or the
/// older `english`/`french` field names.
pub fn parse_word_list(json: &str) -> Result<Vec<TermPair>, GameError> {
    serde_json::from_str(json).map_err(GameError::WordList)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_camel_case_records() {
        let json = r#"[
            { "sourceTerm": "cat", "targetTerm": "chat" },
            { "sourceTerm": "dog", "targetTerm": "chien" }
        ]"#;
        let pairs = parse_word_list(json).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], TermPair::new("dog", "chien"));
    }

    #[test]
    fn parse_english_french_records() {
        let json = r#"[{ "english": "house", "french": "maison" }]"#;
        let pairs = parse_word_list(json).unwrap();
        assert_eq!(pairs[0].source_term, "house");
        assert_eq!(pairs[0].target_term, "maison");
    }

    #[test]
    fn serializes_with_canonical_names() {
        let json = serde_json::to_string(&TermPair::new("tree", "arbre")).unwrap();
        assert_eq!(json, r#"{"sourceTerm":"tree","targetTerm":"arbre"}"#);
    }

    #[test]
    fn missing_field_is_a_word_list_error() {
        let err = parse_word_list(r#"[{ "english": "book" }]"#).unwrap_err();
        assert!(matches!(err, GameError::WordList(_)));
    }
}
