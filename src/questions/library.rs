use super::schema::Question;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const BUILTIN_LIBRARY: &str = include_str!("../../assets/questions.json");

/// Parse a JSON question list.
pub fn parse_questions(json: &str) -> Result<Vec<Question>> {
    serde_json::from_str(json).context("Failed to parse question library")
}

/// The library shipped with the binary.
pub fn builtin_questions() -> Result<Vec<Question>> {
    parse_questions(BUILTIN_LIBRARY)
}

/// Load the question library.
///
/// With `None` the built-in library is used. A configured path that does not
/// exist is an error.
pub fn load_questions(path: Option<&Path>) -> Result<Vec<Question>> {
    let Some(path) = path else {
        tracing::debug!("using built-in question library");
        return builtin_questions();
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read question library at {}", path.display()))?;
    let questions = parse_questions(&content)
        .with_context(|| format!("Invalid question library in {}", path.display()))?;

    tracing::debug!(count = questions.len(), path = %path.display(), "loaded question library");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{validate_questions, QuestionKind};
    use std::io::Write;

    #[test]
    fn test_builtin_library_is_valid() {
        let questions = builtin_questions().unwrap();
        assert!(validate_questions(&questions).is_ok());
        for field in ["Severity (S)", "Probability (P)", "Detectability (D)", "Mitigation"] {
            assert!(
                questions.iter().any(|q| q.field == field),
                "built-in library is missing {}",
                field
            );
        }
    }

    #[test]
    fn test_builtin_ratings_are_selects() {
        let questions = builtin_questions().unwrap();
        let severity = questions.iter().find(|q| q.field == "Severity (S)").unwrap();
        assert_eq!(severity.kind, QuestionKind::Select);
        assert_eq!(severity.choices().len(), 5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"role": "Owner", "prompt": "Why?", "type": "text", "field": "Mitigation"}}]"#
        )
        .unwrap();

        let questions = load_questions(Some(file.path())).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].field, "Mitigation");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_questions(Some(&dir.path().join("questions.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_questions(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid question library"));
    }
}
