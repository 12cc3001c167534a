use super::schema::{Question, QuestionKind};

/// Validate the question library at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_questions(questions: &[Question]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if questions.is_empty() {
        errors.push("questions: library is empty".to_string());
    }

    for (i, q) in questions.iter().enumerate() {
        if q.field.trim().is_empty() {
            errors.push(format!("questions[{}].field: must not be empty", i));
        }
        if q.prompt.trim().is_empty() {
            errors.push(format!("questions[{}].prompt: must not be empty", i));
        }

        match q.kind {
            QuestionKind::Select => {
                if q.options.as_ref().map_or(true, |opts| opts.is_empty()) {
                    errors.push(format!(
                        "questions[{}].options: select question '{}' needs at least one option",
                        i, q.field
                    ));
                }
            }
            QuestionKind::Text => {
                if q.options.is_some() {
                    errors.push(format!(
                        "questions[{}].options: text question '{}' must not have options",
                        i, q.field
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn select(field: &str, options: Option<BTreeMap<i64, String>>) -> Question {
        Question {
            role: "Engineer".to_string(),
            prompt: "Rate it".to_string(),
            kind: QuestionKind::Select,
            field: field.to_string(),
            options,
        }
    }

    #[test]
    fn test_valid_select() {
        let options = BTreeMap::from([(1, "Low".to_string())]);
        assert!(validate_questions(&[select("Severity (S)", Some(options))]).is_ok());
    }

    #[test]
    fn test_empty_library() {
        let errors = validate_questions(&[]).unwrap_err();
        assert!(errors[0].contains("empty"));
    }

    #[test]
    fn test_select_without_options() {
        let errors = validate_questions(&[select("Severity (S)", None)]).unwrap_err();
        assert!(errors[0].contains("questions[0].options"));

        let errors = validate_questions(&[select("Severity (S)", Some(BTreeMap::new()))]).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_text_with_options() {
        let mut q = select("Mitigation", Some(BTreeMap::from([(1, "x".to_string())])));
        q.kind = QuestionKind::Text;
        let errors = validate_questions(&[q]).unwrap_err();
        assert!(errors[0].contains("must not have options"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut q = select(" ", None);
        q.prompt = String::new();
        let errors = validate_questions(&[q]).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
