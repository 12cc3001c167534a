use super::schema::Question;
use std::collections::BTreeSet;
use std::fmt;

/// Literal role name that means "no filter".
pub const ALL_ROLES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Role(String),
}

impl RoleFilter {
    pub fn parse(s: &str) -> Self {
        if s == ALL_ROLES {
            RoleFilter::All
        } else {
            RoleFilter::Role(s.to_string())
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Role(role) => question.role == *role,
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFilter::All => f.write_str(ALL_ROLES),
            RoleFilter::Role(role) => f.write_str(role),
        }
    }
}

/// Questions visible under `filter`, in library order.
pub fn filter_questions<'a>(questions: &'a [Question], filter: &RoleFilter) -> Vec<&'a Question> {
    questions.iter().filter(|q| filter.matches(q)).collect()
}

/// Sorted distinct roles, excluding the literal "All" role.
pub fn available_roles(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.role != ALL_ROLES)
        .map(|q| q.role.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionKind;

    fn question(role: &str, field: &str) -> Question {
        Question {
            role: role.to_string(),
            prompt: format!("{}?", field),
            kind: QuestionKind::Text,
            field: field.to_string(),
            options: None,
        }
    }

    fn library() -> Vec<Question> {
        vec![
            question("Safety", "Hazard"),
            question("Engineer", "Probability (P)"),
            question("All", "Notes"),
            question("Safety", "Mitigation"),
        ]
    }

    #[test]
    fn test_all_returns_full_list_in_order() {
        let questions = library();
        let visible = filter_questions(&questions, &RoleFilter::All);
        let expected: Vec<&Question> = questions.iter().collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_role_filter_keeps_matching_only() {
        let questions = library();
        let visible = filter_questions(&questions, &RoleFilter::parse("Safety"));
        let fields: Vec<&str> = visible.iter().map(|q| q.field.as_str()).collect();
        assert_eq!(fields, vec!["Hazard", "Mitigation"]);
    }

    #[test]
    fn test_unknown_role_is_empty() {
        let questions = library();
        assert!(filter_questions(&questions, &RoleFilter::parse("Auditor")).is_empty());
    }

    #[test]
    fn test_available_roles_sorted_without_all() {
        let roles = available_roles(&library());
        assert_eq!(roles, vec!["Engineer".to_string(), "Safety".to_string()]);
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(RoleFilter::parse("All"), RoleFilter::All);
        assert_eq!(RoleFilter::parse("Engineer").to_string(), "Engineer");
    }
}
