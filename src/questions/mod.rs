//! Question library: the ordered questionnaire the guided flow walks through.

mod filter;
mod library;
mod schema;
mod validation;

pub use filter::{available_roles, filter_questions, RoleFilter};
pub use library::{builtin_questions, load_questions, parse_questions};
pub use schema::{Question, QuestionKind};
pub use validation::validate_questions;
