mod session;

pub use session::{Answer, SaveOutcome, Session, WIZARD_ROW};
