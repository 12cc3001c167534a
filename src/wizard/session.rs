use crate::assessment::fields::{is_rating_field, MITIGATION, RESIDUAL_FIELDS, RESIDUAL_SCORE, RISK_SCORE};
use crate::assessment::{CellValue, Row, Table};
use crate::questions::{available_roles, Question, RoleFilter};
use crate::scoring::{residual_from, risk_score};

/// The guided flow always edits this row.
pub const WIZARD_ROW: usize = 0;

/// An answer as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Free text
    Text(String),
    /// Code of the chosen option of a select question
    Choice(i64),
}

impl From<Answer> for CellValue {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Text(s) => CellValue::Text(s),
            Answer::Choice(code) => CellValue::Int(code),
        }
    }
}

/// What a save changed besides the answered field.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub field: String,
    pub risk_score: Option<i64>,
    pub residual_score: Option<i64>,
}

/// State of one guided entry session.
///
/// Owns the question library, the active role filter, the cursor into the
/// visible questions and the single in-progress record.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    filter: RoleFilter,
    visible: Vec<usize>,
    cursor: usize,
    blank: Table,
    table: Table,
}

impl Session {
    /// Start a session whose record uses the template's columns.
    pub fn new(questions: Vec<Question>, template: &Table) -> Self {
        let blank = template.empty_like();
        let mut session = Self {
            questions,
            filter: RoleFilter::All,
            visible: Vec::new(),
            cursor: 0,
            table: blank.clone(),
            blank,
        };
        session.refresh_visible();
        session
    }

    pub fn filter(&self) -> &RoleFilter {
        &self.filter
    }

    /// Filter choices: "All" followed by the sorted library roles
    pub fn filter_choices(&self) -> Vec<RoleFilter> {
        std::iter::once(RoleFilter::All)
            .chain(available_roles(&self.questions).into_iter().map(RoleFilter::Role))
            .collect()
    }

    /// Apply a role filter. The cursor resets to 0 when it falls outside the
    /// new visible list.
    pub fn set_filter(&mut self, filter: RoleFilter) {
        self.filter = filter;
        self.refresh_visible();
        if self.cursor >= self.visible.len() {
            self.cursor = 0;
        }
    }

    /// Move to the next (or previous) filter choice, wrapping around.
    pub fn cycle_filter(&mut self, step: isize) {
        let choices = self.filter_choices();
        let current = choices.iter().position(|f| *f == self.filter).unwrap_or(0);
        let next = wrap(current, step, choices.len());
        if let Some(filter) = choices.into_iter().nth(next) {
            self.set_filter(filter);
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.visible.get(self.cursor).map(|&i| &self.questions[i])
    }

    /// Step the cursor through the visible questions, wrapping at both ends.
    /// Returns the new cursor.
    pub fn advance(&mut self, step: isize) -> usize {
        self.cursor = wrap(self.cursor, step, self.visible.len());
        self.cursor
    }

    /// Save `answer` into the record field `field` and recompute scores.
    ///
    /// Risk Score is set whenever all three ratings are present and cleared
    /// when a rating save leaves them incomplete. Saving Mitigation with
    /// complete ratings copies them into the residual ratings and sets
    /// Residual Score.
    pub fn save_answer(&mut self, field: &str, answer: Answer) -> SaveOutcome {
        self.table.set(WIZARD_ROW, field, answer.into());

        let ratings = self.table.row(WIZARD_ROW).map(Row::ratings).unwrap_or_default();
        let score = risk_score(&ratings);
        match score {
            Some(score) => self.table.set(WIZARD_ROW, RISK_SCORE, CellValue::Int(score)),
            None if is_rating_field(field) => self.table.row_mut(WIZARD_ROW).clear(RISK_SCORE),
            None => {}
        }

        let mut residual_score = None;
        if field == MITIGATION {
            if let Some(residual) = residual_from(&ratings) {
                let values = [residual.severity, residual.probability, residual.detectability];
                for (column, value) in RESIDUAL_FIELDS.iter().zip(values) {
                    if let Some(value) = value {
                        self.table.set(WIZARD_ROW, column, CellValue::Int(value));
                    }
                }
                residual_score = risk_score(&residual);
                if let Some(residual_score) = residual_score {
                    self.table.set(WIZARD_ROW, RESIDUAL_SCORE, CellValue::Int(residual_score));
                }
            }
        }

        tracing::debug!(field, ?score, ?residual_score, "saved answer");
        SaveOutcome {
            field: field.to_string(),
            risk_score: score,
            residual_score,
        }
    }

    /// Save `answer` for the current question, if there is one.
    pub fn save_current(&mut self, answer: Answer) -> Option<SaveOutcome> {
        let field = self.current_question()?.field.clone();
        Some(self.save_answer(&field, answer))
    }

    /// The in-progress table (zero or one row)
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn record(&self) -> Option<&Row> {
        self.table.row(WIZARD_ROW)
    }

    /// Discard the record and return to the first question.
    pub fn reset(&mut self) {
        self.table = self.blank.clone();
        self.cursor = 0;
    }

    fn refresh_visible(&mut self) {
        self.visible = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| self.filter.matches(q))
            .map(|(i, _)| i)
            .collect();
    }
}

/// `(index + step) mod len` with Euclidean remainder; 0 for an empty list.
fn wrap(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (index as isize + step).rem_euclid(len) as usize
}
