use crate::assessment::fields::RISK_SCORE;
use crate::assessment::{export_high_csv, read_assessment, Table};
use crate::questions::{Question, QuestionKind};
use crate::scoring::ScoringConfig;
use crate::tui::theme::ThemeColors;
use crate::wizard::{Answer, SaveOutcome, Session};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Guided,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    EditText,
    ChooseOption,
    UploadPath,
    Help,
}

pub struct App {
    pub session: Session,
    pub template: Table,
    pub review: Table,
    pub review_source: Option<PathBuf>,
    pub review_state: ratatui::widgets::TableState,
    pub current_tab: Tab,
    pub input_mode: InputMode,
    pub text_input: String,
    pub option_cursor: usize,
    pub upload_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub flash_duration: Duration,
    pub scoring: ScoringConfig,
    pub export_path: PathBuf,
    pub theme: ThemeColors,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        questions: Vec<Question>,
        template: Table,
        scoring: ScoringConfig,
        export_path: PathBuf,
        flash_duration: Duration,
    ) -> Self {
        let session = Session::new(questions, &template);
        let mut review_state = ratatui::widgets::TableState::default();
        if !template.is_empty() {
            review_state.select(Some(0));
        }

        Self {
            session,
            review: template.clone(),
            template,
            review_source: None,
            review_state,
            current_tab: Tab::Guided,
            input_mode: InputMode::Normal,
            text_input: String::new(),
            option_cursor: 0,
            upload_input: String::new(),
            flash_message: None,
            flash_duration,
            scoring,
            export_path,
            theme: ThemeColors::dark(),
            should_quit: false,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed() >= self.flash_duration {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Prev/next question
    pub fn advance(&mut self, step: isize) {
        self.session.advance(step);
        self.reset_draft();
    }

    /// Cycle the role filter
    pub fn cycle_role(&mut self, step: isize) {
        self.session.cycle_filter(step);
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.text_input.clear();
        self.option_cursor = 0;
    }

    /// Open the answer input matching the current question
    pub fn start_answer_input(&mut self) {
        match self.current_question().map(|q| q.kind) {
            Some(QuestionKind::Text) => self.input_mode = InputMode::EditText,
            Some(QuestionKind::Select) => self.input_mode = InputMode::ChooseOption,
            None => {}
        }
    }

    pub fn finish_answer_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_option(&mut self, step: isize) {
        let count = self.current_question().map_or(0, |q| q.choices().len());
        if count == 0 {
            return;
        }
        self.option_cursor = (self.option_cursor as isize + step).rem_euclid(count as isize) as usize;
    }

    /// The answer the save action would store. Select questions default to
    /// their first option.
    pub fn draft_answer(&self) -> Option<Answer> {
        let question = self.current_question()?;
        match question.kind {
            QuestionKind::Text => Some(Answer::Text(self.text_input.clone())),
            QuestionKind::Select => question
                .choices()
                .get(self.option_cursor)
                .map(|(code, _)| Answer::Choice(*code)),
        }
    }

    /// Save the draft answer into the in-progress record
    pub fn save_answer(&mut self) -> Option<SaveOutcome> {
        let answer = self.draft_answer()?;
        let outcome = self.session.save_current(answer)?;

        let mut msg = "Saved!".to_string();
        if let Some(score) = outcome.risk_score {
            msg.push_str(&format!(" Risk Score {}", score));
        }
        if let Some(score) = outcome.residual_score {
            msg.push_str(&format!(", Residual Score {}", score));
        }
        self.show_flash(msg);
        Some(outcome)
    }

    /// Start a new record from the template
    pub fn new_record(&mut self) {
        self.session.reset();
        self.reset_draft();
        self.show_flash("Started a new record".to_string());
    }

    pub fn toggle_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Guided => Tab::Review,
            Tab::Review => Tab::Guided,
        };
    }

    pub fn next_row(&mut self) {
        if self.review.is_empty() {
            return;
        }
        let i = match self.review_state.selected() {
            Some(i) if i + 1 < self.review.len() => i + 1,
            _ => 0,
        };
        self.review_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.review.is_empty() {
            return;
        }
        let i = match self.review_state.selected() {
            Some(0) | None => self.review.len() - 1,
            Some(i) => i - 1,
        };
        self.review_state.select(Some(i));
    }

    pub fn start_upload_input(&mut self) {
        self.input_mode = InputMode::UploadPath;
        self.upload_input.clear();
    }

    pub fn cancel_upload_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.upload_input.clear();
    }

    /// Read the typed workbook path into the review table
    pub fn confirm_upload_input(&mut self) {
        self.input_mode = InputMode::Normal;
        let input = self.upload_input.trim().to_string();
        self.upload_input.clear();

        if input.is_empty() {
            self.show_flash("Upload cancelled".to_string());
            return;
        }

        let path = PathBuf::from(input);
        match read_assessment(&path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), rows = table.len(), "uploaded assessment");
                self.show_flash(format!("Loaded {} rows from {}", table.len(), path.display()));
                self.set_review(table, Some(path));
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.show_flash(format!("Error: {}", e));
            }
        }
    }

    fn set_review(&mut self, table: Table, source: Option<PathBuf>) {
        self.review = table;
        self.review_source = source;
        self.review_state
            .select(if self.review.is_empty() { None } else { Some(0) });
    }

    /// Go back to reviewing the template
    pub fn clear_upload(&mut self) {
        let template = self.template.clone();
        self.set_review(template, None);
        self.show_flash("Showing template".to_string());
    }

    /// Export is only offered when the review table has a Risk Score column
    pub fn can_export(&self) -> bool {
        self.review.has_column(RISK_SCORE)
    }

    pub fn export_high(&mut self) {
        if !self.can_export() {
            self.show_flash(format!("Error: no '{}' column to filter on", RISK_SCORE));
            return;
        }

        match export_high_csv(&self.review, self.scoring.high, &self.export_path) {
            Ok(count) => self.show_flash(format!(
                "Exported {} high risks to {}",
                count,
                self.export_path.display()
            )),
            Err(e) => self.show_flash(format!("Failed to export: {:#}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
