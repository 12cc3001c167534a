use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Tabs};
use crate::assessment::fields::SCORE_FIELDS;
use crate::assessment::Table as Assessment;
use crate::questions::QuestionKind;
use crate::scoring::{colour_for, ScoringConfig};
use crate::tui::app::{App, InputMode, Tab};
use crate::tui::theme::ThemeColors;

/// Widest a table column may get
const MAX_COLUMN_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Tab bar
        Constraint::Fill(1),    // Tab body
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_tab {
        Tab::Guided => render_guided(frame, chunks[2], app),
        Tab::Review => render_review(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::UploadPath => render_upload_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal | InputMode::EditText | InputMode::ChooseOption => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Risk Assessment Builder";
    let mut spans = vec![Span::styled(title, Style::default().fg(app.theme.title_color).bold())];

    let filter_text = format!("Role: {}", app.session.filter());
    let padding_len = (area.width as usize).saturating_sub(title.len() + filter_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(filter_text, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let selected = match app.current_tab {
        Tab::Guided => 0,
        Tab::Review => 1,
    };

    let tabs = Tabs::new(vec!["Guided entry", "Review"])
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_guided(frame: &mut Frame, area: Rect, app: &App) {
    let option_lines = app
        .current_question()
        .map_or(0, |q| q.choices().len() as u16);
    let panel_height = (4 + option_lines.max(1)).min(area.height / 2);

    let chunks = Layout::vertical([
        Constraint::Length(panel_height),
        Constraint::Fill(1),
    ])
    .split(area);

    render_question(frame, chunks[0], app);

    let block = Block::bordered().title(" Current record ");
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    render_assessment(
        frame,
        inner,
        app.session.table(),
        &app.scoring,
        &app.theme,
        None,
        "Nothing saved yet",
    );
}

fn render_question(frame: &mut Frame, area: Rect, app: &App) {
    let position = format!(
        " Question {}/{} ",
        if app.session.visible_len() == 0 { 0 } else { app.session.cursor() + 1 },
        app.session.visible_len()
    );
    let block = Block::bordered()
        .title(position)
        .border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(question) = app.current_question() else {
        let msg = Paragraph::new(format!("No questions for role '{}'", app.session.filter()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        frame.render_widget(msg, inner);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            question.heading(),
            Style::default().fg(app.theme.prompt_color).bold(),
        )),
        Line::from(Span::styled(
            format!("-> {}", question.field),
            Style::default().fg(app.theme.muted),
        )),
    ];

    match question.kind {
        QuestionKind::Text => {
            let editing = app.input_mode == InputMode::EditText;
            let text = if editing {
                format!("Answer: {}|", app.text_input)
            } else if app.text_input.is_empty() {
                "Answer: (Enter to type)".to_string()
            } else {
                format!("Answer: {}", app.text_input)
            };
            let style = if editing {
                Style::default().bold()
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
        QuestionKind::Select => {
            let choosing = app.input_mode == InputMode::ChooseOption;
            for (i, (code, label)) in question.choices().iter().enumerate() {
                let marker = if i == app.option_cursor { ">" } else { " " };
                let text = format!("{} {}. {}", marker, code, label);
                let style = if i == app.option_cursor && choosing {
                    app.theme.row_selected
                } else if i == app.option_cursor {
                    Style::default().bold()
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(text, style)));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_review(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = match &app.review_source {
        Some(path) => format!(" {} ", path.display()),
        None => " Template ".to_string(),
    };
    let block = Block::bordered().title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_assessment(
        frame,
        inner,
        &app.review,
        &app.scoring,
        &app.theme,
        Some(&mut app.review_state),
        "No assessment loaded (u to upload)",
    );
}

/// Render an assessment table with score cells coloured by band
fn render_assessment(
    frame: &mut Frame,
    area: Rect,
    assessment: &Assessment,
    scoring: &ScoringConfig,
    theme: &ThemeColors,
    state: Option<&mut TableState>,
    empty_msg: &str,
) {
    if assessment.columns().is_empty() || assessment.is_empty() {
        let msg = Paragraph::new(empty_msg.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(msg, area);
        return;
    }

    let columns = assessment.columns();

    let rows: Vec<Row> = assessment
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    let text = record.get(column).map(|v| v.to_string()).unwrap_or_default();
                    let style = if SCORE_FIELDS.contains(&column.as_str()) {
                        record
                            .number(column)
                            .map(|score| theme.band_style(colour_for(score, scoring)))
                            .unwrap_or_default()
                    } else {
                        Style::default()
                    };
                    Cell::from(text).style(style)
                })
                .collect();

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let longest = assessment
                .rows()
                .iter()
                .filter_map(|r| r.get(column).map(|v| v.to_string().chars().count()))
                .fold(column.chars().count(), usize::max);
            let width = (longest as u16).min(MAX_COLUMN_WIDTH);
            if i + 1 == columns.len() {
                Constraint::Min(width)
            } else {
                Constraint::Length(width)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(
            Row::new(columns.iter().map(|c| Cell::from(c.clone())))
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    match state {
        Some(state) => frame.render_stateful_widget(table, area, state),
        None => frame.render_widget(table, area),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") || msg.contains("cancelled") {
            app.theme.flash_error
        } else if msg.starts_with("Saved") || msg.starts_with("Loaded") || msg.starts_with("Exported") {
            app.theme.flash_success
        } else {
            Color::White  // Default for unknown message types
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match (app.input_mode, app.current_tab) {
            (InputMode::EditText, _) => vec![("Enter", ":done "), ("Esc", ":done")],
            (InputMode::ChooseOption, _) => vec![("j/k", ":choose "), ("Enter", ":done")],
            (_, Tab::Guided) => vec![
                ("h/l", ":prev/next "),
                ("r", ":role "),
                ("Enter", ":answer "),
                ("s", ":save "),
                ("n", ":new "),
                ("Tab", ":review "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            (_, Tab::Review) => {
                let mut hints = vec![("j/k", ":nav "), ("u", ":upload ")];
                if app.can_export() {
                    hints.push(("d", ":download high risks "));
                }
                hints.extend([("Tab", ":guided "), ("?", ":help "), ("q", ":quit")]);
                hints
            }
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(app.theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.theme.status_bar_bg)),
        area
    );
}

/// Render the upload path input popup
fn render_upload_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(60, 5, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Upload assessment (.xlsx) ", app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Input line
        Constraint::Length(1),  // Help text
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(format!("{}|", app.upload_input)), chunks[0]);

    let help = Paragraph::new("Enter: load | Esc: cancel")
        .style(Style::default().fg(app.theme.muted));
    frame.render_widget(help, chunks[1]);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 18, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let entries = [
        ("h / Left      ", "Previous question"),
        ("l / Right     ", "Next question"),
        ("r / R         ", "Next / previous role filter"),
        ("Enter / e     ", "Type or choose an answer"),
        ("s             ", "Save answer"),
        ("n             ", "Start a new record"),
        ("Tab           ", "Toggle Guided/Review"),
        ("j / k         ", "Move in review table"),
        ("u             ", "Upload .xlsx for review"),
        ("c             ", "Clear upload, show template"),
        ("d             ", "Download high risks as CSV"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
