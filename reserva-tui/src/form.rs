//! Modal form state
//!
//! A small wrapper around `tui_input` fields: one labelled input per
//! schema field, a focus cursor, and per-field validation messages
//! distributed from the schema's `first_messages` output.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::ui::centered_rect;

pub struct FormField {
    /// Schema field name the validation messages are keyed by
    pub name: &'static str,
    pub label: &'static str,
    pub input: Input,
    pub error: Option<String>,
    pub masked: bool,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: Input::default(),
            error: None,
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = Input::from(value.into());
        self
    }

    fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.input.value().chars().count())
        } else {
            self.input.value().to_string()
        }
    }
}

pub struct FormState {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormState {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, name: &str) -> String {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.input.value().to_string())
            .unwrap_or_default()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Forward an edit key to the focused input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Distribute validation messages onto the fields by schema name.
    pub fn apply_errors(&mut self, messages: &HashMap<String, String>) {
        for field in &mut self.fields {
            field.error = messages.get(field.name).cloned();
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|field| field.error.is_some())
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.input.reset();
            field.error = None;
        }
        self.focus = 0;
    }

    /// Render as a centered dialog overlay.
    pub fn render_dialog(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        submitting: bool,
        banner: Option<&str>,
    ) {
        let dialog = centered_rect(60, 80, area);
        f.render_widget(Clear, dialog);

        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog);
        f.render_widget(block, dialog);

        // Two rows per field (input + message), one footer row.
        let mut constraints: Vec<Constraint> = Vec::new();
        for _ in &self.fields {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus && !submitting;
            let label_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<14}", field.label), label_style),
                Span::raw(field.display_value()),
            ]);
            f.render_widget(Paragraph::new(line), rows[i * 2]);

            if let Some(error) = &field.error {
                let message = Paragraph::new(error.as_str())
                    .style(Style::default().fg(Color::Red));
                f.render_widget(message, rows[i * 2 + 1]);
            }

            if focused {
                let cursor = field.input.visual_cursor() as u16;
                f.set_cursor_position((rows[i * 2].x + 14 + cursor, rows[i * 2].y));
            }
        }

        let footer_area = rows[rows.len() - 1];
        let footer = if submitting {
            Line::from(Span::styled(
                "Submitting...",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(banner) = banner {
            Line::from(Span::styled(banner, Style::default().fg(Color::Red)))
        } else {
            Line::from(Span::styled(
                "Enter submit | Tab next field | Esc cancel",
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(footer), footer_area);
    }
}
