//! Editable task drafts, shared by the create modal and inline card editing.

use chrono::NaiveDate;

use crate::task::{Category, Task};

/// Due dates are typed in ISO form.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("task text is blank")]
    BlankText,
    #[error("invalid due date: {0:?}")]
    InvalidDate(String),
}

/// Which input of the form has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Text,
    Category,
    Tags,
    DueDate,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Text,
        FormField::Category,
        FormField::Tags,
        FormField::DueDate,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> FormField {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Validated form contents, ready for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub text: String,
    pub category: Category,
    /// Comma separated
    pub tags: String,
    /// `YYYY-MM-DD`, empty for none
    pub due_date: String,
    pub focus: FormField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            category: task.category,
            tags: join_tags(&task.tags),
            due_date: task
                .due_date
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            focus: FormField::Text,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type a character into the focused text input. The category
    /// selector ignores typing.
    pub fn insert_char(&mut self, c: char) {
        if let Some(buf) = self.focused_buffer() {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.focused_buffer() {
            buf.pop();
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.prev()
        };
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Text => Some(&mut self.text),
            FormField::Tags => Some(&mut self.tags),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Category => None,
        }
    }

    pub fn parse_due_date(&self) -> Result<Option<NaiveDate>, FormError> {
        let raw = self.due_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT)
            .map(Some)
            .map_err(|_| FormError::InvalidDate(raw.to_string()))
    }

    /// The text gate: whitespace-only text never becomes a task.
    pub fn validate(&self) -> Result<NewTask, FormError> {
        if self.text.trim().is_empty() {
            return Err(FormError::BlankText);
        }
        Ok(NewTask {
            text: self.text.clone(),
            category: self.category,
            tags: split_tags(&self.tags),
            due_date: self.parse_due_date()?,
        })
    }
}

/// Split a comma separated tag string. Pieces are trimmed and empty ones
/// dropped, so `""` yields no tags.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`split_tags`], except for tags that contain a comma.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
