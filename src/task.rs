use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque task identifier, allocated by the board and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    #[serde(rename = "inprogress")]
    InProgress,
    Done,
}

impl Status {
    /// Board order, left to right.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Column heading on the board
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Section heading in the list view (capitalized raw value)
    pub fn section_title(self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "Inprogress",
            Status::Done => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Study,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Study];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Study => "study",
        }
    }

    /// Next value in selector order, wrapping around
    pub fn next(self) -> Category {
        match self {
            Category::Work => Category::Personal,
            Category::Personal => Category::Study,
            Category::Study => Category::Work,
        }
    }

    pub fn prev(self) -> Category {
        match self {
            Category::Work => Category::Study,
            Category::Personal => Category::Work,
            Category::Study => Category::Personal,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: Status,
    pub category: Category,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Done tasks are frozen as far as the UI is concerned.
    pub fn is_locked(&self) -> bool {
        self.status == Status::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order_matches_board_columns() {
        let titles: Vec<_> = Status::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        for status in Status::ALL {
            assert_eq!(Status::from_index(status.index()), Some(status));
        }
        assert_eq!(Status::from_index(3), None);
    }

    #[test]
    fn category_cycles_through_all_values() {
        let mut c = Category::default();
        assert_eq!(c, Category::Work);
        for _ in 0..Category::ALL.len() {
            c = c.next();
        }
        assert_eq!(c, Category::Work);
        assert_eq!(Category::Work.prev(), Category::Study);
        assert_eq!(Category::Study.prev().next(), Category::Study);
    }

    #[test]
    fn only_done_tasks_are_locked() {
        let mut task = Task {
            id: TaskId(1),
            text: "Write report".into(),
            status: Status::Todo,
            category: Category::Study,
            tags: vec![],
            due_date: None,
        };
        assert!(!task.is_locked());
        task.status = Status::InProgress;
        assert!(!task.is_locked());
        task.status = Status::Done;
        assert!(task.is_locked());
    }
}
