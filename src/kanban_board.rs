use crate::task::{Category, Status, Task, TaskId};
use chrono::NaiveDate;
use tracing::{debug, trace};

/// The task store. Every operation is total: an id that matches nothing
/// leaves the list untouched.
#[derive(Debug, Default)]
pub struct KanbanBoard {
    tasks: Vec<Task>,
    next_id: u64,
}

impl KanbanBoard {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new `Todo` task. Callers validate `text` beforehand.
    pub fn add_task(
        &mut self,
        text: impl Into<String>,
        category: Option<Category>,
        tags: Option<Vec<String>>,
        due_date: Option<NaiveDate>,
    ) -> TaskId {
        // Default-constructed boards start the counter at 0.
        let id = TaskId(self.next_id.max(1));
        self.next_id = id.0 + 1;

        let task = Task {
            id,
            text: text.into(),
            status: Status::Todo,
            category: category.unwrap_or_default(),
            tags: tags.unwrap_or_default(),
            due_date,
        };
        debug!(%id, text = %task.text, category = %task.category, "task added");
        self.tasks.push(task);
        id
    }

    pub fn update_status(&mut self, id: TaskId, status: Status) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                debug!(%id, from = ?task.status, to = ?status, "task status changed");
                task.status = status;
            }
            None => trace!(%id, "update_status: no such task"),
        }
    }

    pub fn edit_task(
        &mut self,
        id: TaskId,
        text: String,
        category: Category,
        tags: Vec<String>,
        due_date: Option<NaiveDate>,
    ) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text;
                task.category = category;
                task.tags = tags;
                task.due_date = due_date;
                debug!(%id, "task edited");
            }
            None => trace!(%id, "edit_task: no such task"),
        }
    }

    pub fn delete_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() < before {
            debug!(%id, "task deleted");
        } else {
            trace!(%id, "delete_task: no such task");
        }
    }

    pub fn get_tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }
}
