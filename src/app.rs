use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::UiConfig;
use crate::form::TaskForm;
use crate::kanban_board::KanbanBoard;
use crate::task::{Status, Task, TaskId};

/// Which layout the tasks are shown in. Board and list exclude each other;
/// `None` is the state before the user has picked one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    None,
    Board,
    List,
}

/// Controller state: the board plus everything that only matters to the UI.
#[derive(Debug)]
pub struct App {
    pub board: KanbanBoard,
    pub view_mode: ViewMode,
    /// Expanded accordion section in list view
    pub expanded: Option<Status>,
    /// Open edit drafts, one per card in edit mode
    pub editing: HashMap<TaskId, TaskForm>,
    /// The create-task modal, when open
    pub modal: Option<TaskForm>,
    /// Focused column (board) or section (list)
    pub selected_status: Status,
    /// Index into the focused status group
    pub selected_task: usize,
    pub date_format: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        App {
            board: KanbanBoard::new(),
            view_mode: ui.initial_view,
            expanded: None,
            editing: HashMap::new(),
            modal: None,
            selected_status: Status::Todo,
            selected_task: 0,
            date_format: ui.date_format.clone(),
            should_quit: false,
        }
    }

    pub fn tasks_for(&self, status: Status) -> Vec<&Task> {
        self.board.get_tasks_by_status(status)
    }

    pub fn show_board(&mut self) {
        debug!("board view");
        self.view_mode = ViewMode::Board;
    }

    pub fn show_list(&mut self) {
        debug!("list view");
        self.view_mode = ViewMode::List;
    }

    /// Expand `status`, or collapse it if it is already the expanded one.
    pub fn toggle_section(&mut self, status: Status) {
        self.expanded = if self.expanded == Some(status) {
            None
        } else {
            Some(status)
        };
        debug!(section = ?status, expanded = self.expanded.is_some(), "accordion toggled");
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// The form always opens empty.
    pub fn open_modal(&mut self) {
        self.modal = Some(TaskForm::new());
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Create a task from the modal. Invalid input keeps the modal open and
    /// adds nothing.
    pub fn submit_modal(&mut self) -> Option<TaskId> {
        let new_task = match self.modal.as_ref()?.validate() {
            Ok(new_task) => new_task,
            Err(err) => {
                debug!(error = %err, "create form not submitted");
                return None;
            }
        };
        let id = self.board.add_task(
            new_task.text,
            Some(new_task.category),
            Some(new_task.tags),
            new_task.due_date,
        );
        self.close_modal();
        self.clamp_selection();
        Some(id)
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing.contains_key(&id)
    }

    /// Put a card into edit mode, seeding the draft from the task. Done
    /// tasks and unknown ids are refused.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.board.get(id) else {
            return false;
        };
        if task.is_locked() {
            return false;
        }
        let draft = TaskForm::from_task(task);
        self.editing.entry(id).or_insert(draft);
        true
    }

    /// Write the draft back to the board and leave edit mode. A draft that
    /// fails validation stays open.
    pub fn save_edit(&mut self, id: TaskId) -> bool {
        let Some(draft) = self.editing.get(&id) else {
            return false;
        };
        let edited = match draft.validate() {
            Ok(edited) => edited,
            Err(err) => {
                debug!(%id, error = %err, "edit not saved");
                return false;
            }
        };
        self.board
            .edit_task(id, edited.text, edited.category, edited.tags, edited.due_date);
        self.editing.remove(&id);
        true
    }

    pub fn cancel_edit(&mut self, id: TaskId) {
        self.editing.remove(&id);
    }

    pub fn selected(&self) -> Option<&Task> {
        self.tasks_for(self.selected_status)
            .get(self.selected_task)
            .copied()
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected().map(|t| t.id)
    }

    /// The form that receives typing: the modal first, then the selected
    /// card's draft.
    pub fn active_form_mut(&mut self) -> Option<&mut TaskForm> {
        if self.modal.is_some() {
            return self.modal.as_mut();
        }
        let id = self.selected_id()?;
        self.editing.get_mut(&id)
    }

    pub fn focus_status(&mut self, delta: isize) {
        let index = (self.selected_status.index() as isize + delta)
            .clamp(0, Status::ALL.len() as isize - 1) as usize;
        if let Some(status) = Status::from_index(index) {
            self.selected_status = status;
        }
        self.clamp_selection();
    }

    pub fn select_task(&mut self, delta: isize) {
        let len = self.tasks_for(self.selected_status).len();
        if len == 0 {
            self.selected_task = 0;
            return;
        }
        self.selected_task =
            (self.selected_task as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.tasks_for(self.selected_status).len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    pub fn set_selected_status(&mut self, status: Status) {
        let Some(task) = self.selected() else {
            return;
        };
        if task.is_locked() {
            return;
        }
        let id = task.id;
        self.board.update_status(id, status);
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(task) = self.selected() else {
            return;
        };
        if task.is_locked() {
            return;
        }
        let id = task.id;
        self.board.delete_task(id);
        self.editing.remove(&id);
        self.clamp_selection();
    }

    pub fn edit_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.begin_edit(id),
            None => false,
        }
    }

    /// Save the selected card's draft, if it has one.
    pub fn save_selected_edit(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.save_edit(id),
            None => false,
        }
    }

    pub fn cancel_selected_edit(&mut self) {
        if let Some(id) = self.selected_id() {
            self.cancel_edit(id);
        }
    }

    pub fn selected_is_editing(&self) -> bool {
        self.selected_id().is_some_and(|id| self.is_editing(id))
    }

    /// Whether the selected card is on screen: always on the board, only
    /// inside the expanded section in the list.
    pub fn selection_visible(&self) -> bool {
        match self.view_mode {
            ViewMode::None => false,
            ViewMode::Board => true,
            ViewMode::List => self.expanded == Some(self.selected_status),
        }
    }
}
