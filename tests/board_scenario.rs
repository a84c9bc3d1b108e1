use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use taskbuddy::app::App;
use taskbuddy::config::UiConfig;
use taskbuddy::kanban_board::KanbanBoard;
use taskbuddy::task::{Category, Status};

#[test]
fn add_move_edit_delete() {
    let mut board = KanbanBoard::new();
    let id = board.add_task("Buy milk", None, None, None);

    let mut added = serde_json::to_value(board.tasks()).unwrap();
    added[0].as_object_mut().unwrap().remove("id");
    assert_eq!(
        added,
        json!([{
            "text": "Buy milk",
            "status": "todo",
            "category": "work",
            "tags": [],
            "dueDate": null,
        }])
    );

    board.update_status(id, Status::InProgress);
    let task = board.get(id).unwrap();
    assert_eq!(task.status, Status::InProgress);
    assert_eq!(task.category, Category::Work);
    assert!(task.tags.is_empty());
    assert_eq!(task.due_date, None);

    board.edit_task(
        id,
        "Buy oat milk".into(),
        Category::Personal,
        vec!["groceries".into(), "urgent".into()],
        NaiveDate::from_ymd_opt(2024, 6, 1),
    );
    let edited = serde_json::to_value(board.get(id).unwrap()).unwrap();
    assert_eq!(edited["text"], "Buy oat milk");
    assert_eq!(edited["category"], "personal");
    assert_eq!(edited["tags"], json!(["groceries", "urgent"]));
    assert_eq!(edited["dueDate"], "2024-06-01");
    assert_eq!(edited["status"], "inprogress");

    board.delete_task(id);
    assert!(board.tasks().is_empty());
}

#[test]
fn whitespace_only_text_creates_nothing() {
    let mut app = App::new(&UiConfig::default());
    app.open_modal();
    if let Some(form) = app.modal.as_mut() {
        form.text = "   ".into();
    }
    assert_eq!(app.submit_modal(), None);
    assert!(app.board.tasks().is_empty());
}

#[test]
fn status_subsets_partition_after_mixed_operations() {
    let mut board = KanbanBoard::new();
    let ids: Vec<_> = (0..9)
        .map(|i| board.add_task(format!("task {i}"), None, None, None))
        .collect();
    for (i, id) in ids.iter().enumerate() {
        board.update_status(*id, Status::ALL[i % 3]);
    }
    board.delete_task(ids[4]);

    let total: usize = Status::ALL
        .iter()
        .map(|s| board.get_tasks_by_status(*s).len())
        .sum();
    assert_eq!(total, board.tasks().len());

    let in_progress: Vec<_> = board
        .get_tasks_by_status(Status::InProgress)
        .iter()
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(in_progress, vec!["task 1", "task 7"]);
}
