use std::fmt::Write as _;
use std::io;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use crate::app::{App, ViewMode};
use crate::form::{FormField, TaskForm};
use crate::input;
use crate::task::{Status, Task};

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                input::handle_key(app, key);
            }
        }

        if app.should_quit {
            info!(tasks = app.board.tasks().len(), "quitting");
            return Ok(());
        }
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.view_mode {
        ViewMode::None => {
            let hint = Paragraph::new("Pick a view: [b] Board  [l] List")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(hint, chunks[1]);
        }
        ViewMode::Board => render_board(f, app, chunks[1]),
        ViewMode::List => render_list(f, app, chunks[1]),
    }
    render_footer(f, app, chunks[2]);

    if let Some(form) = &app.modal {
        render_modal(f, form);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        let style = if active {
            Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
        } else {
            Style::default()
        };
        Span::styled(label, style)
    };
    let lines = vec![
        Line::from(Span::styled(
            "Task Buddy",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            tab("Board", app.view_mode == ViewMode::Board),
            Span::raw("  "),
            tab("List", app.view_mode == ViewMode::List),
            Span::raw("    "),
            Span::styled("[c] Create Task", Style::default().fg(Color::Yellow)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = if app.is_modal_open() || (app.selection_visible() && app.selected_is_editing()) {
        "tab/↑↓ field  ←→ category  enter save  esc close"
    } else {
        match app.view_mode {
            ViewMode::List => "←→ section  space expand  ↑↓ task  1-3 status  d delete  e edit  q quit",
            _ => "←→ column  ↑↓ task  1-3 status  d delete  e edit  b/l view  q quit",
        }
    };
    let footer = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, status) in Status::ALL.into_iter().enumerate() {
        let focused = app.selected_status == status;
        let items: Vec<ListItem> = app
            .tasks_for(status)
            .into_iter()
            .map(|t| ListItem::new(Text::from(card_lines(app, t))))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(status.title())
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));

        let mut state = ListState::default();
        if focused {
            state.select(app.selected().map(|_| app.selected_task));
        }
        f.render_stateful_widget(list, chunks[i], &mut state);
    }
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let mut items = Vec::new();
    let mut selected = None;

    for status in Status::ALL {
        let expanded = app.expanded == Some(status);
        let chevron = if expanded { "▲" } else { "▼" };
        let header_style = if app.selected_status == status {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(status.section_title(), header_style),
            Span::raw(" "),
            Span::styled(chevron, header_style),
        ])));

        if !expanded {
            continue;
        }
        let tasks = app.tasks_for(status);
        if tasks.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "  No tasks",
                Style::default().fg(Color::DarkGray),
            ))));
            continue;
        }
        for (index, task) in tasks.into_iter().enumerate() {
            if app.selected_status == status && app.selected_task == index {
                selected = Some(items.len());
            }
            let lines: Vec<Line> = card_lines(app, task)
                .into_iter()
                .map(|line| {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(line.spans);
                    Line::from(spans)
                })
                .collect();
            items.push(ListItem::new(Text::from(lines)));
        }
    }

    let list = List::new(items)
        .block(Block::default().title("Tasks").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Lines for one task card: its draft while in edit mode, otherwise the
/// task itself. Done cards have no controls.
fn card_lines(app: &App, task: &Task) -> Vec<Line<'static>> {
    if let Some(draft) = app.editing.get(&task.id) {
        let mut lines = form_lines(draft);
        lines.push(Line::from(Span::styled(
            "enter: Save  esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
        return lines;
    }

    let tags = if task.tags.is_empty() {
        "No tags".to_string()
    } else {
        task.tags.join(", ")
    };
    let due = task
        .due_date
        .map(|d| short_date(d, &app.date_format))
        .unwrap_or_else(|| "No due date".to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            task.text.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Category: {}", task.category)),
        Line::from(format!("Tags: {tags}")),
        Line::from(format!("Due Date: {due}")),
    ];
    if !task.is_locked() {
        lines.push(Line::from(vec![
            Span::raw("Status: "),
            Span::styled(task.status.title(), Style::default().fg(Color::Cyan)),
            Span::styled(" (1-3)", Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("d: Delete", Style::default().fg(Color::Red)),
            Span::raw("  "),
            Span::styled("e: Edit", Style::default().fg(Color::Blue)),
        ]));
    }
    lines.push(Line::default());
    lines
}

fn form_lines(form: &TaskForm) -> Vec<Line<'static>> {
    let row = |field: FormField, label: &'static str, value: String, value_style: Style| {
        let marker = if form.focus == field { "› " } else { "  " };
        let label_style = if form.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(label, label_style),
            Span::styled(value, value_style),
        ])
    };

    let date_style = if form.parse_due_date().is_ok() {
        Style::default()
    } else {
        Style::default().fg(Color::Red)
    };
    vec![
        row(FormField::Text, "Task: ", form.text.clone(), Style::default()),
        row(
            FormField::Category,
            "Category: ",
            format!("< {} >", form.category),
            Style::default().fg(Color::Cyan),
        ),
        row(FormField::Tags, "Tags: ", form.tags.clone(), Style::default()),
        row(FormField::DueDate, "Due: ", form.due_date.clone(), date_style),
    ]
}

fn render_modal(f: &mut Frame, form: &TaskForm) {
    let area = centered_rect(60, 9, f.area());
    let mut lines = form_lines(form);
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "enter: Add Task  esc: Close  (tags comma separated, due YYYY-MM-DD)",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title("Create Task")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * width_percent.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Format a due date for a card. A bad format string falls back to ISO.
pub fn short_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::task::Category;
    use ratatui::backend::TestBackend;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buf = terminal.backend().buffer().clone();
        let width = buf.area.width as usize;
        buf.content
            .chunks(width)
            .map(|row| {
                let s: String = row.iter().map(|cell| cell.symbol()).collect();
                s.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(view: ViewMode) -> App {
        App::new(&UiConfig {
            initial_view: view,
            ..UiConfig::default()
        })
    }

    #[test]
    fn no_view_shows_hint() {
        let out = render_to_string(&app_with(ViewMode::None));
        assert!(out.contains("Task Buddy"));
        assert!(out.contains("Pick a view"));
        assert!(!out.contains("In Progress"));
    }

    #[test]
    fn board_shows_three_columns_and_placeholders() {
        let mut app = app_with(ViewMode::Board);
        app.board.add_task("Buy milk", None, None, None);
        let out = render_to_string(&app);
        for title in ["To Do", "In Progress", "Done"] {
            assert!(out.contains(title), "missing column {title}");
        }
        assert!(out.contains("Buy milk"));
        assert!(out.contains("Category: work"));
        assert!(out.contains("Tags: No tags"));
        assert!(out.contains("Due Date: No due date"));
        assert!(out.contains("d: Delete"));
    }

    #[test]
    fn card_shows_tags_and_short_date() {
        let mut app = app_with(ViewMode::Board);
        app.board.add_task(
            "Study",
            Some(Category::Study),
            Some(vec!["exam".into(), "math".into()]),
            NaiveDate::from_ymd_opt(2024, 6, 1),
        );
        let out = render_to_string(&app);
        assert!(out.contains("Tags: exam, math"));
        assert!(out.contains("Due Date: 6/1/2024"));
    }

    #[test]
    fn done_cards_have_no_controls() {
        let mut app = app_with(ViewMode::Board);
        let id = app.board.add_task("Finished", None, None, None);
        app.board.update_status(id, Status::Done);
        let out = render_to_string(&app);
        assert!(out.contains("Finished"));
        assert!(!out.contains("Delete"));
        assert!(!out.contains("e: Edit"));
        assert!(!out.contains("Status:"));
    }

    #[test]
    fn list_view_shows_sections_and_empty_marker() {
        let mut app = app_with(ViewMode::List);
        app.board.add_task("hidden until expanded", None, None, None);
        let out = render_to_string(&app);
        for title in ["Todo", "Inprogress", "Done"] {
            assert!(out.contains(title), "missing section {title}");
        }
        assert!(!out.contains("hidden until expanded"));

        app.toggle_section(Status::Todo);
        let out = render_to_string(&app);
        assert!(out.contains("hidden until expanded"));

        app.toggle_section(Status::Done);
        let out = render_to_string(&app);
        assert!(out.contains("No tasks"));
        assert!(!out.contains("hidden until expanded"));
    }

    #[test]
    fn modal_and_edit_drafts_render_form_fields() {
        let mut app = app_with(ViewMode::Board);
        let id = app.board.add_task("Draft me", None, None, None);
        app.begin_edit(id);
        let out = render_to_string(&app);
        assert!(out.contains("Task: Draft me"));
        assert!(out.contains("enter: Save"));

        app.open_modal();
        let out = render_to_string(&app);
        assert!(out.contains("Create Task"));
        assert!(out.contains("Category: < work >"));
    }

    #[test]
    fn short_date_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        assert_eq!(short_date(date, "%-m/%-d/%Y"), "12/24/2024");
        assert_eq!(short_date(date, "%d.%m.%Y"), "24.12.2024");
        assert_eq!(short_date(date, "%Q"), "2024-12-24");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered_rect(60, 9, area);
        assert_eq!(rect, Rect::new(20, 10, 60, 9));
        let tiny = centered_rect(60, 9, Rect::new(0, 0, 10, 4));
        assert_eq!(tiny.height, 4);
    }
}
