pub mod app;
pub mod config;
pub mod form;
pub mod input;
pub mod kanban_board;
pub mod logging;
pub mod task;
pub mod ui;
