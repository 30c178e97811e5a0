//! Command-line surface: dispatch, interactive shell and text output.

/// Failure reporting.
pub mod alerts;
/// Command dispatcher.
pub mod app;
/// Shell command parsing.
pub mod commands;
/// Interactive ordering shell.
pub mod shell;
/// Text views.
pub mod views;

pub use app::App;
pub use shell::Shell;
pub use views::ViewSettings;
