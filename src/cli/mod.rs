// CLI module
// Terminal host for the completion core

pub mod tui;

pub use tui::run_compose;
