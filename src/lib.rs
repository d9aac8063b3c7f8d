// Ghostline - inline text completion overlay
// Library exports

pub mod cli;
pub mod compose;
pub mod config;
pub mod errors;
pub mod logging;
pub mod service;

pub use errors::CompletionError;
