//! Errors raised at the input surface (flags and session commands)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataRandomError {
    #[error("Unknown view mode: {0} (expected pie, bar or list)")]
    UnknownView(String),

    #[error("Invalid animation speed: {0} (expected a positive number)")]
    InvalidSpeed(String),

    #[error("Unknown session command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),
}
