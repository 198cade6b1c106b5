use crate::config::ConfigError;
use crate::model::note::{NoteId, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of an app operation.
///
/// Every variant leaves the notes list unchanged.
#[derive(Debug)]
pub enum AppError {
    /// Root or a required role/action control is absent at startup.
    MissingElement(String),
    Config(ConfigError),
    /// Empty title or content.
    Validation(NoteValidationError),
    /// Edit/delete target is not in the notes list.
    NoteNotFound(NoteId),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(what) => write!(f, "required element missing: {what}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::MissingElement(_) | Self::NoteNotFound(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<NoteValidationError> for AppError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}
