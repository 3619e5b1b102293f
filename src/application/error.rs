use thiserror::Error;

use crate::domain::ParseMoneyError;

/// Problems with user input caught before anything reaches the store.
///
/// The store itself never rejects a call; these come from the form layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Please fill in all fields: {0} is required")]
    MissingField(&'static str),

    #[error("Invalid amount for {field}: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: ParseMoneyError,
    },

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("No {kind} with id '{id}'")]
    UnknownEntry { kind: &'static str, id: String },
}
