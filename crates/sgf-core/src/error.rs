//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SgfError {
    #[error("Format error in {ident}[{value}]: {reason}")]
    Format {
        ident: String,
        value: String,
        reason: &'static str,
    },

    #[error("Structure error: {0}")]
    Structure(&'static str),
}

impl SgfError {
    pub(crate) fn format(ident: &str, value: &str, reason: &'static str) -> Self {
        SgfError::Format {
            ident: ident.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}
