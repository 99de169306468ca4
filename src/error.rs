//! Error types for doclift operations.

use thiserror::Error;

/// Errors that can occur while enhancing a page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("section header has no detail sibling: {0}")]
    SectionStructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
