use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SortError {
    #[error("Invalid sort field: {0}")]
    InvalidField(String),

    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),
}
