use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title is too long: {len} characters, at most {max} allowed")]
    TitleTooLong { len: usize, max: usize },
    #[error("description must be between 1 and {max} characters, got {len}")]
    DescriptionLength { len: usize, max: usize },
    #[error("priority must be between {min} and {max}, got {value}")]
    PriorityOutOfRange { value: u8, min: u8, max: u8 },
    #[error("invalid todo id: {0:?}")]
    InvalidId(String),
    #[error("invalid request body: {0}")]
    MalformedBody(String),
}
