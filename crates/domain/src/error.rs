use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Invalid comment date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
