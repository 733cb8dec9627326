mod comment;
mod error;
mod models;
mod query;
mod service;
mod traits;

pub use comment::{Comment, DATE_FORMAT};
pub use error::CommentError;
pub use models::{CommentRecord, Post, User};
pub use query::{QueryArgs, QueryConfig, TypeFilter};
pub use service::{CommentQuery, MetaMode};
pub use traits::{CommentHost, PostResolver, QueryResult, UserResolver};
