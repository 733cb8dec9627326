use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::{CommentRecord, Post, User};
use crate::query::QueryArgs;

/// Outcome of one host list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub comments: Vec<CommentRecord>,
    /// Total matches ignoring `number`/`offset`.
    pub found: u64,
}

#[async_trait]
pub trait CommentHost: Send + Sync {
    async fn get_comment(&self, comment_id: u64) -> Result<Option<CommentRecord>>;

    async fn query_comments(&self, args: &QueryArgs) -> Result<QueryResult>;

    /// `single` yields the first stored value or `""`; otherwise a (possibly empty) list.
    async fn get_comment_meta(&self, comment_id: u64, key: &str, single: bool) -> Result<Value>;
}

#[async_trait]
pub trait PostResolver: Send + Sync {
    async fn post_by_id(&self, post_id: u64) -> Result<Post>;
}

#[async_trait]
pub trait UserResolver: Send + Sync {
    async fn user_by_id(&self, user_id: u64) -> Result<User>;
}
