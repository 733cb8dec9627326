use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::comment::Comment;
use crate::models::{Post, User};
use crate::query::{QueryArgs, QueryConfig};
use crate::traits::{CommentHost, PostResolver, UserResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaMode {
    Single,
    Multi,
}

/// Entry point for fetching comments from a host store.
#[derive(Clone)]
pub struct CommentQuery {
    host: Arc<dyn CommentHost>,
    posts: Arc<dyn PostResolver>,
    users: Arc<dyn UserResolver>,
    config: QueryConfig,
}

impl CommentQuery {
    pub fn new(
        host: Arc<dyn CommentHost>,
        posts: Arc<dyn PostResolver>,
        users: Arc<dyn UserResolver>,
        config: QueryConfig,
    ) -> Self {
        Self {
            host,
            posts,
            users,
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn parse_query_args(&self, args: QueryArgs) -> QueryArgs {
        self.config.parse_query_args(args)
    }

    pub async fn create_from_id(&self, comment_id: u64) -> Result<Option<Comment>> {
        let record = self.host.get_comment(comment_id).await?;
        Ok(record.map(Comment::from))
    }

    pub async fn fetch_from_args(&self, args: QueryArgs) -> Result<Vec<Comment>> {
        let args = self.parse_query_args(args);
        let shown = Value::Object(args.clone());
        debug!("Fetching comments with args: {}", shown);

        let result = self.host.query_comments(&args).await?;
        Ok(Comment::from_query(result))
    }

    pub async fn fetch_from_ids(&self, ids: &[u64]) -> Result<Vec<Comment>> {
        let mut args = QueryArgs::new();
        args.insert("comment__in".to_string(), Value::from(ids.to_vec()));
        self.fetch_from_args(args).await
    }

    /// `None` when the comment has no parent or the parent is gone.
    pub async fn parent_of(&self, comment: &Comment) -> Result<Option<Comment>> {
        self.create_from_id(comment.parent_id()).await
    }

    pub async fn post_of(&self, comment: &Comment) -> Result<Post> {
        self.posts.post_by_id(comment.post_id()).await
    }

    pub async fn user_of(&self, comment: &Comment) -> Result<User> {
        self.users.user_by_id(comment.user_id()).await
    }

    /// Looks up a metadata value, falling back to `default` when the store
    /// returns nothing (or only an empty/false value).
    pub async fn meta(
        &self,
        comment: &Comment,
        key: &str,
        mode: MetaMode,
        default: Value,
    ) -> Result<Value> {
        let value = self
            .host
            .get_comment_meta(comment.id(), key, mode == MetaMode::Single)
            .await?;

        Ok(if is_empty_value(&value) { default } else { value })
    }

    pub async fn meta_single(&self, comment: &Comment, key: &str, default: Value) -> Result<Value> {
        self.meta(comment, key, MetaMode::Single, default).await
    }

    pub async fn meta_multi(&self, comment: &Comment, key: &str, default: Value) -> Result<Value> {
        self.meta(comment, key, MetaMode::Multi, default).await
    }

    pub fn edit_url_of(&self, comment: &Comment) -> String {
        comment.edit_url(&self.config.admin_url)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
