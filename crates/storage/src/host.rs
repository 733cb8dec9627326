use anyhow::{anyhow, Result};
use async_trait::async_trait;
use domain::{
    CommentHost, CommentRecord, Post, PostResolver, QueryArgs, QueryResult, User, UserResolver,
};
use serde_json::Value;

use crate::Db;

#[async_trait]
impl CommentHost for Db {
    async fn get_comment(&self, comment_id: u64) -> Result<Option<CommentRecord>> {
        Db::get_comment(self, comment_id).await
    }

    async fn query_comments(&self, args: &QueryArgs) -> Result<QueryResult> {
        Db::query_comments(self, args).await
    }

    async fn get_comment_meta(&self, comment_id: u64, key: &str, single: bool) -> Result<Value> {
        Db::get_comment_meta(self, comment_id, key, single).await
    }
}

#[async_trait]
impl PostResolver for Db {
    async fn post_by_id(&self, post_id: u64) -> Result<Post> {
        self.get_post(post_id)
            .await?
            .ok_or_else(|| anyhow!("Post not found: {}", post_id))
    }
}

#[async_trait]
impl UserResolver for Db {
    async fn user_by_id(&self, user_id: u64) -> Result<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| anyhow!("User not found: {}", user_id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{comment, memory_db};
    use domain::{CommentQuery, QueryArgs, QueryConfig};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn comment_query_over_sqlite() {
        let db = memory_db().await;
        let post_id = db.insert_post("Hello", "hello", "publish").await.unwrap();
        let user_id = db.insert_user("ada", "Ada L.", "ada@example.org").await.unwrap();

        let mut root = comment(post_id, "Ada", "2024-05-01 08:00:00");
        root.user_id = user_id;
        let root_id = db.insert_comment(&root).await.unwrap();

        let mut reply = comment(post_id, "Grace", "2024-05-01 09:00:00");
        reply.comment_parent = root_id;
        reply.comment_type = "note".into();
        let reply_id = db.insert_comment(&reply).await.unwrap();
        db.add_comment_meta(reply_id, "mood", "happy").await.unwrap();

        let db = Arc::new(db);
        let query = CommentQuery::new(
            db.clone(),
            db.clone(),
            db.clone(),
            QueryConfig::default().with_type("note"),
        );

        let notes = query.fetch_from_args(QueryArgs::new()).await.unwrap();
        assert_eq!(notes.len(), 1);
        let note = &notes[0];
        assert_eq!(note.id(), reply_id);
        assert!(note.is_approved());

        let parent = query.parent_of(note).await.unwrap().unwrap();
        assert_eq!(parent.id(), root_id);
        assert!(query.parent_of(&parent).await.unwrap().is_none());

        assert_eq!(query.post_of(note).await.unwrap().slug, "hello");
        assert_eq!(query.user_of(&parent).await.unwrap().display_name, "Ada L.");
        assert!(query.user_of(note).await.is_err());

        assert_eq!(
            query.meta_single(note, "mood", json!(null)).await.unwrap(),
            json!("happy")
        );
        assert_eq!(
            query.meta_single(note, "colour", json!("none")).await.unwrap(),
            json!("none")
        );

        // 类型过滤同样作用于按 ID 查询
        assert!(query.fetch_from_ids(&[root_id]).await.unwrap().is_empty());
        assert!(query.create_from_id(9999).await.unwrap().is_none());
    }
}
