use crate::{models::SqlPost, Db};
use domain::Post;

impl Db {
    pub async fn insert_post(&self, title: &str, slug: &str, status: &str) -> anyhow::Result<u64> {
        let result = sqlx::query("INSERT INTO posts (title, slug, status) VALUES (?, ?, ?)")
            .bind(title)
            .bind(slug)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid() as u64)
    }

    pub async fn get_post(&self, post_id: u64) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query_as::<_, SqlPost>(
            "SELECT id, title, slug, status FROM posts WHERE id = ?",
        )
        .bind(post_id as i64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
