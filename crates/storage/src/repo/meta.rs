use crate::Db;
use serde_json::Value;
use sqlx::Row;

impl Db {
    pub async fn add_comment_meta(
        &self,
        comment_id: u64,
        key: &str,
        value: &str,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            "INSERT INTO commentmeta (comment_id, meta_key, meta_value) VALUES (?, ?, ?)",
        )
        .bind(comment_id as i64)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid() as u64)
    }

    pub async fn get_comment_meta(
        &self,
        comment_id: u64,
        key: &str,
        single: bool,
    ) -> anyhow::Result<Value> {
        let rows = sqlx::query(
            "SELECT meta_value FROM commentmeta WHERE comment_id = ? AND meta_key = ? ORDER BY meta_id",
        )
        .bind(comment_id as i64)
        .bind(key)
        .fetch_all(&self.pool)
        .await?;

        let mut values = rows.into_iter().map(|r| {
            let raw: Option<String> = r.get(0);
            Value::from(raw.unwrap_or_default())
        });

        if single {
            Ok(values.next().unwrap_or_else(|| Value::from("")))
        } else {
            Ok(Value::Array(values.collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::memory_db;
    use serde_json::json;

    #[tokio::test]
    async fn single_and_multi_values() {
        let db = memory_db().await;
        db.add_comment_meta(1, "rating", "5").await.unwrap();
        db.add_comment_meta(1, "rating", "3").await.unwrap();
        db.add_comment_meta(2, "rating", "1").await.unwrap();

        assert_eq!(db.get_comment_meta(1, "rating", true).await.unwrap(), json!("5"));
        assert_eq!(
            db.get_comment_meta(1, "rating", false).await.unwrap(),
            json!(["5", "3"])
        );
        assert_eq!(db.get_comment_meta(1, "missing", true).await.unwrap(), json!(""));
        assert_eq!(db.get_comment_meta(1, "missing", false).await.unwrap(), json!([]));
    }
}
