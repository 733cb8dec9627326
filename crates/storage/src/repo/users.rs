use crate::{models::SqlUser, Db};
use domain::User;

impl Db {
    pub async fn insert_user(
        &self,
        login: &str,
        display_name: &str,
        email: &str,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (login, display_name, email)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(login)
        .bind(display_name)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid() as u64)
    }

    pub async fn get_user(&self, user_id: u64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, SqlUser>(
            "SELECT id, login, display_name, email FROM users WHERE id = ?",
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
