use domain::{CommentRecord, Post, User};
use serde_json::Value;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub comment_id: i64,
    pub comment_post_id: i64,
    pub comment_author: String,
    pub comment_author_email: String,
    pub comment_author_url: String,
    pub comment_author_ip: String,
    pub comment_date: String,
    pub comment_date_gmt: String,
    pub comment_content: String,
    pub comment_karma: i64,
    pub comment_approved: String,
    pub comment_agent: String,
    pub comment_type: String,
    pub comment_parent: i64,
    pub user_id: i64,
}

impl From<SqlComment> for CommentRecord {
    fn from(sql: SqlComment) -> Self {
        CommentRecord {
            comment_id: to_id(sql.comment_id),
            comment_post_id: to_id(sql.comment_post_id),
            comment_author: sql.comment_author,
            comment_author_email: sql.comment_author_email,
            comment_author_url: sql.comment_author_url,
            comment_author_ip: sql.comment_author_ip,
            comment_date: sql.comment_date,
            comment_date_gmt: sql.comment_date_gmt,
            comment_content: sql.comment_content,
            comment_karma: sql.comment_karma,
            comment_approved: approval_value(&sql.comment_approved),
            comment_agent: sql.comment_agent,
            comment_type: sql.comment_type,
            comment_parent: to_id(sql.comment_parent),
            user_id: to_id(sql.user_id),
        }
    }
}

#[derive(FromRow)]
pub struct SqlPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub status: String,
}

impl From<SqlPost> for Post {
    fn from(sql: SqlPost) -> Self {
        Post {
            id: to_id(sql.id),
            title: sql.title,
            slug: sql.slug,
            status: sql.status,
        }
    }
}

#[derive(FromRow)]
pub struct SqlUser {
    pub id: i64,
    pub login: String,
    pub display_name: String,
    pub email: String,
}

impl From<SqlUser> for User {
    fn from(sql: SqlUser) -> Self {
        User {
            id: to_id(sql.id),
            login: sql.login,
            display_name: sql.display_name,
            email: sql.email,
        }
    }
}

fn to_id(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

/// 数字状态 ('1' / '0') 以整数暴露，其余 ('spam', 'trash') 保持字符串
pub fn approval_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}

pub fn approval_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approval_encoding() {
        assert_eq!(approval_value("1"), json!(1));
        assert_eq!(approval_value("0"), json!(0));
        assert_eq!(approval_value("spam"), json!("spam"));

        assert_eq!(approval_text(&json!(1)), "1");
        assert_eq!(approval_text(&json!("trash")), "trash");
        assert_eq!(approval_text(&json!(false)), "0");
    }
}
