use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A comment row as the host store hands it out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentRecord {
    pub comment_id: u64,
    pub comment_post_id: u64,
    pub comment_author: String,
    pub comment_author_email: String,
    pub comment_author_url: String,
    pub comment_author_ip: String,
    pub comment_date: String,
    pub comment_date_gmt: String,
    pub comment_content: String,
    pub comment_karma: i64,
    // 宿主编码: 1 / 0 为整数, "spam" / "trash" 为字符串
    pub comment_approved: Value,
    pub comment_agent: String,
    pub comment_type: String,
    pub comment_parent: u64,
    pub user_id: u64,
}

impl CommentRecord {
    /// Field-array conversion, keyed the way the host names its columns.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("comment_ID".into(), self.comment_id.into());
        fields.insert("comment_post_ID".into(), self.comment_post_id.into());
        fields.insert("comment_author".into(), self.comment_author.clone().into());
        fields.insert(
            "comment_author_email".into(),
            self.comment_author_email.clone().into(),
        );
        fields.insert(
            "comment_author_url".into(),
            self.comment_author_url.clone().into(),
        );
        fields.insert(
            "comment_author_IP".into(),
            self.comment_author_ip.clone().into(),
        );
        fields.insert("comment_date".into(), self.comment_date.clone().into());
        fields.insert(
            "comment_date_gmt".into(),
            self.comment_date_gmt.clone().into(),
        );
        fields.insert("comment_content".into(), self.comment_content.clone().into());
        fields.insert("comment_karma".into(), self.comment_karma.into());
        fields.insert("comment_approved".into(), self.comment_approved.clone());
        fields.insert("comment_agent".into(), self.comment_agent.clone().into());
        fields.insert("comment_type".into(), self.comment_type.clone().into());
        fields.insert("comment_parent".into(), self.comment_parent.into());
        fields.insert("user_id".into(), self.user_id.into());
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub display_name: String,
    pub email: String,
}
