use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CommentError;
use crate::models::CommentRecord;
use crate::traits::QueryResult;

/// Storage format of `comment_date` / `comment_date_gmt`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read-only view over one host comment record.
///
/// The fields are copied at construction time; later changes to the host row
/// are not seen by an existing `Comment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Comment {
    fields: Map<String, Value>,
    #[serde(skip)]
    record: Option<CommentRecord>,
}

impl Comment {
    pub fn new(record: Option<CommentRecord>) -> Self {
        match record {
            Some(record) => Self {
                fields: record.to_fields(),
                record: Some(record),
            },
            None => Self::default(),
        }
    }

    /// Builds a comment from a raw field map, e.g. one the host handed out as
    /// loosely typed JSON. There is no backing record.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            record: None,
        }
    }

    /// Wraps every record of an executed host query.
    pub fn from_query(result: QueryResult) -> Vec<Comment> {
        result
            .comments
            .into_iter()
            .map(|record| Comment::new(Some(record)))
            .collect()
    }

    pub fn record(&self) -> Option<&CommentRecord> {
        self.record.as_ref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn agent(&self) -> String {
        self.string("comment_agent")
    }

    pub fn author(&self) -> String {
        self.string("comment_author")
    }

    pub fn author_email(&self) -> String {
        self.string("comment_author_email")
    }

    pub fn author_ip(&self) -> String {
        self.string("comment_author_IP")
    }

    pub fn author_url(&self) -> String {
        self.string("comment_author_url")
    }

    pub fn content(&self) -> String {
        self.string("comment_content")
    }

    /// Raw creation date, local or UTC.
    pub fn date(&self, gmt: bool) -> String {
        if gmt {
            self.string("comment_date_gmt")
        } else {
            self.string("comment_date")
        }
    }

    pub fn date_time(&self, gmt: bool) -> Result<NaiveDateTime, CommentError> {
        let value = self.date(gmt);
        NaiveDateTime::parse_from_str(&value, DATE_FORMAT)
            .map_err(|source| CommentError::InvalidDate { value, source })
    }

    pub fn edit_url(&self, admin_url: &str) -> String {
        format!(
            "{}/comment.php?action=editcomment&c={}",
            admin_url.trim_end_matches('/'),
            self.id()
        )
    }

    pub fn id(&self) -> u64 {
        self.integer("comment_ID")
    }

    pub fn parent_id(&self) -> u64 {
        self.integer("comment_parent")
    }

    pub fn post_id(&self) -> u64 {
        self.integer("comment_post_ID")
    }

    pub fn user_id(&self) -> u64 {
        self.integer("user_id")
    }

    pub fn comment_type(&self) -> String {
        self.string("comment_type")
    }

    /// Only the integer `1` counts; `"1"`, `true` or `1.0` do not.
    pub fn is_approved(&self) -> bool {
        matches!(
            self.fields.get("comment_approved"),
            Some(Value::Number(n)) if n.as_i64() == Some(1)
        )
    }

    pub fn is_spam(&self) -> bool {
        matches!(self.fields.get("comment_approved"), Some(Value::String(s)) if s == "spam")
    }

    pub fn type_in<S: AsRef<str>>(&self, types: &[S]) -> bool {
        let own = self.comment_type();
        types.iter().any(|t| t.as_ref() == own)
    }

    fn string(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn integer(&self, key: &str) -> u64 {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(true)) => 1,
            _ => 0,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Comment::new(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> CommentRecord {
        CommentRecord {
            comment_id: 42,
            comment_post_id: 7,
            comment_author: "Ada".into(),
            comment_author_email: "ada@example.org".into(),
            comment_author_url: "https://ada.example.org".into(),
            comment_author_ip: "192.0.2.10".into(),
            comment_date: "2024-03-01 10:15:00".into(),
            comment_date_gmt: "2024-03-01 09:15:00".into(),
            comment_content: "First!".into(),
            comment_karma: 0,
            comment_approved: json!(1),
            comment_agent: "Mozilla/5.0".into(),
            comment_type: "comment".into(),
            comment_parent: 3,
            user_id: 11,
        }
    }

    fn with_approved(value: Value) -> Comment {
        let mut r = record();
        r.comment_approved = value;
        Comment::new(Some(r))
    }

    #[test]
    fn accessors_read_back_the_record() {
        let c = Comment::new(Some(record()));

        assert_eq!(c.id(), 42);
        assert_eq!(c.post_id(), 7);
        assert_eq!(c.parent_id(), 3);
        assert_eq!(c.user_id(), 11);
        assert_eq!(c.author(), "Ada");
        assert_eq!(c.author_email(), "ada@example.org");
        assert_eq!(c.author_url(), "https://ada.example.org");
        assert_eq!(c.author_ip(), "192.0.2.10");
        assert_eq!(c.agent(), "Mozilla/5.0");
        assert_eq!(c.content(), "First!");
        assert_eq!(c.comment_type(), "comment");
        assert_eq!(c.date(false), "2024-03-01 10:15:00");
        assert_eq!(c.date(true), "2024-03-01 09:15:00");
        assert_eq!(c.record(), Some(&record()));
        assert_eq!(c.fields().len(), 15);
    }

    #[test]
    fn empty_comment_uses_defaults() {
        let c = Comment::new(None);

        assert!(c.record().is_none());
        assert!(c.fields().is_empty());
        assert_eq!(c.id(), 0);
        assert_eq!(c.parent_id(), 0);
        assert_eq!(c.post_id(), 0);
        assert_eq!(c.user_id(), 0);
        assert_eq!(c.author(), "");
        assert_eq!(c.content(), "");
        assert_eq!(c.comment_type(), "");
        assert_eq!(c.date(true), "");
        assert!(!c.is_approved());
        assert!(!c.is_spam());
    }

    #[test]
    fn raw_fields_are_coerced() {
        let c = Comment::from_fields(match json!({
            "comment_ID": "17",
            "comment_parent": " 4 ",
            "comment_post_ID": 9.0,
            "user_id": "not a number",
            "comment_author": 12,
            "comment_content": null,
            "comment_approved": "1",
        }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        });

        assert!(c.record().is_none());
        assert_eq!(c.id(), 17);
        assert_eq!(c.parent_id(), 4);
        assert_eq!(c.post_id(), 9);
        assert_eq!(c.user_id(), 0);
        assert_eq!(c.author(), "12");
        assert_eq!(c.content(), "");
        assert!(!c.is_approved());
    }

    #[test]
    fn snapshot_keeps_host_column_order() {
        let c = Comment::new(Some(record()));
        let keys: Vec<&str> = c.fields().keys().map(String::as_str).collect();

        assert_eq!(keys.first(), Some(&"comment_ID"));
        assert_eq!(keys[1], "comment_post_ID");
        assert_eq!(keys.last(), Some(&"user_id"));
    }

    #[test]
    fn parses_date_time() {
        let c = Comment::new(Some(record()));

        let local = c.date_time(false).unwrap();
        let gmt = c.date_time(true).unwrap();

        assert_eq!(local.to_string(), "2024-03-01 10:15:00");
        assert_eq!((local - gmt).num_hours(), 1);
        assert!(matches!(
            Comment::new(None).date_time(false),
            Err(CommentError::InvalidDate { .. })
        ));
    }

    #[test]
    fn approved_requires_integer_one() {
        assert!(with_approved(json!(1)).is_approved());

        assert!(!with_approved(json!("1")).is_approved());
        assert!(!with_approved(json!(true)).is_approved());
        assert!(!with_approved(json!(1.0)).is_approved());
        assert!(!with_approved(json!(0)).is_approved());
        assert!(!with_approved(json!("approved")).is_approved());
    }

    #[test]
    fn spam_requires_literal_string() {
        assert!(with_approved(json!("spam")).is_spam());

        assert!(!with_approved(json!("SPAM")).is_spam());
        assert!(!with_approved(json!("trash")).is_spam());
        assert!(!with_approved(json!(1)).is_spam());
    }

    #[test]
    fn type_in_is_exact_and_case_sensitive() {
        let c = Comment::new(Some(record()));

        assert!(c.type_in(&["pingback", "comment"]));
        assert!(!c.type_in(&["Comment", "COMMENT"]));
        assert!(!c.type_in(&["comment "]));
        assert!(!c.type_in::<&str>(&[]));
    }

    #[test]
    fn from_empty_query_is_empty() {
        assert!(Comment::from_query(QueryResult::default()).is_empty());

        let wrapped = Comment::from_query(QueryResult {
            comments: vec![record(), record()],
            found: 2,
        });
        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.iter().all(|c| c.id() == 42));
    }

    #[test]
    fn edit_url_points_at_admin_screen() {
        let c = Comment::new(Some(record()));

        assert_eq!(
            c.edit_url("https://blog.example.org/wp-admin/"),
            "https://blog.example.org/wp-admin/comment.php?action=editcomment&c=42"
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let c = Comment::new(Some(record()));
        let v = serde_json::to_value(&c).unwrap();

        assert_eq!(v["comment_ID"], json!(42));
        assert_eq!(v["comment_author_IP"], json!("192.0.2.10"));
    }
}
