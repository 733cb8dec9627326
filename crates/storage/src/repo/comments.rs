use crate::{
    models::{approval_text, SqlComment},
    Db,
};
use domain::{CommentRecord, QueryArgs, QueryResult};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

const COMMENT_COLUMNS: &str = r#"
    comment_id, comment_post_id, comment_author, comment_author_email,
    comment_author_url, comment_author_ip, comment_date, comment_date_gmt,
    comment_content, comment_karma, comment_approved, comment_agent,
    comment_type, comment_parent, user_id
"#;

const KNOWN_ARGS: &[&str] = &[
    "comment__in",
    "comment__not_in",
    "post_id",
    "parent",
    "user_id",
    "author_email",
    "type",
    "status",
    "search",
    "orderby",
    "order",
    "number",
    "offset",
];

impl Db {
    pub async fn insert_comment(&self, c: &CommentRecord) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments (
                comment_post_id, comment_author, comment_author_email,
                comment_author_url, comment_author_ip, comment_date, comment_date_gmt,
                comment_content, comment_karma, comment_approved, comment_agent,
                comment_type, comment_parent, user_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(c.comment_post_id as i64)
        .bind(&c.comment_author)
        .bind(&c.comment_author_email)
        .bind(&c.comment_author_url)
        .bind(&c.comment_author_ip)
        .bind(&c.comment_date)
        .bind(&c.comment_date_gmt)
        .bind(&c.comment_content)
        .bind(c.comment_karma)
        .bind(approval_text(&c.comment_approved))
        .bind(&c.comment_agent)
        .bind(&c.comment_type)
        .bind(c.comment_parent as i64)
        .bind(c.user_id as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid() as u64)
    }

    pub async fn get_comment(&self, comment_id: u64) -> anyhow::Result<Option<CommentRecord>> {
        let Ok(comment_id) = i64::try_from(comment_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, SqlComment>(&format!(
            "SELECT {} FROM comments WHERE comment_id = ?",
            COMMENT_COLUMNS
        ))
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Runs a list query. Unknown argument keys are ignored.
    pub async fn query_comments(&self, args: &QueryArgs) -> anyhow::Result<QueryResult> {
        for key in args.keys() {
            if !KNOWN_ARGS.contains(&key.as_str()) {
                debug!("Ignoring unsupported comment query arg '{}'", key);
            }
        }

        let mut select = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM comments WHERE 1 = 1",
            COMMENT_COLUMNS
        ));
        push_filters(&mut select, args);
        push_order(&mut select, args);

        let number = args.get("number").and_then(coerce_i64).filter(|n| *n > 0);
        if let Some(number) = number {
            select.push(" LIMIT ").push_bind(number);
            if let Some(offset) = args.get("offset").and_then(coerce_i64).filter(|o| *o > 0) {
                select.push(" OFFSET ").push_bind(offset);
            }
        }

        let rows = select
            .build_query_as::<SqlComment>()
            .fetch_all(&self.pool)
            .await?;

        let found = if number.is_some() {
            let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM comments WHERE 1 = 1");
            push_filters(&mut count, args);
            count
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool)
                .await?
        } else {
            rows.len() as i64
        };

        debug!("Comment query matched {} row(s), returning {}", found, rows.len());

        Ok(QueryResult {
            comments: rows.into_iter().map(Into::into).collect(),
            found: u64::try_from(found).unwrap_or(0),
        })
    }
}

fn push_filters(qb: &mut QueryBuilder<'static, Sqlite>, args: &QueryArgs) {
    if let Some(ids) = args.get("comment__in").map(id_list) {
        if !ids.is_empty() {
            push_in(qb, "comment_id", false, ids);
        }
    }
    if let Some(ids) = args.get("comment__not_in").map(id_list) {
        if !ids.is_empty() {
            push_in(qb, "comment_id", true, ids);
        }
    }

    if let Some(post_id) = args.get("post_id").and_then(coerce_i64).filter(|id| *id > 0) {
        qb.push(" AND comment_post_id = ").push_bind(post_id);
    }
    // parent = 0 选出顶层评论，故不能像 post_id 那样忽略 0
    if let Some(parent) = args.get("parent").filter(|v| !is_blank(v)).and_then(coerce_i64) {
        qb.push(" AND comment_parent = ").push_bind(parent);
    }
    if let Some(user_id) = args.get("user_id").filter(|v| !is_blank(v)).and_then(coerce_i64) {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(email) = args.get("author_email").and_then(Value::as_str) {
        if !email.is_empty() {
            qb.push(" AND comment_author_email = ").push_bind(email.to_string());
        }
    }

    let types = args.get("type").map(string_list).unwrap_or_default();
    if !types.is_empty() && !types.iter().any(|t| t == "all") {
        let mut expanded = Vec::new();
        for t in types {
            match t.as_str() {
                "comment" => {
                    expanded.push("comment".to_string());
                    expanded.push(String::new());
                }
                "pings" => {
                    expanded.push("pingback".to_string());
                    expanded.push("trackback".to_string());
                }
                _ => expanded.push(t),
            }
        }
        push_in(qb, "comment_type", false, expanded);
    }

    let mut statuses = args.get("status").map(string_list).unwrap_or_default();
    if statuses.is_empty() {
        statuses.push("all".to_string());
    }
    if !statuses.iter().any(|s| s == "any") {
        let mut codes = Vec::new();
        for s in statuses {
            match s.as_str() {
                "all" => {
                    codes.push("0".to_string());
                    codes.push("1".to_string());
                }
                "hold" => codes.push("0".to_string()),
                "approve" => codes.push("1".to_string()),
                _ => codes.push(s),
            }
        }
        codes.sort();
        codes.dedup();
        push_in(qb, "comment_approved", false, codes);
    }

    if let Some(search) = args.get("search").and_then(Value::as_str) {
        if !search.is_empty() {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (");
            let mut sep = qb.separated(" OR ");
            for column in [
                "comment_author",
                "comment_author_email",
                "comment_author_url",
                "comment_author_ip",
                "comment_content",
            ] {
                sep.push(format!("{} LIKE ", column));
                sep.push_bind_unseparated(pattern.clone());
                sep.push_unseparated(" ESCAPE '\\'");
            }
            qb.push(")");
        }
    }
}

fn push_order(qb: &mut QueryBuilder<'static, Sqlite>, args: &QueryArgs) {
    let column = match args.get("orderby").and_then(Value::as_str).unwrap_or("") {
        "comment_date" => "comment_date",
        "comment_ID" => "comment_id",
        "comment_post_ID" => "comment_post_id",
        "comment_parent" => "comment_parent",
        "comment_type" => "comment_type",
        "comment_karma" => "comment_karma",
        "user_id" => "user_id",
        _ => "comment_date_gmt",
    };
    let direction = match args.get("order").and_then(Value::as_str) {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    };

    qb.push(format!(" ORDER BY {} {}", column, direction));
    if column != "comment_id" {
        qb.push(format!(", comment_id {}", direction));
    }
}

fn push_in<T>(qb: &mut QueryBuilder<'static, Sqlite>, column: &str, negate: bool, values: Vec<T>)
where
    T: 'static + Send + sqlx::Encode<'static, Sqlite> + sqlx::Type<Sqlite>,
{
    qb.push(format!(
        " AND {} {} (",
        column,
        if negate { "NOT IN" } else { "IN" }
    ));
    let mut sep = qb.separated(", ");
    for value in values {
        sep.push_bind(value);
    }
    sep.push_unseparated(")");
}

/// Makes `%`, `_` and `\` match literally inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str().is_some_and(str::is_empty)
}

/// Accepts a list, a single id, or a comma separated string. Entries that are
/// not ids become 0 (which no row has) and negatives lose their sign, so bad
/// input narrows a query instead of being dropped. Blank input yields nothing.
fn id_list(value: &Value) -> Vec<i64> {
    let to_id = |v: &Value| coerce_i64(v).map_or(0, i64::abs);
    let mut ids: Vec<i64> = match value {
        Value::Null | Value::Bool(false) => Vec::new(),
        Value::Array(items) => items.iter().map(to_id).collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => s
            .split(',')
            .map(|p| p.trim().parse::<i64>().map_or(0, i64::abs))
            .collect(),
        other => vec![to_id(other)],
    };
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn string_list(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    };
    items.into_iter().filter(|s| !s.is_empty()).collect()
}
