use config::ConfigError;
use domain::QueryConfig;
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "COMMENTS_";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars(std::env::vars());

        let s = config::Config::builder()
            .set_default("database.url", "sqlite://data/comments.db")?
            .set_default("query.admin_url", "http://localhost/wp-admin")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map).map_err(|e| ConfigError::Foreign(Box::new(e)))?,
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

/// `COMMENTS_QUERY__TYPE_FILTER=note` becomes `query.type_filter = "note"`.
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
