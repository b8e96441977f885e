use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/tasks";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Board settings. The CSR bundle has no runtime environment, so values
/// are baked in at build time (`KANBAN_API_URL`, `KANBAN_LOG_LEVEL`).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Collection URL of the task resource, without a trailing slash.
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl BoardConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("KANBAN_API_URL"), option_env!("KANBAN_LOG_LEVEL"))
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        let log_level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self { api_url, log_level }
    }
}
