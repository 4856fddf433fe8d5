use vv_core::config::DEFAULT_API_URL;
use vv_core::AppConfig;

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "API_URL";

/// Pick the backend base URL: environment override, then the configured
/// value, then the local development server. Blank values are skipped and a
/// trailing slash is dropped.
pub fn resolve_base_url(env_override: Option<&str>, configured: Option<&str>) -> String {
    let chosen = [env_override, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL);
    chosen.trim_end_matches('/').to_string()
}

/// [`resolve_base_url`] against the process environment, after loading a
/// `.env` file if one is present.
pub fn resolve_base_url_from_env(config: &AppConfig) -> String {
    let _ = dotenvy::dotenv();
    let env_value = std::env::var(API_URL_ENV).ok();
    let resolved = resolve_base_url(env_value.as_deref(), config.api_url.as_deref());
    tracing::debug!(
        base_url = %resolved,
        from_env = env_value.as_deref().is_some_and(|v| !v.trim().is_empty()),
        "resolved backend base url"
    );
    resolved
}
