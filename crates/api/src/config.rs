//! Startup configuration, read once from the environment.

use std::net::SocketAddr;

use storefront_observability::LogFormat;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Which [`Renderer`](crate::app::render::Renderer) answers requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RendererKind {
    Html,
    Json,
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `STOREFRONT_BIND`
    pub bind_addr: SocketAddr,
    /// `STOREFRONT_RENDERER`: `html` | `json`
    pub renderer: RendererKind,
    /// `STOREFRONT_SEED_DEMO`: fill the in-memory store with the demo catalog.
    pub seed_demo: bool,
    /// `USE_PERSISTENT_STORES`: read from Postgres instead of memory.
    pub use_persistent_stores: bool,
    /// `DATABASE_URL`
    pub database_url: Option<String>,
    /// `STOREFRONT_LOG_FORMAT`: `json` | `pretty`
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            renderer: RendererKind::Html,
            seed_demo: true,
            use_persistent_stores: false,
            database_url: None,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = match lookup("STOREFRONT_BIND") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid STOREFRONT_BIND; using {DEFAULT_BIND}");
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let renderer = match lookup("STOREFRONT_RENDERER").as_deref().map(str::to_ascii_lowercase) {
            Some(ref v) if v == "json" => RendererKind::Json,
            Some(ref v) if v == "html" => RendererKind::Html,
            Some(other) => {
                tracing::warn!(value = %other, "unknown STOREFRONT_RENDERER; using html");
                RendererKind::Html
            }
            None => defaults.renderer,
        };

        let log_format = match lookup("STOREFRONT_LOG_FORMAT") {
            Some(raw) => LogFormat::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown STOREFRONT_LOG_FORMAT; using json");
                defaults.log_format
            }),
            None => defaults.log_format,
        };

        Self {
            bind_addr,
            renderer,
            seed_demo: parse_bool(&lookup, "STOREFRONT_SEED_DEMO", defaults.seed_demo),
            use_persistent_stores: parse_bool(
                &lookup,
                "USE_PERSISTENT_STORES",
                defaults.use_persistent_stores,
            ),
            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            log_format,
        }
    }
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match lookup(key) {
        Some(raw) => raw.trim().parse::<bool>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "expected true/false; using {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    fn config(pairs: &[(&str, &str)]) -> StorefrontConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let c = config(&[]);
        assert_eq!(c.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(c.renderer, RendererKind::Html);
        assert!(c.seed_demo);
        assert!(!c.use_persistent_stores);
        assert!(c.database_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[
            ("STOREFRONT_BIND", "127.0.0.1:9000"),
            ("STOREFRONT_RENDERER", "JSON"),
            ("STOREFRONT_SEED_DEMO", "false"),
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("STOREFRONT_LOG_FORMAT", "pretty"),
        ]);
        assert_eq!(c.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(c.renderer, RendererKind::Json);
        assert!(!c.seed_demo);
        assert!(c.use_persistent_stores);
        assert_eq!(c.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(c.log_format, LogFormat::Pretty);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let c = config(&[
            ("STOREFRONT_BIND", "nowhere"),
            ("STOREFRONT_RENDERER", "xml"),
            ("STOREFRONT_SEED_DEMO", "yes please"),
        ]);
        assert_eq!(c.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(c.renderer, RendererKind::Html);
        assert!(c.seed_demo);
    }

    #[test]
    #[traced_test]
    fn unknown_log_format_warns_and_keeps_json() {
        let c = config(&[("STOREFRONT_LOG_FORMAT", "colourful")]);
        assert_eq!(c.log_format, LogFormat::Json);
        assert!(logs_contain("unknown STOREFRONT_LOG_FORMAT"));
    }
}
