use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu is chatty at info level; keep it to warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. `"debug"`,
/// `"daylight_clock=trace,wgpu=warn"`) and takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    /// Resolves the effective filter: explicit, then `RUST_LOG`, then
    /// [`DEFAULT_FILTER`].
    fn resolve_filter(&self, rust_log: Option<String>) -> String {
        let non_blank = |f: &String| !f.trim().is_empty();
        self.env_filter
            .clone()
            .filter(non_blank)
            .or(rust_log.filter(non_blank))
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.format_timestamp_millis();

        if let Err(e) = builder.try_init() {
            // Another logger (e.g. a test harness) got there first.
            eprintln!("logger already installed: {e}");
            return;
        }

        log::debug!("logging initialized with filter '{filter}'");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let c = LoggingConfig::with_filter("debug");
        assert_eq!(c.resolve_filter(Some("warn".into())), "debug");
    }

    #[test]
    fn rust_log_used_when_no_explicit_filter() {
        let c = LoggingConfig::default();
        assert_eq!(c.resolve_filter(Some("warn".into())), "warn");
    }

    #[test]
    fn default_when_nothing_set() {
        let c = LoggingConfig::default();
        assert_eq!(c.resolve_filter(None), DEFAULT_FILTER);
        assert_eq!(LoggingConfig::with_filter("  ").resolve_filter(None), DEFAULT_FILTER);
    }

    #[test]
    fn blank_explicit_filter_falls_back_to_rust_log() {
        let c = LoggingConfig::with_filter("  ");
        assert_eq!(c.resolve_filter(Some("daylight_clock=trace".into())), "daylight_clock=trace");
        assert_eq!(c.resolve_filter(Some("\t".into())), DEFAULT_FILTER);
    }
}
