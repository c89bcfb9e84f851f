use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();
const DEFAULT_DIRECTIVE: &str = "sobra_core=info";

/// `RUST_LOG` when set and valid, otherwise info-level logs for this crate.
fn default_filter(from_env: Option<EnvFilter>) -> EnvFilter {
    from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber, writing to stderr so command output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::fmt;

        let filter = default_filter(EnvFilter::try_from_default_env().ok());

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_are_kept_as_given() {
        let filter = default_filter(Some(EnvFilter::new("sobra_core=debug")));
        assert_eq!(filter.to_string(), "sobra_core=debug");
    }

    #[test]
    fn missing_env_defaults_to_info() {
        assert_eq!(default_filter(None).to_string(), DEFAULT_DIRECTIVE);
    }
}
