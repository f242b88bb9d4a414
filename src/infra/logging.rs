// ============================================================
// Tracing Setup
// ============================================================
// Installs a fmt subscriber filtered by RUST_LOG plus a default
// directive, e.g. "hybrid_classifier=info".

use anyhow::{anyhow, Result};
use tracing_subscriber::{filter::Directive, EnvFilter};

pub const DEFAULT_DIRECTIVE: &str = "hybrid_classifier=info";

/// Install the global subscriber. Fails if one is already set
/// or the directive does not parse.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(default_directive.parse::<Directive>()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("cannot install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_directive_is_an_error() {
        assert!(init_tracing("hybrid_classifier=loud").is_err());
    }

    #[test]
    fn test_second_install_fails() {
        // Whichever test installs first wins; the next attempt must fail.
        let _ = init_tracing(DEFAULT_DIRECTIVE);
        assert!(init_tracing(DEFAULT_DIRECTIVE).is_err());
    }
}
