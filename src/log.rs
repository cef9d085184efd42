// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// Filter priority:
//
//   1. KEYANO_LOG   a bare level (`debug`) applies to both keyano crates;
//                   anything with `=`, `:` or `,` is used verbatim
//   2. RUST_LOG     standard tracing syntax
//   3. `log` in keyano.toml, same rules as KEYANO_LOG
//   4. `warn`
//
// Output goes to stderr so stdout carries only the resulting buffer.

use std::env;
use std::error::Error;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Safe to call more than once.
pub fn init(config_filter: Option<&str>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = create_filter(
        env::var("KEYANO_LOG").ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
        config_filter,
    );
    fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init()?;
    Ok(())
}

fn create_filter(keyano_log: Option<&str>, rust_log: Option<&str>, config_filter: Option<&str>) -> EnvFilter {
    if let Some(directive) = keyano_log {
        return EnvFilter::new(expand(directive));
    }
    if let Some(directive) = rust_log {
        return EnvFilter::new(directive);
    }
    config_filter.map_or_else(|| EnvFilter::new("warn"), |directive| EnvFilter::new(expand(directive)))
}

/// `debug` → `warn,keyano=debug,keyano_core=debug`. Directives pass through.
fn expand(directive: &str) -> String {
    if directive.contains(['=', ':', ',']) {
        directive.to_owned()
    } else {
        format!("warn,keyano={directive},keyano_core={directive}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_expands() {
        assert_eq!(expand("debug"), "warn,keyano=debug,keyano_core=debug");
    }

    #[test]
    fn directives_pass_through() {
        assert_eq!(expand("keyano_core::jump=trace"), "keyano_core::jump=trace");
        assert_eq!(expand("info,keyano=trace"), "info,keyano=trace");
    }

    #[test]
    fn keyano_log_beats_rust_log() {
        let filter = create_filter(Some("trace"), Some("error"), None);
        assert!(filter.to_string().contains("keyano_core=trace"));
    }

    #[test]
    fn rust_log_beats_config() {
        let filter = create_filter(None, Some("error"), Some("debug"));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn config_then_default() {
        assert!(create_filter(None, None, Some("debug")).to_string().contains("keyano=debug"));
        assert_eq!(create_filter(None, None, None).to_string(), "warn");
    }
}
