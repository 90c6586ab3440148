#![forbid(unsafe_code)]

//! Command-line argument parsing for the checkout demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `TELFIELD_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = r#"Telfield Checkout Demo — phone field validation end to end

USAGE:
    telfield-demo-checkout [OPTIONS]

OPTIONS:
    --country=CODE       Built-in country rule: 'lt' (default) or 'ro'
    --rules=FILE         Load the country rule from a TOML file instead
    --tick-ms=N          Redraw tick in milliseconds (default: 250)
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --log-file=FILE      Write structured logs to FILE (stdout is the UI)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab             Switch between the name and phone fields
    Enter           Submit the form through the server-side guard
    Left/Right      Move the caret inside the phone field
    Home/End        Jump to the ends of the phone field
    Esc / Ctrl+C    Quit

RULE FILES:
    A rule file is a TOML rendition of a country rule:

        name = "Lithuania"
        flag = "🇱🇹"
        prefix = "+370"
        pattern = '^\+370[6]\d{7}$'
        significant_digit = "6"
        min_significant = 12
        max_length = 12

        [rewrite]
        strip = "8"
        before = "6"

        [messages]
        wrong_prefix = "..."
        invalid_format = "..."
        enter_valid = "..."

ENVIRONMENT VARIABLES:
    TELFIELD_DEMO_COUNTRY         Override --country (lt|ro)
    TELFIELD_DEMO_RULES           Override --rules
    TELFIELD_DEMO_TICK_MS         Override --tick-ms
    TELFIELD_DEMO_EXIT_AFTER_MS   Override --exit-after-ms
    TELFIELD_DEMO_LOG_FILE        Override --log-file"#;

/// Parsed command-line options.
pub struct Opts {
    /// Built-in country code ("lt" or "ro").
    pub country: String,
    /// Path to a TOML rule file, overriding `country`.
    pub rules_file: Option<String>,
    /// Redraw tick in milliseconds.
    pub tick_ms: u64,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Log file path (logging disabled when unset).
    pub log_file: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            country: "lt".into(),
            rules_file: None,
            tick_ms: 250,
            exit_after_ms: 0,
            log_file: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Ok(val) = env::var("TELFIELD_DEMO_COUNTRY") {
            opts.country = val;
        }
        if let Ok(val) = env::var("TELFIELD_DEMO_RULES") {
            opts.rules_file = Some(val);
        }
        if let Ok(val) = env::var("TELFIELD_DEMO_TICK_MS")
            && let Ok(n) = val.parse()
        {
            opts.tick_ms = n;
        }
        if let Ok(val) = env::var("TELFIELD_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Ok(val) = env::var("TELFIELD_DEMO_LOG_FILE") {
            opts.log_file = Some(val);
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = env::args().skip(1).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("telfield-demo-checkout {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--country=") {
                        opts.country = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--rules=") {
                        opts.rules_file = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--tick-ms=") {
                        match val.parse() {
                            Ok(n) => opts.tick_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --tick-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --exit-after-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(val.to_string());
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
            i += 1;
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.country, "lt");
        assert!(opts.rules_file.is_none());
        assert_eq!(opts.tick_ms, 250);
        assert_eq!(opts.exit_after_ms, 0);
        assert!(opts.log_file.is_none());
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_documents_rule_files() {
        assert!(HELP_TEXT.contains("--rules=FILE"));
        assert!(HELP_TEXT.contains("[messages]"));
        assert!(HELP_TEXT.contains("significant_digit"));
    }

    #[test]
    fn help_text_contains_env_vars() {
        assert!(HELP_TEXT.contains("TELFIELD_DEMO_COUNTRY"));
        assert!(HELP_TEXT.contains("TELFIELD_DEMO_EXIT_AFTER_MS"));
    }
}
