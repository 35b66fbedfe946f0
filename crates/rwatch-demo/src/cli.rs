#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies). Supports environment
//! variable overrides via the `RWATCH_DEMO_*` prefix; explicit flags win.

use std::env;
use std::fmt;
use std::process;

use crate::logging::LogFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
rwatch demo: replay property writes through a change-reporting surrogate

USAGE:
    rwatch-demo [OPTIONS]

OPTIONS:
    --property=NAME      Property to write (default: 형규)
    --initial=VALUE      Initial value of the property (default: 솔로)
    --write=VALUE        Value to write; repeat for several writes
                         (default: 솔로, then 커플)
    --log-format=FORMAT  Log format on stderr: 'pretty' or 'json' (default: pretty)
    --help, -h           Show this help message
    --version, -V        Show version

VALUES:
    undefined, null, true, false and finite numbers are parsed as such;
    anything else is a string.

ENVIRONMENT VARIABLES:
    RWATCH_DEMO_PROPERTY    Override --property
    RWATCH_DEMO_INITIAL     Override --initial
    RWATCH_DEMO_WRITES      Comma-separated writes (overridden by --write)
    RWATCH_DEMO_LOG_FORMAT  Override --log-format
    RUST_LOG                Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Property written by the scenario.
    pub property: String,
    /// Initial value literal.
    pub initial: String,
    /// Value literals written in order.
    pub writes: Vec<String>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str("help requested"),
            Self::Version => f.write_str("version requested"),
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArg(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Default for Opts {
    fn default() -> Self {
        Self {
            property: "형규".into(),
            initial: "솔로".into(),
            writes: vec!["솔로".into(), "커플".into()],
            log_format: LogFormat::Pretty,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("rwatch-demo {VERSION}");
                process::exit(0);
            }
            Err(e @ ParseError::InvalidValue { .. }) => {
                eprintln!("{e}");
                process::exit(1);
            }
            Err(e @ ParseError::UnknownArg(_)) => {
                eprintln!("{e}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("RWATCH_DEMO_PROPERTY")
            && !val.trim().is_empty()
        {
            opts.property = val;
        }
        if let Some(val) = get_env("RWATCH_DEMO_INITIAL") {
            opts.initial = val;
        }
        if let Some(val) = get_env("RWATCH_DEMO_WRITES") {
            opts.writes = val
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(val) = get_env("RWATCH_DEMO_LOG_FORMAT")
            && let Some(format) = LogFormat::parse(&val)
        {
            opts.log_format = format;
        }

        // Parse command-line args (override env vars)
        let mut cli_writes: Option<Vec<String>> = None;
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--property=") {
                        if val.is_empty() {
                            return Err(ParseError::InvalidValue {
                                flag: "--property",
                                value: val.to_string(),
                            });
                        }
                        opts.property = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--initial=") {
                        opts.initial = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--write=") {
                        cli_writes
                            .get_or_insert_with(Vec::new)
                            .push(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--log-format=") {
                        match LogFormat::parse(val) {
                            Some(format) => opts.log_format = format,
                            None => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--log-format",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }
        if let Some(writes) = cli_writes {
            opts.writes = writes;
        }

        Ok(opts)
    }
}
