//! Command-line configuration for the `clx` driver.

use std::{fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;

/// Source file read when no path is given.
pub const DEFAULT_SOURCE: &str = "main.clx";

/// What the scanner does after reporting a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop the token stream: every later scan returns `End`.
    #[default]
    Halt,
    /// Step over the offending input and keep scanning.
    Skip,
}

impl FromStr for ErrorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "halt" => Ok(ErrorMode::Halt),
            "skip" => Ok(ErrorMode::Skip),
            _ => Err(ConfigError::InvalidErrorMode {
                value: s.to_string(),
            }),
        }
    }
}

impl Display for ErrorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMode::Halt => write!(f, "halt"),
            ErrorMode::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown flag {flag:?}")]
    UnknownFlag { flag: String },
    #[error("flag {flag:?} expects a value")]
    MissingValue { flag: String },
    #[error("invalid error mode {value:?}, expected `halt` or `skip`")]
    InvalidErrorMode { value: String },
    #[error("unexpected argument {argument:?}, only one source file is accepted")]
    UnexpectedArgument { argument: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub error_mode: ErrorMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path: PathBuf::from(DEFAULT_SOURCE),
            error_mode: ErrorMode::default(),
        }
    }
}

impl Config {
    /// Parses arguments, excluding the program name.
    ///
    /// Accepts an optional source path, `--error-mode <halt|skip>` (or
    /// `--error-mode=<mode>`) and `--recover` as a shorthand for `skip`.
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut path: Option<PathBuf> = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if let Some(value) = arg.strip_prefix("--error-mode=") {
                config.error_mode = value.parse()?;
            } else if arg == "--error-mode" {
                let value = args.next().ok_or_else(|| ConfigError::MissingValue { flag: arg.clone() })?;
                config.error_mode = value.parse()?;
            } else if arg == "--recover" {
                config.error_mode = ErrorMode::Skip;
            } else if arg.starts_with("--") {
                return Err(ConfigError::UnknownFlag { flag: arg });
            } else if path.is_some() {
                return Err(ConfigError::UnexpectedArgument { argument: arg });
            } else {
                path = Some(PathBuf::from(arg));
            }
        }

        if let Some(path) = path {
            config.path = path;
        }

        Ok(config)
    }
}
