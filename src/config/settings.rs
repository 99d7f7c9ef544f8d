//! Run settings for salted
//!
//! Turns raw command-line values into a validated [`Settings`]: which way to
//! run, which digest to derive with, where the password comes from and where
//! bytes are read from and written to.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::CryptArgs;
use crate::crypto::{DigestChoice, Password};
use crate::error::{SaltedError, SaltedResult};

/// Path value meaning stdin or stdout
pub const STDIO_PATH: &str = "-";

/// Encrypt or decrypt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypt => f.write_str("encrypt"),
            Self::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// Where the password comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Given directly on the command line or through the environment
    Literal(Password),
    /// Whole contents of a file, used verbatim
    File(PathBuf),
    /// Typed at the terminal
    Prompt,
}

/// Where input bytes are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Parse a path argument, `-` meaning stdin
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_PATH {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// Where output bytes are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    /// Parse a path argument, `-` meaning stdout
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_PATH {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// Log verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Only unrecoverable errors; maps onto `error` for tracing
    Fatal,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error | Self::Fatal => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = SaltedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" | "panic" => Ok(Self::Fatal),
            _ => Err(SaltedError::Config(format!("Unknown log level: {:?}", s))),
        }
    }
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Encrypt or decrypt
    pub direction: Direction,

    /// Digest for key derivation
    pub digest: DigestChoice,

    /// Password source
    pub key: KeySource,

    /// Input location
    pub input: Source,

    /// Output location
    pub output: Sink,

    /// Base64 armor on the envelope side
    pub armor: bool,
}

impl Settings {
    /// Build settings from parsed command-line arguments
    ///
    /// The digest name is checked first so an unknown one is reported before
    /// anything else is looked at. A key file takes precedence over `--key`.
    pub fn from_args(args: &CryptArgs) -> SaltedResult<Self> {
        let digest: DigestChoice = args.kdf.parse()?;

        let key = if args.prompt {
            KeySource::Prompt
        } else if let Some(path) = &args.key_file {
            KeySource::File(path.clone())
        } else {
            match args.key.as_deref() {
                Some(key) => KeySource::Literal(Password::new(key)?),
                None => return Err(SaltedError::Config("No key given".to_string())),
            }
        };

        Ok(Self {
            direction: if args.decrypt {
                Direction::Decrypt
            } else {
                Direction::Encrypt
            },
            digest,
            key,
            input: Source::from_arg(&args.in_file),
            output: Sink::from_arg(&args.out_file),
            armor: args.base64,
        })
    }
}

/// Load a password from the full contents of a file
///
/// Contents are not trimmed: a trailing newline is part of the password.
pub fn load_key_file(path: &Path) -> SaltedResult<Password> {
    let raw = zeroize::Zeroizing::new(std::fs::read(path).map_err(|e| {
        SaltedError::Config(format!(
            "Unable to read key from file {}: {}",
            path.display(),
            e
        ))
    })?);
    Password::new(raw.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> CryptArgs {
        CryptArgs {
            decrypt: false,
            in_file: "-".to_string(),
            out_file: "-".to_string(),
            kdf: "sha256".to_string(),
            key: Some("test".to_string()),
            key_file: None,
            prompt: false,
            base64: false,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_args(&args()).unwrap();
        assert_eq!(settings.direction, Direction::Encrypt);
        assert_eq!(settings.digest, DigestChoice::Sha256);
        assert_eq!(settings.key, KeySource::Literal(Password::new("test").unwrap()));
        assert_eq!(settings.input, Source::Stdin);
        assert_eq!(settings.output, Sink::Stdout);
        assert!(!settings.armor);
    }

    #[test]
    fn test_files_and_direction() {
        let mut a = args();
        a.decrypt = true;
        a.in_file = "secret.enc".to_string();
        a.out_file = "secret.txt".to_string();
        a.kdf = "md5".to_string();
        a.base64 = true;

        let settings = Settings::from_args(&a).unwrap();
        assert_eq!(settings.direction, Direction::Decrypt);
        assert_eq!(settings.digest, DigestChoice::Md5);
        assert_eq!(settings.input, Source::File(PathBuf::from("secret.enc")));
        assert_eq!(settings.output, Sink::File(PathBuf::from("secret.txt")));
        assert!(settings.armor);
    }

    #[test]
    fn test_unknown_digest_reported_first() {
        let mut a = args();
        a.kdf = "sha512".to_string();
        a.key = None;

        let err = Settings::from_args(&a).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("sha512"));
    }

    #[test]
    fn test_missing_key() {
        let mut a = args();
        a.key = None;
        let err = Settings::from_args(&a).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: No key given");

        a.key = Some(String::new());
        let err = Settings::from_args(&a).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: No key given");
    }

    #[test]
    fn test_key_file_overrides_key() {
        let mut a = args();
        a.key_file = Some(PathBuf::from("key.txt"));
        let settings = Settings::from_args(&a).unwrap();
        assert_eq!(settings.key, KeySource::File(PathBuf::from("key.txt")));
    }

    #[test]
    fn test_prompt() {
        let mut a = args();
        a.key = None;
        a.prompt = true;
        let settings = Settings::from_args(&a).unwrap();
        assert_eq!(settings.key, KeySource::Prompt);
    }

    #[test]
    fn test_load_key_file_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("key.txt");
        std::fs::write(&path, "hunter2\n").unwrap();

        let password = load_key_file(&path).unwrap();
        assert_eq!(password.as_bytes(), b"hunter2\n");
    }

    #[test]
    fn test_load_key_file_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = load_key_file(&temp_dir.path().join("missing")).unwrap_err();
        assert!(missing.is_config());
        assert!(missing.to_string().contains("Unable to read key from file"));

        let empty = temp_dir.path().join("empty");
        std::fs::write(&empty, "").unwrap();
        let err = load_key_file(&empty).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: No key given");
    }

    #[test]
    fn test_log_levels() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap().as_filter(), "warn");
        assert_eq!("fatal".parse::<LogLevel>().unwrap().as_filter(), "error");
        assert!("loud".parse::<LogLevel>().unwrap_err().is_config());
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
