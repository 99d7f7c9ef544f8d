use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use salted::cli::{handle_crypt_command, CryptArgs};
use salted::config::LogLevel;

#[derive(Parser)]
#[command(
    name = "salted",
    version,
    about = "Encrypt or decrypt data in the OpenSSL `enc` format",
    long_about = "salted encrypts and decrypts data with AES-256-CBC using a password, \
                  producing and reading the same salted format as \
                  `openssl enc -aes-256-cbc -md <digest>`. Input and output default \
                  to stdin and stdout."
)]
struct Cli {
    #[command(flatten)]
    crypt: CryptArgs,

    /// Log level (trace, debug, info, warn, error, fatal)
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: LogLevel = cli.log_level.parse().context("Unable to parse log level")?;
    init_logging(level);

    handle_crypt_command(&cli.crypt).context("Unable to perform cryptographic action")?;

    Ok(())
}

/// Log to stderr; stdout may be carrying binary output
fn init_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.as_filter()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
