//! CLI command handling
//!
//! Bridges clap argument parsing with the envelope engine: resolves settings
//! and the password, reads input, runs the engine and writes the result.

pub mod io;

use std::borrow::Cow;
use std::path::PathBuf;

use clap::Args;
use zeroize::Zeroizing;

use crate::config::settings::load_key_file;
use crate::config::{Direction, KeySource, Settings};
use crate::crypto::{armor, decrypt, encrypt, Password};
use crate::error::{SaltedError, SaltedResult};

/// Encrypt / decrypt arguments
#[derive(Args, Debug, Clone)]
pub struct CryptArgs {
    /// Execute decrypt operation
    #[arg(short, long, env = "DECRYPT")]
    pub decrypt: bool,

    /// File to read input from (- for stdin)
    #[arg(short, long = "in-file", env = "IN_FILE", default_value = "-")]
    pub in_file: String,

    /// File to write output to (- for stdout)
    #[arg(short, long = "out-file", env = "OUT_FILE", default_value = "-")]
    pub out_file: String,

    /// Key-Derivation-Function to use (one of md5, sha1, sha256)
    #[arg(long, env = "KDF", default_value = "sha256")]
    pub kdf: String,

    /// Key to use for en- or decryption
    #[arg(short, long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Key-File which content is used instead of the key (overwrites key flag)
    #[arg(short = 'f', long = "key-file", env = "KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Read the key from the terminal
    #[arg(short, long, conflicts_with_all = ["key", "key_file"])]
    pub prompt: bool,

    /// Base64 armor like `openssl enc -a`: encrypting writes base64 wrapped at
    /// 64 columns, decrypting accepts base64 with any line breaks. Without it
    /// the envelope is raw binary.
    #[arg(short = 'a', long = "base64", env = "BASE64")]
    pub base64: bool,
}

/// Handle an encrypt or decrypt run
pub fn handle_crypt_command(args: &CryptArgs) -> SaltedResult<()> {
    let settings = Settings::from_args(args)?;
    let password = resolve_password(&settings)?;

    tracing::debug!(
        direction = %settings.direction,
        digest = %settings.digest,
        armor = settings.armor,
        "starting"
    );

    let input = Zeroizing::new(io::read_input(&settings.input)?);
    let output = Zeroizing::new(run(&settings, &password, &input)?);
    io::write_output(&settings.output, &output)?;

    tracing::debug!(
        input_len = input.len(),
        output_len = output.len(),
        "finished"
    );

    Ok(())
}

/// Run the engine over an in-memory buffer
pub fn run(settings: &Settings, password: &Password, input: &[u8]) -> SaltedResult<Vec<u8>> {
    match settings.direction {
        Direction::Encrypt => {
            let envelope = encrypt(password, settings.digest, input)?;
            if settings.armor {
                Ok(armor::encode(&envelope).into_bytes())
            } else {
                Ok(envelope)
            }
        }
        Direction::Decrypt => {
            let envelope = if settings.armor {
                Cow::Owned(armor::decode(input)?)
            } else {
                Cow::Borrowed(input)
            };
            decrypt(password, settings.digest, &envelope)
        }
    }
}

/// Turn the configured key source into a password
fn resolve_password(settings: &Settings) -> SaltedResult<Password> {
    match &settings.key {
        KeySource::Literal(password) => Ok(password.clone()),
        KeySource::File(path) => load_key_file(path),
        KeySource::Prompt => match settings.direction {
            Direction::Encrypt => prompt_new_password(),
            Direction::Decrypt => prompt_password("Enter key: "),
        },
    }
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> SaltedResult<Password> {
    let first = prompt_password("Enter key: ")?;
    let second = prompt_password("Verify key: ")?;

    if first != second {
        return Err(SaltedError::Config("Keys do not match".to_string()));
    }
    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> SaltedResult<Password> {
    let typed = Zeroizing::new(
        rpassword::prompt_password(prompt)
            .map_err(|e| SaltedError::Config(format!("Failed to read key: {}", e)))?,
    );
    Password::new(typed.as_bytes())
}
