//! `envelope` — command-line entry point.
//!
//! Startup sequence:
//! 1. Parse arguments.
//! 2. Initialise stderr logging.
//! 3. Load the master secret from the environment and derive the key.
//! 4. Run the requested subcommand against stdin/stdout.

mod commands;
mod config;
mod telemetry;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "envelope",
    version,
    about = "Encrypt and decrypt keys with the shared envelope secret",
    after_help = "The secret is read from ENCRYPT_SECRET, or ENCRYPTION_MASTER_SECRET if that is unset."
)]
struct Cli {
    /// Log level for diagnostics written to stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a plaintext key and print the token
    Encrypt {
        /// Plaintext to encrypt; read from stdin when omitted
        text: Option<String>,
    },
    /// Decrypt a token and print the plaintext
    Decrypt {
        /// Token to decrypt; read from stdin when omitted
        token: Option<String>,
    },
    /// Print the fingerprint of the configured secret
    Fingerprint,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init(&cli.log_level) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let key = config::Config::from_env()?.master_key()?;
    debug!(key_fingerprint = %key.fingerprint(), "master key loaded");

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Encrypt { text } => commands::encrypt(&key, text.as_deref(), stdin, &mut stdout),
        Commands::Decrypt { token } => {
            commands::decrypt(&key, token.as_deref(), stdin, &mut stdout)
        }
        Commands::Fingerprint => commands::fingerprint(&key, &mut stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_with_argument() {
        let cli = Cli::try_parse_from(["envelope", "encrypt", "api-key"]).unwrap();
        assert!(matches!(cli.command, Commands::Encrypt { text: Some(ref t) } if t == "api-key"));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn parses_decrypt_from_stdin() {
        let cli = Cli::try_parse_from(["envelope", "decrypt"]).unwrap();
        assert!(matches!(cli.command, Commands::Decrypt { token: None }));
    }

    #[test]
    fn log_level_is_global() {
        let cli =
            Cli::try_parse_from(["envelope", "fingerprint", "--log-level", "debug"]).unwrap();
        assert!(matches!(cli.command, Commands::Fingerprint));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["envelope"]).is_err());
    }
}
