//! `fmg-xml` - runs one FortiManager / FortiAnalyzer XML API operation.
//!
//! ```text
//! fmg-xml --config fmg.toml run add_adom --options adom.toml
//! fmg-xml list
//! ```
//!
//! The payload is printed to stdout as JSON. Logs go to stderr.

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

mod observability;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fmg_xml_api::{ClientConfig, FmgClient, OptionBag, Operation};
use tracing::debug;

use crate::observability::{LogFormat, init_observability};

#[derive(Debug, Parser)]
#[command(name = "fmg-xml", version, about)]
struct Cli {
    /// Client configuration file.
    #[arg(long, short, global = true, default_value = "fmg.toml", env = "FMG_XML_CONFIG")]
    config: PathBuf,

    /// Default log level when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs an operation and prints its payload.
    Run {
        /// Operation name, e.g. `get_adom_list`.
        operation: Operation,

        /// TOML file with the operation's options.
        #[arg(long, short)]
        options: Option<PathBuf>,
    },
    /// Lists operation names with their wire names.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_observability(LogFormat::from_env(), &cli.log_level);

    match cli.command {
        Command::List => {
            for operation in Operation::ALL {
                println!("{operation:<32} {}", operation.descriptor().wire_name);
            }
        }
        Command::Run { operation, options } => {
            let options = match options {
                Some(path) => load_options(&path)?,
                None => OptionBag::new(),
            };
            let config = ClientConfig::from_file(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;
            let client = FmgClient::from_config(&config)?;
            debug!(endpoint = %client.transport().endpoint(), "client ready");

            let payload = client
                .execute(operation, &options)
                .await
                .with_context(|| format!("{operation} failed"))?;
            println!("{}", serde_json::to_string_pretty(&payload.into_value())?);
        }
    }
    Ok(())
}

fn load_options(path: &Path) -> Result<OptionBag> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read options file {}", path.display()))?;
    Ok(OptionBag::from_toml(&content)?)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_parses_operation() {
        let cli = Cli::try_parse_from([
            "fmg-xml",
            "--config",
            "site.toml",
            "run",
            "get_device",
            "--options",
            "dev.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        match cli.command {
            Command::Run { operation, options } => {
                assert_eq!(operation, Operation::GetDevice);
                assert_eq!(options, Some(PathBuf::from("dev.toml")));
            }
            Command::List => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_rejects_unknown_operation() {
        assert!(Cli::try_parse_from(["fmg-xml", "run", "frobnicate"]).is_err());
    }

    #[test]
    fn test_load_options_from_file() {
        let path = std::env::temp_dir().join(format!("fmg-xml-options-{}.toml", std::process::id()));
        std::fs::write(&path, "name = \"adomA\"\n\n[[devices]]\ndev_id = \"234\"\n").unwrap();

        let options = load_options(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(options.get_str("name"), Some("adomA"));
        assert!(options.has("devices"));
    }

    #[test]
    fn test_missing_options_file() {
        let err = load_options(Path::new("/nonexistent/options.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read options file"));
    }
}
