pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use std::process::ExitCode;

use error::Error;
use log_args::LogArgs;
use output::build_output_path;
use tracing::{debug, info};

use clap::{Parser, Subcommand};

use evlog_common::{
    constants::ITEM_SET_SIGNATURE,
    ether::signatures::{canonical_signature, event_signature_hash},
    utils::{hex::ToLowerHex, io::file::write_file},
};
use evlog_config::{config, ConfigArgs, Configuration};
use evlog_core::evlog_logs::{logs, LogsArgs};

#[derive(Debug, Parser)]
#[clap(name = "evlog", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Parser)]
#[clap(
    about = "Compute the topic[0] hash of an event signature",
    override_usage = "evlog sig [SIGNATURE]"
)]
pub(crate) struct SigArgs {
    /// The event signature, e.g. `Transfer(address,address,uint256)`.
    #[clap(default_value = ITEM_SET_SIGNATURE)]
    pub(crate) signature: String,
}

#[derive(Debug, Subcommand)]
#[clap(about = "evlog reads and decodes the event logs a contract emitted over a block range.")]
#[allow(clippy::large_enum_variant)]
pub(crate) enum Subcommands {
    #[clap(name = "logs", about = "Fetch and decode a contract's event logs over a block range")]
    Logs(LogsArgs),

    #[clap(name = "sig", about = "Compute the topic[0] hash of an event signature")]
    Sig(SigArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Arguments::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Arguments) -> Result<(), Error> {
    // setup logging
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize logging: {}", e)))?;

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
    match args.sub {
        Subcommands::Logs(mut cmd) => {
            // if the user has not specified a rpc url, use the default
            if cmd.rpc_url.as_str() == "" {
                cmd.rpc_url = configuration.rpc_url;
            }

            // same for the contract and the block range
            if cmd.address.is_empty() {
                cmd.address = configuration.contract_address;
            }
            cmd.from_block = cmd.from_block.or(Some(configuration.from_block));
            cmd.to_block = cmd.to_block.or(Some(configuration.to_block));

            let result = logs(cmd.clone())
                .await
                .map_err(|e| Error::Generic(format!("failed to fetch logs: {}", e)))?;

            debug!("decoded {} logs of '{}'", result.logs.len(), result.signature);

            if cmd.output == "print" {
                result.display();
            } else {
                let output_path = build_output_path(&cmd.output, &cmd.name, "logs.json");
                write_file(&output_path, &result.to_json()?)
                    .map_err(|e| Error::Generic(format!("failed to write logs: {}", e)))?;
                info!("wrote {} logs to '{}'", result.logs.len(), output_path);
            }
        }

        Subcommands::Sig(cmd) => {
            let signature = canonical_signature(&cmd.signature)
                .map_err(|e| Error::Generic(format!("failed to parse signature: {}", e)))?;
            println!("topic hash: {}", event_signature_hash(&signature).to_lower_hex());
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure evlog: {}", e)))?;
        }
    }

    Ok(())
}
