use clap::Parser;
use derive_builder::Builder;
use evlog_common::constants::{
    DEFAULT_CONTRACT_ADDRESS, DEFAULT_EVENT_NAME, DEFAULT_FROM_BLOCK, DEFAULT_TO_BLOCK, STORE_ABI,
};
use evlog_config::parse_url_arg;

use crate::{
    error::Error,
    utils::{abi::AbiDescriptor, filter::FilterCriteria},
};

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Fetch a contract's event logs over a block range and decode their payloads",
    override_usage = "evlog logs [OPTIONS]"
)]
/// Arguments for the logs operation
///
/// Everything the pipeline needs is carried here; nothing is read from globals. Options left
/// empty on the command line are filled from the configuration file by the CLI.
pub struct LogsArgs {
    /// The contract whose logs are queried.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub address: String,

    /// The RPC provider to query. Accepts http(s), ws(s) and IPC endpoints.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// First block of the range, inclusive.
    #[clap(long = "from-block", short = 'f')]
    pub from_block: Option<u64>,

    /// Last block of the range, inclusive.
    #[clap(long = "to-block", short = 't')]
    pub to_block: Option<u64>,

    /// Name or full signature of the event to decode.
    #[clap(long, short, default_value = DEFAULT_EVENT_NAME)]
    pub event: String,

    /// Path to an ABI file to decode with. Defaults to the bundled Store ABI.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// Fail when a log's topic[0] is not the event's signature hash.
    #[clap(long = "check-signature")]
    pub check_signature: bool,

    /// Name for the output files.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the JSON report to, or 'print' to print to the console.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl LogsArgs {
    /// Validates the address and block range.
    pub fn filter_criteria(&self) -> Result<FilterCriteria, Error> {
        let from_block = self
            .from_block
            .ok_or_else(|| Error::QueryError("no lower block bound given".to_string()))?;
        let to_block = self
            .to_block
            .ok_or_else(|| Error::QueryError("no upper block bound given".to_string()))?;

        FilterCriteria::parse(&self.address, from_block, to_block)
    }

    /// Loads the ABI file given with `--abi`, or the bundled Store ABI.
    pub fn abi_descriptor(&self) -> Result<AbiDescriptor, Error> {
        match &self.abi {
            Some(path) => AbiDescriptor::from_file(path),
            None => AbiDescriptor::parse(STORE_ABI),
        }
    }
}

impl LogsArgsBuilder {
    /// Creates a new LogsArgsBuilder pre-filled with the Store contract query
    pub fn new() -> Self {
        Self {
            address: Some(DEFAULT_CONTRACT_ADDRESS.to_string()),
            rpc_url: Some(String::new()),
            from_block: Some(Some(DEFAULT_FROM_BLOCK)),
            to_block: Some(Some(DEFAULT_TO_BLOCK)),
            event: Some(DEFAULT_EVENT_NAME.to_string()),
            abi: Some(None),
            check_signature: Some(false),
            name: Some(String::new()),
            output: Some(String::from("print")),
        }
    }
}
