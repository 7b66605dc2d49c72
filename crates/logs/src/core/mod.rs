use std::time::Instant;

use alloy::{
    primitives::{Address, Bytes, B256},
    rpc::types::Log,
};
use evlog_common::{
    ether::{
        provider::{LogSource, MultiTransportProvider},
        signatures::event_signature_hash,
    },
    utils::hex::ToLowerHex,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    interfaces::{DecodedEvent, LogsArgs},
    utils::{
        abi::{decode_payload, layout_width, AbiDescriptor},
        filter::{fetch_logs, FilterCriteria},
        report::{render_log, render_signature_hash},
        schema::EventSchema,
    },
};

/// A fetched log together with its decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedLog {
    /// The contract that emitted the log
    pub address: Address,

    /// Block Hash
    #[serde(rename = "blockHash")]
    pub block_hash: Option<B256>,

    /// Block Number
    #[serde(rename = "blockNumber")]
    pub block_number: Option<u64>,

    /// Transaction Hash
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Option<B256>,

    /// Position of the log within its block
    #[serde(rename = "logIndex")]
    pub log_index: Option<u64>,

    /// Indexed values; `topics[0]` is the event signature hash unless the event is anonymous.
    pub topics: Vec<B256>,

    /// Raw payload
    pub data: Bytes,

    /// Decoded payload
    pub decoded: DecodedEvent,
}

impl ReportedLog {
    fn new(log: &Log, decoded: DecodedEvent) -> Self {
        Self {
            address: log.address(),
            block_hash: log.block_hash,
            block_number: log.block_number,
            transaction_hash: log.transaction_hash,
            log_index: log.log_index,
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
            decoded,
        }
    }
}

/// Result of a successful logs run
#[derive(Debug, Clone, Serialize)]
pub struct LogsResult {
    /// Name of the decoded event
    pub event: String,
    /// Canonical signature of the decoded event
    pub signature: String,
    /// keccak-256 of `signature`
    #[serde(rename = "signatureHash")]
    pub signature_hash: B256,
    /// Every matching log, in chain order
    pub logs: Vec<ReportedLog>,
    #[serde(skip)]
    label_width: usize,
}

impl LogsResult {
    /// The plain-text report: one record per log, then the signature hash line.
    pub fn report(&self) -> String {
        let mut out: String =
            self.logs.iter().map(|log| render_log(log, self.label_width)).collect();
        out.push_str(&render_signature_hash(&self.signature_hash));
        out
    }

    /// Prints the report to stdout.
    pub fn display(&self) {
        print!("{}", self.report());
    }

    /// Serializes the result to pretty JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Eyre(eyre::eyre!("failed to serialize to JSON: {}", e)))
    }
}

/// Everything derived from [`LogsArgs`] before the node is contacted.
struct LogsQuery {
    criteria: FilterCriteria,
    descriptor: AbiDescriptor,
    event: String,
    check_signature: bool,
}

impl LogsQuery {
    fn prepare(args: &LogsArgs) -> Result<Self, Error> {
        let criteria = args.filter_criteria().inspect_err(|e| debug!("{}", e))?;
        let descriptor = args.abi_descriptor().inspect_err(|e| debug!("{}", e))?;

        // fail before connecting when the event can never be decoded
        let schema = descriptor.event(&args.event).inspect_err(|e| debug!("{}", e))?;
        layout_width(schema).inspect_err(|e| debug!("{}", e))?;

        Ok(Self {
            criteria,
            descriptor,
            event: args.event.clone(),
            check_signature: args.check_signature,
        })
    }
}

async fn connect(rpc_url: &str) -> Result<MultiTransportProvider, Error> {
    let connection_error = |e: eyre::Report| {
        Error::ConnectionError(format!("failed to connect to provider '{rpc_url}': {e}"))
    };

    let provider = MultiTransportProvider::connect(rpc_url).await.map_err(connection_error)?;
    let chain_id = provider.get_chainid().await.map_err(connection_error)?;
    debug!("connected to '{}' (chain id {})", rpc_url, chain_id);

    Ok(provider)
}

fn check_topic0(schema: &EventSchema, log: &Log) -> Result<(), Error> {
    if schema.anonymous {
        return Ok(());
    }

    match log.topics().first() {
        Some(topic) if *topic == schema.selector => Ok(()),
        found => {
            let e = Error::SignatureMismatch {
                expected: schema.selector.to_lower_hex(),
                found: found.map(|topic| topic.to_lower_hex()).unwrap_or_else(|| "none".into()),
            };
            debug!("{}", e);
            Err(e)
        }
    }
}

async fn run<S>(query: LogsQuery, source: &S) -> Result<LogsResult, Error>
where
    S: LogSource + ?Sized,
{
    let start_time = Instant::now();
    let schema = query.descriptor.event(&query.event)?;

    let logs = fetch_logs(source, &query.criteria).await?;
    if logs.is_empty() {
        warn!(
            "no logs found for {:#x} in blocks {}..={}",
            query.criteria.address, query.criteria.from_block, query.criteria.to_block
        );
    }

    let mut reported = Vec::with_capacity(logs.len());
    for log in &logs {
        if query.check_signature {
            check_topic0(schema, log)?;
        }

        let decoded = decode_payload(schema, &log.data().data).inspect_err(|e| {
            debug!(
                "failed to decode log {:?} of transaction {:?}: {}",
                log.log_index, log.transaction_hash, e
            )
        })?;
        reported.push(ReportedLog::new(log, decoded));
    }

    // independent of the logs above; not compared against their topics unless requested
    let signature_hash = event_signature_hash(&schema.signature);

    info!("decoded {} '{}' logs in {:?}", reported.len(), schema.name, start_time.elapsed());
    Ok(LogsResult {
        event: schema.name.clone(),
        signature: schema.signature.clone(),
        signature_hash,
        logs: reported,
        label_width: schema.label_width(),
    })
}

/// Connects to `args.rpc_url`, fetches the logs matching `args`, and decodes them.
///
/// The address, range, ABI and event are validated before the node is contacted.
pub async fn logs(args: LogsArgs) -> Result<LogsResult, Error> {
    let query = LogsQuery::prepare(&args)?;
    let provider = connect(&args.rpc_url).await?;
    run(query, &provider).await
}

/// Like [`logs`], reading from `source` instead of connecting to `args.rpc_url`.
pub async fn logs_with_source<S>(args: &LogsArgs, source: &S) -> Result<LogsResult, Error>
where
    S: LogSource + ?Sized,
{
    let query = LogsQuery::prepare(args)?;
    run(query, source).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::LogsArgsBuilder;
    use alloy::primitives::LogData;
    use evlog_common::{
        constants::{DEFAULT_CONTRACT_ADDRESS, ITEM_SET_SIGNATURE},
        ether::provider::StaticLogSource,
    };

    fn store_address() -> Address {
        DEFAULT_CONTRACT_ADDRESS.parse().expect("valid address")
    }

    fn item_set_log(block_number: u64, topic0: B256, data: Vec<u8>) -> Log {
        store_log(block_number, vec![topic0, B256::left_padding_from(&[0x42; 20])], data)
    }

    fn store_log(block_number: u64, topics: Vec<B256>, data: Vec<u8>) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: store_address(),
                data: LogData::new_unchecked(topics, data.into()),
            },
            block_hash: Some(B256::repeat_byte(0xbb)),
            block_number: Some(block_number),
            block_timestamp: None,
            transaction_hash: Some(B256::repeat_byte(0xcc)),
            transaction_index: Some(0),
            log_index: Some(0),
            removed: false,
        }
    }

    fn temp_abi(label: &str, abi: &str) -> String {
        let path = std::env::temp_dir()
            .join(format!("evlog-core-{label}-{}.json", std::process::id()))
            .to_string_lossy()
            .into_owned();
        evlog_common::utils::io::file::write_file(&path, abi).expect("failed to write abi");
        path
    }

    fn payload() -> Vec<u8> {
        [[0u8; 32], [0xff; 32]].concat()
    }

    #[tokio::test]
    async fn test_decodes_single_log() {
        let selector = event_signature_hash(ITEM_SET_SIGNATURE);
        let source = StaticLogSource::new(vec![item_set_log(8059340, selector, payload())]);
        let args = LogsArgsBuilder::new().build().expect("all fields set");

        let result = logs_with_source(&args, &source).await.expect("pipeline succeeds");

        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.signature, ITEM_SET_SIGNATURE);
        assert_eq!(result.signature_hash, selector);

        let item = crate::ItemSet::try_from(&result.logs[0].decoded).expect("is an ItemSet");
        assert_eq!(item.key, B256::ZERO);
        assert_eq!(item.value, B256::repeat_byte(0xff));

        let report = result.report();
        assert!(report.contains(&format!("\t\tkey  :{}\n", "00".repeat(32))));
        assert!(report.contains(&format!("\t\tvalue:{}\n", "ff".repeat(32))));
        assert!(report.contains(&format!("\t\ttopic[0]: {}\n", selector.to_lower_hex())));
        assert!(report.ends_with(&format!("topic hash: {}\n", selector.to_lower_hex())));
    }

    #[tokio::test]
    async fn test_no_logs_still_reports_signature_hash() {
        let source = StaticLogSource::new(vec![]);
        let args = LogsArgsBuilder::new().build().expect("all fields set");

        let result = logs_with_source(&args, &source).await.expect("pipeline succeeds");

        assert!(result.logs.is_empty());
        assert_eq!(
            result.report(),
            "topic hash: 0xa57f93e0f49a8b749452690bfe6acc64922a62d5f704a9e11daa132f8c145b3a\n"
        );
    }

    #[tokio::test]
    async fn test_bad_payload_aborts_run() {
        let selector = event_signature_hash(ITEM_SET_SIGNATURE);
        let source = StaticLogSource::new(vec![
            item_set_log(8059340, selector, payload()),
            item_set_log(8059341, selector, vec![0u8; 40]),
        ]);
        let args = LogsArgsBuilder::new().build().expect("all fields set");

        let err = logs_with_source(&args, &source).await.expect_err("second log is malformed");
        assert!(matches!(err, Error::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_signature_check_is_opt_in() {
        let source =
            StaticLogSource::new(vec![item_set_log(8059340, B256::repeat_byte(0x99), payload())]);

        let unchecked = LogsArgsBuilder::new().build().expect("all fields set");
        assert!(logs_with_source(&unchecked, &source).await.is_ok());

        let checked = LogsArgsBuilder::new().check_signature(true).build().expect("all fields set");
        let err = logs_with_source(&checked, &source).await.expect_err("topic[0] mismatch");
        assert!(matches!(err, Error::SignatureMismatch { .. }));
    }

    #[tokio::test]
    async fn test_signature_check_rejects_log_without_topics() {
        let source = StaticLogSource::new(vec![store_log(8059340, vec![], payload())]);
        let args = LogsArgsBuilder::new().check_signature(true).build().expect("all fields set");

        let err = logs_with_source(&args, &source).await.expect_err("log has no topic[0]");
        match err {
            Error::SignatureMismatch { expected, found } => {
                assert_eq!(expected, event_signature_hash(ITEM_SET_SIGNATURE).to_lower_hex());
                assert_eq!(found, "none");
            }
            other => panic!("expected a signature mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signature_check_skips_anonymous_events() {
        let path = temp_abi(
            "anonymous",
            r#"[{"type":"event","name":"Stored","anonymous":true,"inputs":[
                {"name":"key","type":"bytes32","indexed":false},
                {"name":"value","type":"bytes32","indexed":false}]}]"#,
        );
        let source =
            StaticLogSource::new(vec![item_set_log(8059340, B256::repeat_byte(0x99), payload())]);
        let args = LogsArgsBuilder::new()
            .abi(Some(path.clone()))
            .event("Stored".to_string())
            .check_signature(true)
            .build()
            .expect("all fields set");

        let result = logs_with_source(&args, &source).await;
        let _ = std::fs::remove_file(&path);

        let result = result.expect("anonymous events carry no selector");
        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.logs[0].decoded.fields[1].hex, "ff".repeat(32));
    }

    #[tokio::test]
    async fn test_oversized_layout_fails_before_connecting() {
        let path = temp_abi(
            "oversized",
            r#"[{"type":"event","name":"Big","anonymous":false,"inputs":[
                {"name":"words","type":"uint256[576460752303423489]","indexed":false}]}]"#,
        );
        let args = LogsArgsBuilder::new()
            .abi(Some(path.clone()))
            .event("Big".to_string())
            .build()
            .expect("all fields set");

        // no rpc url is set, so reaching the connect stage would be a connection error
        let err = logs(args).await.expect_err("layout is too large");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, Error::FormatError(ref msg) if msg.contains("oversized")));
    }

    #[tokio::test]
    async fn test_invalid_range_fails_before_query() {
        let source = StaticLogSource::failing("should not be queried");
        let args = LogsArgsBuilder::new()
            .from_block(Some(10))
            .to_block(Some(9))
            .build()
            .expect("all fields set");

        let err = logs_with_source(&args, &source).await.expect_err("range is empty");
        assert!(matches!(err, Error::QueryError(ref msg) if msg.contains("invalid block range")));
    }

    #[tokio::test]
    async fn test_unknown_event_fails_before_connecting() {
        let args = LogsArgsBuilder::new()
            .event("Transfer".to_string())
            .build()
            .expect("all fields set");

        let err = logs(args).await.expect_err("event is not in the ABI");
        assert!(matches!(err, Error::FormatError(_)));
    }

    #[tokio::test]
    async fn test_missing_rpc_url_is_connection_error() {
        let args = LogsArgsBuilder::new().build().expect("all fields set");

        let err = logs(args).await.expect_err("no rpc url");
        assert!(matches!(err, Error::ConnectionError(_)));
    }

    #[tokio::test]
    async fn test_to_json() {
        let selector = event_signature_hash(ITEM_SET_SIGNATURE);
        let source = StaticLogSource::new(vec![item_set_log(8059340, selector, payload())]);
        let args = LogsArgsBuilder::new().build().expect("all fields set");
        let result = logs_with_source(&args, &source).await.expect("pipeline succeeds");

        let json: serde_json::Value =
            serde_json::from_str(&result.to_json().expect("serializes")).expect("valid json");
        assert_eq!(json["event"], "ItemSet");
        assert_eq!(json["logs"][0]["blockNumber"], 8059340);
        assert_eq!(json["logs"][0]["decoded"]["fields"][1]["name"], "value");
        assert_eq!(json["signatureHash"], selector.to_lower_hex());
    }
}
