use alloy::{
    primitives::Address,
    rpc::types::{Filter, Log},
};
use evlog_common::ether::provider::LogSource;
use tracing::debug;

use crate::error::Error;

/// Which logs to fetch: everything `address` emitted in `from_block..=to_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Emitting contract.
    pub address: Address,
    /// First block, inclusive.
    pub from_block: u64,
    /// Last block, inclusive.
    pub to_block: u64,
}

impl FilterCriteria {
    /// Criteria for an inclusive block range. Fails when the range is empty.
    pub fn new(address: Address, from_block: u64, to_block: u64) -> Result<Self, Error> {
        if from_block > to_block {
            return Err(Error::QueryError(format!(
                "invalid block range: from block {from_block} is after to block {to_block}"
            )));
        }
        Ok(Self { address, from_block, to_block })
    }

    /// Like [`FilterCriteria::new`], with a `0x`-prefixed hex address.
    pub fn parse(address: &str, from_block: u64, to_block: u64) -> Result<Self, Error> {
        let address = address
            .trim()
            .parse::<Address>()
            .map_err(|e| Error::QueryError(format!("invalid contract address '{address}': {e}")))?;
        Self::new(address, from_block, to_block)
    }

    /// The `eth_getLogs` filter for these criteria.
    pub fn to_filter(&self) -> Filter {
        Filter::new().address(self.address).from_block(self.from_block).to_block(self.to_block)
    }
}

/// Fetches every log matching `criteria` in one request, ordered by block number then log index.
///
/// No pagination: nodes that cap the range or result count reject the query, which surfaces
/// as [`Error::QueryError`].
pub async fn fetch_logs<S>(source: &S, criteria: &FilterCriteria) -> Result<Vec<Log>, Error>
where
    S: LogSource + ?Sized,
{
    debug!(
        "fetching logs for {:#x} in blocks {}..={}",
        criteria.address, criteria.from_block, criteria.to_block
    );

    let mut logs = source.get_logs(&criteria.to_filter()).await.map_err(|e| {
        Error::QueryError(format!(
            "failed to fetch logs for blocks {}..={} (does your RPC provider support the \
             range?): {e}",
            criteria.from_block, criteria.to_block
        ))
    })?;
    logs.sort_by_key(|log| (log.block_number, log.log_index));

    Ok(logs)
}
