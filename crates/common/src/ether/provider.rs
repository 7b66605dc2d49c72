//! Create a custom data transport to use with a Provider.
use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Filter, Log},
};
use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

/// Anything able to answer an `eth_getLogs` query.
///
/// The log pipeline only ever talks to the node through this trait, so tests and embedders can
/// hand it an in-memory source instead of a live connection.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Get the logs that match the given filter, in chain order.
    async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>>;
}

/// [`MultiTransportProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
#[derive(Clone, Debug)]
pub struct MultiTransportProvider {
    provider: RootProvider<Ethereum>,
}

// The transport is picked from the url scheme: `http(s)://` connects over HTTP, `ws(s)://` opens
// a websocket, and anything else is treated as an IPC socket path.
impl MultiTransportProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        debug!("connecting to rpc provider '{}' .", rpc_url);
        let provider = ProviderBuilder::new().connect(rpc_url).await?.root().clone();
        Ok(Self { provider })
    }

    /// Get the chain id.
    pub async fn get_chainid(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }
}

#[async_trait]
impl LogSource for MultiTransportProvider {
    async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        Ok(self.provider.get_logs(filter).await?)
    }
}

/// A [`LogSource`] over a fixed set of logs, answering queries the way a node would: only logs
/// from the filtered addresses within the filtered block range, in chain order.
#[derive(Clone, Debug, Default)]
pub struct StaticLogSource {
    logs: Vec<Log>,
    failure: Option<String>,
}

impl StaticLogSource {
    /// A source serving `logs`.
    pub fn new(logs: Vec<Log>) -> Self {
        Self { logs, failure: None }
    }

    /// A source whose every query fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self { logs: Vec::new(), failure: Some(message.to_string()) }
    }
}

#[async_trait]
impl LogSource for StaticLogSource {
    async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        if let Some(message) = &self.failure {
            return Err(eyre::eyre!("{}", message));
        }

        let from = filter.get_from_block().unwrap_or(0);
        let to = filter.get_to_block().unwrap_or(u64::MAX);

        let mut logs: Vec<Log> = self
            .logs
            .iter()
            .filter(|log| filter.address.matches(&log.address()))
            .filter(|log| log.block_number.is_some_and(|n| n >= from && n <= to))
            .cloned()
            .collect();
        logs.sort_by_key(|log| (log.block_number, log.log_index));

        Ok(logs)
    }
}
