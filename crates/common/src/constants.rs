/// The contract the `logs` command inspects when no address is given.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xe4a220e0bd37673a90e2114abc98e4a22445c32e";

/// First block (inclusive) of the default log query.
pub const DEFAULT_FROM_BLOCK: u64 = 8059333;

/// Last block (inclusive) of the default log query.
pub const DEFAULT_TO_BLOCK: u64 = 8059380;

/// The event decoded by default.
pub const DEFAULT_EVENT_NAME: &str = "ItemSet";

/// Canonical signature of the `ItemSet` event emitted by the Store contract.
pub const ITEM_SET_SIGNATURE: &str = "ItemSet(address,bytes32,bytes32)";

/// JSON ABI of the Store contract, as emitted by `solc --abi`.
///
/// `ItemSet` carries the sender as its only indexed parameter, so the log payload is
/// exactly two words: `key` followed by `value`.
pub const STORE_ABI: &str = r#"[
  {
    "inputs": [{ "internalType": "string", "name": "_version", "type": "string" }],
    "stateMutability": "nonpayable",
    "type": "constructor"
  },
  {
    "anonymous": false,
    "inputs": [
      { "indexed": true, "internalType": "address", "name": "sender", "type": "address" },
      { "indexed": false, "internalType": "bytes32", "name": "key", "type": "bytes32" },
      { "indexed": false, "internalType": "bytes32", "name": "value", "type": "bytes32" }
    ],
    "name": "ItemSet",
    "type": "event"
  },
  {
    "inputs": [{ "internalType": "bytes32", "name": "", "type": "bytes32" }],
    "name": "items",
    "outputs": [{ "internalType": "bytes32", "name": "", "type": "bytes32" }],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [
      { "internalType": "bytes32", "name": "key", "type": "bytes32" },
      { "internalType": "bytes32", "name": "value", "type": "bytes32" }
    ],
    "name": "setItem",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  },
  {
    "inputs": [],
    "name": "version",
    "outputs": [{ "internalType": "string", "name": "", "type": "string" }],
    "stateMutability": "view",
    "type": "function"
  }
]"#;
