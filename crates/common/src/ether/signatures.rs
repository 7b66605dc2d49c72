//! Event signature hashing.

use alloy::primitives::{keccak256, B256};
use eyre::{bail, Result};

/// Normalizes a textual event signature into its canonical form, `Name(type1,type2,...)`.
///
/// Whitespace is removed; anything that does not look like a name followed by a parenthesized
/// type list is rejected.
///
/// ```
/// use evlog_common::ether::signatures::canonical_signature;
///
/// let sig = canonical_signature("ItemSet(address, bytes32, bytes32)").expect("valid signature");
/// assert_eq!(sig, "ItemSet(address,bytes32,bytes32)");
/// ```
pub fn canonical_signature(signature: &str) -> Result<String> {
    let signature: String = signature.chars().filter(|c| !c.is_whitespace()).collect();

    let open = match signature.find('(') {
        Some(open) => open,
        None => bail!("invalid event signature '{}': missing parameter list", signature),
    };
    if !signature.ends_with(')') {
        bail!("invalid event signature '{}': unterminated parameter list", signature);
    }

    let name = &signature[..open];
    if name.is_empty() ||
        name.starts_with(|c: char| c.is_ascii_digit()) ||
        !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        bail!("invalid event signature '{}': bad event name", signature);
    }

    Ok(signature)
}

/// Computes the keccak-256 hash of a canonical event signature. This is the value a
/// non-anonymous event places in `topic[0]` of every log it emits.
///
/// ```
/// use evlog_common::ether::signatures::event_signature_hash;
///
/// let hash = event_signature_hash("Transfer(address,address,uint256)");
/// assert_eq!(
///     format!("{hash:#x}"),
///     "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
/// );
/// ```
pub fn event_signature_hash(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}
