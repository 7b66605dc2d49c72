use std::fmt::Write;

use alloy::primitives::B256;
use evlog_common::utils::{hex::ToLowerHex, strings::pad_label};

use crate::core::ReportedLog;

/// Topics beyond `topic[3]` cannot exist on a valid log and are never rendered.
const MAX_TOPICS: usize = 4;

/// Renders each topic of a log as `0x`-prefixed, 64-digit lowercase hex.
pub fn topic_hex(topics: &[B256]) -> Vec<String> {
    topics.iter().take(MAX_TOPICS).map(ToLowerHex::to_lower_hex).collect()
}

fn hash_or_none(hash: Option<B256>) -> String {
    hash.map(|hash| hash.to_lower_hex()).unwrap_or_else(|| "none".to_string())
}

/// Renders one log as a multi-line record. Field labels are padded to `label_width`.
///
/// ```text
/// find new event:
///     block hash: 0x…
///     block num : 8059333
///     tx   hash : 0x…
///     Data:
///         key  :00…
///         value:ff…
///     Topic:
///         topic[0]: 0x…
/// ```
pub fn render_log(log: &ReportedLog, label_width: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "find new event:");
    let _ = writeln!(out, "\tblock hash: {}", hash_or_none(log.block_hash));
    let _ = writeln!(
        out,
        "\tblock num : {}",
        log.block_number.map(|n| n.to_string()).unwrap_or_else(|| "none".to_string())
    );
    let _ = writeln!(out, "\ttx   hash : {}", hash_or_none(log.transaction_hash));

    let _ = writeln!(out, "\tData:");
    for field in &log.decoded.fields {
        let _ = writeln!(out, "\t\t{}:{}", pad_label(&field.name, label_width), field.hex);
    }

    let _ = writeln!(out, "\tTopic:");
    for (i, topic) in topic_hex(&log.topics).iter().enumerate() {
        let _ = writeln!(out, "\t\ttopic[{i}]: {topic}");
    }

    out
}

/// Renders the closing signature hash line.
pub fn render_signature_hash(hash: &B256) -> String {
    format!("topic hash: {}\n", hash.to_lower_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{DecodedEvent, DecodedField};
    use alloy::primitives::{Address, Bytes};
    use alloy_dyn_abi::{DynSolType, DynSolValue};

    fn reported(topics: Vec<B256>) -> ReportedLog {
        ReportedLog {
            address: Address::repeat_byte(0xe4),
            block_hash: Some(B256::repeat_byte(0xbb)),
            block_number: Some(8059333),
            transaction_hash: Some(B256::repeat_byte(0xcc)),
            log_index: Some(0),
            topics,
            data: Bytes::new(),
            decoded: DecodedEvent {
                name: "ItemSet".to_string(),
                signature: "ItemSet(address,bytes32,bytes32)".to_string(),
                fields: vec![
                    DecodedField::new(
                        "key",
                        &DynSolType::FixedBytes(32),
                        DynSolValue::FixedBytes(B256::ZERO, 32),
                    ),
                    DecodedField::new(
                        "value",
                        &DynSolType::FixedBytes(32),
                        DynSolValue::FixedBytes(B256::repeat_byte(0xff), 32),
                    ),
                ],
            },
        }
    }

    #[test]
    fn test_render_log() {
        let log = reported(vec![B256::repeat_byte(0x0a), B256::repeat_byte(0x0b)]);
        let expected = format!(
            "find new event:\n\
             \tblock hash: 0x{bb}\n\
             \tblock num : 8059333\n\
             \ttx   hash : 0x{cc}\n\
             \tData:\n\
             \t\tkey  :{zero}\n\
             \t\tvalue:{ff}\n\
             \tTopic:\n\
             \t\ttopic[0]: 0x{t0}\n\
             \t\ttopic[1]: 0x{t1}\n",
            bb = "bb".repeat(32),
            cc = "cc".repeat(32),
            zero = "00".repeat(32),
            ff = "ff".repeat(32),
            t0 = "0a".repeat(32),
            t1 = "0b".repeat(32),
        );

        assert_eq!(render_log(&log, 5), expected);
    }

    #[test]
    fn test_render_is_idempotent() {
        let log = reported(vec![B256::repeat_byte(0x01); 3]);
        let first = render_log(&log, 5);
        assert_eq!(render_log(&log, 5), first);
        assert_eq!(topic_hex(&log.topics), topic_hex(&log.topics));
    }

    #[test]
    fn test_render_pending_log() {
        let mut log = reported(vec![]);
        log.block_hash = None;
        log.block_number = None;
        log.transaction_hash = None;

        let rendered = render_log(&log, 5);
        assert!(rendered.contains("\tblock hash: none\n"));
        assert!(rendered.contains("\tblock num : none\n"));
        assert!(rendered.contains("\ttx   hash : none\n"));
        assert!(rendered.ends_with("\tTopic:\n"));
    }

    #[test]
    fn test_topic_hex_caps_at_four() {
        let topics: Vec<B256> = (0u8..6).map(B256::repeat_byte).collect();
        let rendered = topic_hex(&topics);
        assert_eq!(rendered.len(), 4);
        assert!(rendered.iter().all(|topic| topic.len() == 66 && topic.starts_with("0x")));
    }

    #[test]
    fn test_render_signature_hash() {
        let hash = evlog_common::ether::signatures::event_signature_hash(
            evlog_common::constants::ITEM_SET_SIGNATURE,
        );
        assert_eq!(
            render_signature_hash(&hash),
            "topic hash: 0xa57f93e0f49a8b749452690bfe6acc64922a62d5f704a9e11daa132f8c145b3a\n"
        );
    }
}
