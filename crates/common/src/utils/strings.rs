use std::fmt::Write;

/// Encodes a slice of bytes into a lowercase hex string, without a `0x` prefix.
///
/// ```
/// use evlog_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::with_capacity(s.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Left-aligns `label` in a column `width` characters wide.
///
/// ```
/// use evlog_common::utils::strings::pad_label;
///
/// assert_eq!(pad_label("key", 5), "key  ");
/// assert_eq!(pad_label("value", 3), "value");
/// ```
pub fn pad_label(label: &str, width: usize) -> String {
    format!("{label:<width$}")
}
