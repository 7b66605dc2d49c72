use alloy::primitives::B256;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use evlog_common::utils::strings::encode_hex;
use serde::Serialize;

use crate::error::Error;

/// One decoded data parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedField {
    /// Parameter name.
    pub name: String,
    /// Solidity type, e.g. `bytes32`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Lowercase hex of the value, without a `0x` prefix.
    pub hex: String,
    /// The decoded value.
    #[serde(skip)]
    pub value: DynSolValue,
}

impl DecodedField {
    pub(crate) fn new(name: &str, ty: &DynSolType, value: DynSolValue) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.sol_type_name().into_owned(),
            hex: value_hex(&value),
            value,
        }
    }
}

/// `bytesN` and `address` render as their raw bytes, everything else as its ABI encoding.
fn value_hex(value: &DynSolValue) -> String {
    match value {
        DynSolValue::FixedBytes(word, size) => encode_hex(&word[..*size]),
        DynSolValue::Address(address) => encode_hex(address.as_slice()),
        value => encode_hex(&value.abi_encode()),
    }
}

/// The decoded data parameters of one log, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedEvent {
    /// Event name.
    pub name: String,
    /// Canonical event signature.
    pub signature: String,
    /// Decoded data parameters.
    pub fields: Vec<DecodedField>,
}

impl DecodedEvent {
    /// The field called `name`, if any.
    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The payload of the Store contract's `ItemSet` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemSet {
    /// The item key.
    pub key: B256,
    /// The value stored under `key`.
    pub value: B256,
}

impl TryFrom<&DecodedEvent> for ItemSet {
    type Error = Error;

    fn try_from(event: &DecodedEvent) -> Result<Self, Self::Error> {
        if event.name != "ItemSet" {
            return Err(Error::DecodeError(format!(
                "expected an ItemSet event, got '{}'",
                event.name
            )));
        }

        let word = |name: &str| match event.field(name).map(|field| &field.value) {
            Some(DynSolValue::FixedBytes(word, 32)) => Ok(*word),
            Some(other) => Err(Error::DecodeError(format!(
                "ItemSet field '{name}' is {other:?}, expected bytes32"
            ))),
            None => Err(Error::DecodeError(format!("ItemSet has no field '{name}'"))),
        };

        Ok(Self { key: word("key")?, value: word("value")? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    fn item_set(key: DynSolValue, value: DynSolValue) -> DecodedEvent {
        DecodedEvent {
            name: "ItemSet".to_string(),
            signature: "ItemSet(address,bytes32,bytes32)".to_string(),
            fields: vec![
                DecodedField::new("key", &DynSolType::FixedBytes(32), key),
                DecodedField::new("value", &DynSolType::FixedBytes(32), value),
            ],
        }
    }

    #[test]
    fn test_value_hex() {
        let ff = DynSolValue::FixedBytes(B256::repeat_byte(0xff), 32);
        let field = DecodedField::new("v", &DynSolType::FixedBytes(32), ff);
        assert_eq!(field.hex, "ff".repeat(32));
        assert_eq!(field.ty, "bytes32");

        let mut word = B256::ZERO;
        word[0] = 0xab;
        word[1] = 0xcd;
        let short =
            DecodedField::new("s", &DynSolType::FixedBytes(2), DynSolValue::FixedBytes(word, 2));
        assert_eq!(short.hex, "abcd");

        let addr = DecodedField::new(
            "a",
            &DynSolType::Address,
            DynSolValue::Address(Address::repeat_byte(0x01)),
        );
        assert_eq!(addr.hex, "01".repeat(20));

        let uint =
            DecodedField::new("u", &DynSolType::Uint(256), DynSolValue::Uint(U256::from(255), 256));
        assert_eq!(uint.hex, format!("{}ff", "00".repeat(31)));
    }

    #[test]
    fn test_item_set_from_decoded() {
        let key = B256::repeat_byte(0x01);
        let value = B256::repeat_byte(0x02);
        let event = item_set(DynSolValue::FixedBytes(key, 32), DynSolValue::FixedBytes(value, 32));

        assert_eq!(ItemSet::try_from(&event).expect("is an ItemSet"), ItemSet { key, value });
    }

    #[test]
    fn test_item_set_rejects_other_shapes() {
        let mut event = item_set(
            DynSolValue::FixedBytes(B256::ZERO, 32),
            DynSolValue::Uint(U256::from(1), 256),
        );
        assert!(matches!(ItemSet::try_from(&event), Err(Error::DecodeError(_))));

        event.fields.pop();
        assert!(matches!(ItemSet::try_from(&event), Err(Error::DecodeError(_))));

        event.name = "Other".to_string();
        assert!(matches!(ItemSet::try_from(&event), Err(Error::DecodeError(_))));
    }

    #[test]
    fn test_serialize_skips_raw_value() {
        let event = item_set(
            DynSolValue::FixedBytes(B256::ZERO, 32),
            DynSolValue::FixedBytes(B256::ZERO, 32),
        );
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["fields"][0]["type"], "bytes32");
        assert_eq!(json["fields"][0]["hex"], "00".repeat(32));
        assert!(json["fields"][0].get("value").is_none());
    }
}
