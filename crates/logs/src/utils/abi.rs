use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::JsonAbi;
use evlog_common::utils::io::file::read_file;
use tracing::{debug, trace, warn};

use crate::{
    error::Error,
    interfaces::{DecodedEvent, DecodedField},
    utils::schema::{EventRegistry, EventSchema},
};

/// A parsed contract ABI together with the schema of every event it declares.
///
/// Parsed once, then shared read-only by every decode.
#[derive(Debug, Clone)]
pub struct AbiDescriptor {
    abi: JsonAbi,
    registry: EventRegistry,
}

impl AbiDescriptor {
    /// Parses a JSON ABI. Accepts either the bare ABI array or a compiler artifact carrying it
    /// under an `abi` key.
    pub fn parse(json: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::FormatError(format!("malformed ABI JSON: {e}")))?;

        let value = match value {
            serde_json::Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
                Error::FormatError("expected an ABI array or an artifact with an 'abi' key".into())
            })?,
            value => value,
        };

        let abi: JsonAbi = serde_json::from_value(value)
            .map_err(|e| Error::FormatError(format!("invalid ABI: {e}")))?;
        let registry = EventRegistry::from_abi(&abi)?;
        debug!("parsed ABI with {} events", abi.events().count());

        Ok(Self { abi, registry })
    }

    /// Reads and parses the ABI at `path`.
    pub fn from_file(path: &str) -> Result<Self, Error> {
        let contents = read_file(path)
            .map_err(|e| Error::FormatError(format!("failed to read ABI file '{path}': {e}")))?;
        Self::parse(&contents)
    }

    /// The underlying ABI.
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Looks up an event by name or signature.
    pub fn event(&self, name: &str) -> Result<&EventSchema, Error> {
        self.registry.get(name).ok_or_else(|| {
            Error::FormatError(format!(
                "event '{name}' is not declared in the ABI (known events: {})",
                self.registry.keys().join(", ")
            ))
        })
    }

    /// Decodes the payload of an `event` log.
    pub fn decode_payload(&self, event: &str, data: &[u8]) -> Result<DecodedEvent, Error> {
        decode_payload(self.event(event)?, data)
    }
}

/// Payload bytes `schema` occupies. Fails for dynamic layouts and for layouts too large to
/// address.
pub(crate) fn layout_width(schema: &EventSchema) -> Result<usize, Error> {
    if !schema.is_fixed_width() {
        return Err(Error::FormatError(format!(
            "event '{}' has dynamic data parameters, only fixed-width layouts can be decoded",
            schema.signature
        )));
    }

    schema.data_width().ok_or_else(|| {
        Error::FormatError(format!("event '{}' has an oversized data layout", schema.signature))
    })
}

/// Decodes a log payload into the data parameters of `schema`, in declaration order.
///
/// Only fixed-width layouts are supported. The payload must be word aligned and at least as
/// long as the layout; trailing words past the layout are ignored.
pub fn decode_payload(schema: &EventSchema, data: &[u8]) -> Result<DecodedEvent, Error> {
    let expected = layout_width(schema)?;
    if data.len() % 32 != 0 {
        return Err(Error::DecodeError(format!(
            "payload of {} bytes is not a multiple of 32 bytes",
            data.len()
        )));
    }

    if data.len() < expected {
        return Err(Error::DecodeError(format!(
            "payload of {} bytes is shorter than the {} bytes '{}' requires",
            data.len(),
            expected,
            schema.signature
        )));
    }
    if data.len() > expected {
        warn!("ignoring {} trailing payload bytes for '{}'", data.len() - expected, schema.name);
    }

    let values = if schema.data.is_empty() {
        Vec::new()
    } else {
        let ty = DynSolType::Tuple(schema.data.iter().map(|field| field.ty.clone()).collect());
        trace!("decoding {} payload bytes as {:?}", expected, ty);

        match ty
            .abi_decode_sequence(&data[..expected])
            .map_err(|e| Error::DecodeError(format!("failed to decode payload: {e}")))?
        {
            DynSolValue::Tuple(values) if values.len() == schema.data.len() => values,
            other => {
                return Err(Error::DecodeError(format!(
                    "decoded shape {other:?} does not match '{}'",
                    schema.signature
                )))
            }
        }
    };

    let fields = schema
        .data
        .iter()
        .zip(values)
        .map(|(field, value)| DecodedField::new(&field.name, &field.ty, value))
        .collect();

    Ok(DecodedEvent {
        name: schema.name.clone(),
        signature: schema.signature.clone(),
        fields,
    })
}
