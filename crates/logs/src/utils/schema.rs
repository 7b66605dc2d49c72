use alloy::primitives::B256;
use alloy_dyn_abi::{DynSolType, Specifier};
use alloy_json_abi::{Event, JsonAbi};
use hashbrown::HashMap;
use tracing::trace;

use crate::error::Error;

/// A single named, typed event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventField {
    /// Parameter name. Unnamed parameters are called `arg{index}`.
    pub name: String,
    /// Resolved Solidity type.
    pub ty: DynSolType,
}

/// The shape of one event: its indexed parameters (carried in topics) and its data parameters
/// (carried in the payload), each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchema {
    /// Event name, e.g. `ItemSet`.
    pub name: String,
    /// Canonical signature, e.g. `ItemSet(address,bytes32,bytes32)`.
    pub signature: String,
    /// keccak-256 of the signature; `topic[0]` of every non-anonymous emission.
    pub selector: B256,
    /// Anonymous events do not put their selector in `topic[0]`.
    pub anonymous: bool,
    /// Parameters declared `indexed`.
    pub indexed: Vec<EventField>,
    /// Parameters ABI-encoded into the log payload.
    pub data: Vec<EventField>,
}

impl EventSchema {
    /// Builds the schema for a parsed ABI event.
    pub fn from_event(event: &Event) -> Result<Self, Error> {
        let mut indexed = Vec::new();
        let mut data = Vec::new();

        for (i, param) in event.inputs.iter().enumerate() {
            let ty = param.resolve().map_err(|e| {
                Error::FormatError(format!(
                    "event '{}' has an unresolvable type '{}': {e}",
                    event.name, param.ty
                ))
            })?;
            let name = if param.name.is_empty() { format!("arg{i}") } else { param.name.clone() };

            if param.indexed {
                indexed.push(EventField { name, ty });
            } else {
                data.push(EventField { name, ty });
            }
        }

        Ok(Self {
            name: event.name.clone(),
            signature: event.signature(),
            selector: event.selector(),
            anonymous: event.anonymous,
            indexed,
            data,
        })
    }

    /// Whether every data parameter occupies a fixed number of 32-byte words.
    pub fn is_fixed_width(&self) -> bool {
        self.data.iter().all(|field| !field.ty.is_dynamic())
    }

    /// Number of payload bytes the data parameters occupy, or `None` when that does not fit in
    /// a `usize`. Only meaningful for fixed-width schemas.
    pub fn data_width(&self) -> Option<usize> {
        self.data
            .iter()
            .try_fold(0usize, |words, field| words.checked_add(static_words(&field.ty)?))?
            .checked_mul(32)
    }

    /// Width of the widest data parameter name, used to align report labels.
    pub fn label_width(&self) -> usize {
        self.data.iter().map(|field| field.name.len()).max().unwrap_or(0)
    }
}

fn static_words(ty: &DynSolType) -> Option<usize> {
    match ty {
        DynSolType::Tuple(types) => {
            types.iter().try_fold(0usize, |words, ty| words.checked_add(static_words(ty)?))
        }
        DynSolType::FixedArray(inner, len) => static_words(inner)?.checked_mul(*len),
        _ => Some(1),
    }
}

/// Event name (or full signature) → [`EventSchema`].
///
/// Overloaded events are reachable by their full signature; the bare name resolves to the
/// first overload declared in the ABI.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    events: HashMap<String, EventSchema>,
}

impl EventRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every event declared in `abi`.
    pub fn from_abi(abi: &JsonAbi) -> Result<Self, Error> {
        let mut registry = Self::new();
        for event in abi.events() {
            registry.register(EventSchema::from_event(event)?);
        }
        Ok(registry)
    }

    /// Adds `schema`, reachable by its signature and, unless already taken, by its name.
    pub fn register(&mut self, schema: EventSchema) {
        trace!("registering event schema '{}'", schema.signature);
        self.events.entry(schema.name.clone()).or_insert_with(|| schema.clone());
        self.events.insert(schema.signature.clone(), schema);
    }

    /// Looks an event up by name or signature.
    pub fn get(&self, key: &str) -> Option<&EventSchema> {
        self.events.get(key)
    }

    /// Names and signatures of all registered events, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.events.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
