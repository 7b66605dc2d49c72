/// Connection to an Ethereum node and the log source abstraction.
pub mod provider;

/// Event signature normalization and hashing.
pub mod signatures;
