pub(crate) mod abi;
pub(crate) mod filter;
pub(crate) mod report;
pub(crate) mod schema;
