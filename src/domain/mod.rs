//! The two core operations, each a vertical slice:
//! - `mod.rs`: pure logic (filtering, transaction construction)
//! - `client.rs`: sub-client that drives the ledger calls

pub mod discovery;
pub mod revocation;
