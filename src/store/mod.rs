//! Round state store module
//!
//! Maintains the authoritative (company, student) -> record mapping and
//! serializes writes per pair so concurrent toggle requests for the same
//! pair cannot interleave into a lost update. The committed state is
//! forwarded to the persistence collaborator through [`RoundWriteSink`].

mod error;
mod round_store;
mod sink;

pub use error::StoreError;
pub use round_store::{RoundStateStore, ToggleMutation};
pub use sink::{InMemorySink, RoundWriteSink};

#[cfg(test)]
mod store_tests;
