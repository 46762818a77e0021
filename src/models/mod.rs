//! Placement data models
//!
//! Core data structures for students, companies, per-pair round-clearance
//! records, and the boundary snapshot types exchanged with the
//! persistence/transport collaborators.

pub mod company;
pub mod record;
pub mod round;
pub mod snapshot;
pub mod student;

pub use company::*;
pub use record::*;
pub use round::*;
pub use snapshot::*;
pub use student::*;
