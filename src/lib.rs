// Placetrack Core Library
// Round-clearance state tracking and placement analytics for the placement cell dashboard

pub mod analytics;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use error::{AppError, ErrorResponse};
pub use store::{RoundStateStore, StoreError, ToggleMutation};
