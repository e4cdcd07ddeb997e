//! Domain models for the room-hire dashboard.

pub mod listing;

pub use listing::{CategoryColumn, Dataset, RoomListing};
