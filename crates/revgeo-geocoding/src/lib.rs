//! Forward and reverse geocoding against a Nominatim-compatible service.

pub mod address;
pub mod client;
pub mod error;
pub mod types;

pub use address::parse_address;
pub use client::GeocodingClient;
pub use error::GeocodingError;
pub use types::{ForwardGeocode, ReverseGeocode};
