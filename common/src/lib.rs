//! Shared building blocks for the QRMagic workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking, HTTP status helpers
//! - **models**: Pure data structures passed between layers
//! - **qr-core**: Encoder, decoder client and analyzer operating on models
//! - **qrmagic**: Front end wiring everything together
//!
//! Nothing in here knows about QR codes.

pub mod error;
pub mod http_status;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
