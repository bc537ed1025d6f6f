//! Domain models for QRMagic.
//!
//! Plain data passed between the front end and `qr-core`. Models carry
//! validation but no I/O: encoding, decoding and analysis live in `qr-core`.

pub mod analysis_report;
pub mod color;
pub mod decoded_symbols;
pub mod encode_request;
pub mod error;
pub mod error_correction;

pub use analysis_report::AnalysisReport;
pub use color::Color;
pub use common::ErrorLocation;
pub use decoded_symbols::DecodedSymbols;
pub use encode_request::EncodeRequest;
pub use encode_request::builder::EncodeRequestBuilder;
pub use error::model_error::ModelError;
pub use error_correction::ErrorCorrectionLevel;

#[cfg(test)]
mod tests;
