pub mod analyzer;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;

#[cfg(test)]
mod tests;

pub use analyzer::{analyze, analyze_encoded};
pub use decoder::{DecodeRequest, DecoderSettings, QrServerClient, RetryPolicy};
pub use encoder::{EncodedImage, encode};

pub const QRSERVER_BASE_URL: &str = "https://api.qrserver.com";
pub const QRSERVER_READ_ENDPOINT: &str =
    const_format::concatcp!(QRSERVER_BASE_URL, "/v1/read-qr-code/");
