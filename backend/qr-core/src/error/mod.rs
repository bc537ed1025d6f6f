pub mod config;
pub mod decode;
pub mod encode;

pub use config::ConfigError;
pub use decode::DecodeError;
pub use encode::EncodeError;
