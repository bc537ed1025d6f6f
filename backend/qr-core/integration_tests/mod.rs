mod decoder;
mod encoder;
mod error;
mod helpers;
