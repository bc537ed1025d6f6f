//! Handlers behind the two user flows.
//!
//! Each handler takes one immutable form value built from the user's
//! controls, validates it, calls into `qr-core`, and returns a value the
//! caller renders. Nothing is kept between calls.

pub mod decode;
pub mod generate;
