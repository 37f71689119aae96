//! Various useful things.
//!
//! This is a private module and the things in here are used throughout the
//! crate.

pub mod base64;
