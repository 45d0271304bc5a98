//! Layout encoding and catalog lookup.
//!
//! - **code**: canonical string encoding of a room grid (the Layout Encoder)
//! - **catalog**: the static set of known layouts and wildcard matching against it

mod catalog;
mod code;

pub use catalog::*;
pub use code::*;
