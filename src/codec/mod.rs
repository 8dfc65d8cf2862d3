//! Decoders for legacy storage formats

pub mod php;

pub use php::{decode_justifications, unserialize, PhpValue};
