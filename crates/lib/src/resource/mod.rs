//! Typed configuration records and their decoder.
//!
//! Every input payload carries `apiVersion` and `kind`; [`decode`] resolves the
//! pair against the registered scheme and then checks that the decoded record is
//! the type the caller asked for.

mod scheme;
mod types;

pub use scheme::{CONFIG_V1, CORE_V1, DecodeError, Object, Resource, decode, decode_object};
pub use types::*;
