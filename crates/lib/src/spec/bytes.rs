//! Byte fields travel as base64 strings, the same way the cluster API encodes them.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&STANDARD.encode(bytes))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
  let encoded = String::deserialize(deserializer)?;
  STANDARD.decode(encoded).map_err(de::Error::custom)
}

pub mod option {
  use super::*;

  pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match bytes {
      Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|encoded| STANDARD.decode(encoded).map_err(de::Error::custom))
      .transpose()
  }
}
