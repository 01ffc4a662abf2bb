//! Scheme-based decoding of configuration payloads.
//!
//! Decoding happens in two steps: the payload's `apiVersion`/`kind` pair picks a
//! registered record type, then [`decode`] checks the result against the type the
//! caller expected. Handing the proxy file to the infrastructure slot therefore
//! fails with [`DecodeError::TypeMismatch`] instead of a confusing field error.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ConfigMap, Dns, Infrastructure, Network, Proxy, TypeMeta};

/// Group version of the cluster configuration records.
pub const CONFIG_V1: &str = "config.openshift.io/v1";

/// Group version of core records (config maps).
pub const CORE_V1: &str = "v1";

/// Errors that can occur while decoding a payload.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("malformed payload: {0}")]
  Malformed(#[from] serde_yaml::Error),

  #[error("Object 'apiVersion' is missing in payload")]
  MissingApiVersion,

  #[error("Object 'Kind' is missing in payload")]
  MissingKind,

  #[error("no kind \"{kind}\" is registered for version \"{api_version}\"")]
  UnknownKind { api_version: String, kind: String },

  #[error("expected {expected} found {found}")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },
}

/// Any record the scheme knows how to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
  Infrastructure(Infrastructure),
  Proxy(Proxy),
  Network(Network),
  Dns(Dns),
  ConfigMap(ConfigMap),
}

impl Object {
  pub fn kind(&self) -> &'static str {
    match self {
      Object::Infrastructure(_) => Infrastructure::KIND,
      Object::Proxy(_) => Proxy::KIND,
      Object::Network(_) => Network::KIND,
      Object::Dns(_) => Dns::KIND,
      Object::ConfigMap(_) => ConfigMap::KIND,
    }
  }
}

/// A record type registered in the scheme.
pub trait Resource: DeserializeOwned + Sized {
  const API_VERSION: &'static str;
  const KIND: &'static str;

  /// Take the record out of `object`, handing the object back on a mismatch.
  fn from_object(object: Object) -> Result<Self, Object>;
}

macro_rules! register {
  ($ty:ident, $api_version:expr, $kind:literal) => {
    impl Resource for $ty {
      const API_VERSION: &'static str = $api_version;
      const KIND: &'static str = $kind;

      fn from_object(object: Object) -> Result<Self, Object> {
        match object {
          Object::$ty(inner) => Ok(inner),
          other => Err(other),
        }
      }
    }
  };
}

register!(Infrastructure, CONFIG_V1, "Infrastructure");
register!(Proxy, CONFIG_V1, "Proxy");
register!(Network, CONFIG_V1, "Network");
register!(Dns, CONFIG_V1, "DNS");
register!(ConfigMap, CORE_V1, "ConfigMap");

fn declares<T: Resource>(meta: &TypeMeta) -> bool {
  meta.api_version == T::API_VERSION && meta.kind == T::KIND
}

fn decode_as<T: Resource>(value: serde_yaml::Value) -> Result<T, DecodeError> {
  Ok(serde_yaml::from_value(value)?)
}

/// Decode a YAML or JSON payload into whichever registered record it declares.
pub fn decode_object(data: &[u8]) -> Result<Object, DecodeError> {
  let value: serde_yaml::Value = serde_yaml::from_slice(data)?;
  let meta: TypeMeta = serde_yaml::from_value(value.clone())?;

  if meta.api_version.is_empty() {
    return Err(DecodeError::MissingApiVersion);
  }
  if meta.kind.is_empty() {
    return Err(DecodeError::MissingKind);
  }

  let object = if declares::<Infrastructure>(&meta) {
    Object::Infrastructure(decode_as(value)?)
  } else if declares::<Proxy>(&meta) {
    Object::Proxy(decode_as(value)?)
  } else if declares::<Network>(&meta) {
    Object::Network(decode_as(value)?)
  } else if declares::<Dns>(&meta) {
    Object::Dns(decode_as(value)?)
  } else if declares::<ConfigMap>(&meta) {
    Object::ConfigMap(decode_as(value)?)
  } else {
    return Err(DecodeError::UnknownKind {
      api_version: meta.api_version,
      kind: meta.kind,
    });
  };

  Ok(object)
}

/// Decode a payload that must be a `T`.
pub fn decode<T: Resource>(data: &[u8]) -> Result<T, DecodeError> {
  T::from_object(decode_object(data)?).map_err(|other| DecodeError::TypeMismatch {
    expected: T::KIND,
    found: other.kind(),
  })
}
