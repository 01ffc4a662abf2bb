//! Baseline settings discovered from the cluster configuration records.
//!
//! This is the first step of building the controller config: everything that
//! follows directly from Infrastructure, Network, Proxy and DNS without looking
//! at any other input.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;

use crate::consts::{CLUSTER_DNS_HOST_INDEX, PLATFORM_NONE};
use crate::resource::{Dns, Infrastructure, Network, Proxy};
use crate::spec::ControllerConfigSpec;

/// Errors that can occur during discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
  #[error("service network is empty in Network")]
  EmptyServiceNetwork,

  #[error("invalid CIDR address {cidr}: {reason}")]
  InvalidCidr { cidr: String, reason: String },

  #[error("CIDR {cidr} has no host {index}")]
  HostOutOfRange { cidr: String, index: u128 },
}

/// Build the discovered part of the controller config.
pub fn discover_controller_config(
  infra: &Infrastructure,
  network: &Network,
  proxy: &Proxy,
  dns: &Dns,
) -> Result<ControllerConfigSpec, DiscoverError> {
  let service_cidr = network
    .spec
    .service_network
    .first()
    .ok_or(DiscoverError::EmptyServiceNetwork)?;
  let dns_ip = cluster_dns_ip(service_cidr)?;

  Ok(ControllerConfigSpec {
    cluster_dns_ip: dns_ip.to_string(),
    cloud_provider_config: String::new(),
    etcd_discovery_domain: infra.status.etcd_discovery_domain.clone(),
    platform: platform_name(infra),
    proxy: Some(proxy.status.clone()),
    infra: Some(infra.clone()),
    dns: Some(dns.clone()),
    ..Default::default()
  })
}

/// Lowercased platform type, falling back to the deprecated status field.
pub fn platform_name(infra: &Infrastructure) -> String {
  let from_status = infra
    .status
    .platform_status
    .as_ref()
    .map(|status| status.platform_type.as_str())
    .filter(|name| !name.is_empty());

  match from_status {
    Some(name) => name.to_lowercase(),
    None if !infra.status.platform.is_empty() => infra.status.platform.to_lowercase(),
    None => PLATFORM_NONE.to_string(),
  }
}

/// The cluster DNS service address: host 10 of the service CIDR.
pub fn cluster_dns_ip(service_cidr: &str) -> Result<IpAddr, DiscoverError> {
  cidr_host(service_cidr, CLUSTER_DNS_HOST_INDEX)
}

/// The `index`th address of the network `cidr` describes.
pub fn cidr_host(cidr: &str, index: u128) -> Result<IpAddr, DiscoverError> {
  let invalid = |reason: &str| DiscoverError::InvalidCidr {
    cidr: cidr.to_string(),
    reason: reason.to_string(),
  };

  let (addr, prefix) = cidr.split_once('/').ok_or_else(|| invalid("missing prefix length"))?;
  let addr: IpAddr = addr.trim().parse().map_err(|_| invalid("bad address"))?;
  let prefix: u32 = prefix.trim().parse().map_err(|_| invalid("bad prefix length"))?;

  let (bits, value) = match addr {
    IpAddr::V4(v4) => (32, u128::from(u32::from(v4))),
    IpAddr::V6(v6) => (128, u128::from(v6)),
  };
  if prefix > bits {
    return Err(invalid("prefix length out of range"));
  }

  let host_bits = bits - prefix;
  if host_bits < 128 && index >= (1u128 << host_bits) {
    return Err(DiscoverError::HostOutOfRange {
      cidr: cidr.to_string(),
      index,
    });
  }

  let host_mask = if host_bits == 128 { u128::MAX } else { (1u128 << host_bits) - 1 };
  let host = (value & !host_mask) | index;

  Ok(match addr {
    // The host fits in 32 bits: the network part came from a v4 address and
    // index is below 2^host_bits.
    IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(host as u32)),
    IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(host)),
  })
}
