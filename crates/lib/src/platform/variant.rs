use crate::resource::{
  AwsPlatformStatus, AzurePlatformStatus, GcpPlatformStatus, OnPremPlatformStatus, OpenStackPlatformStatus,
  PlatformStatus,
};

/// One populated platform status block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformVariant<'a> {
  Aws(&'a AwsPlatformStatus),
  Azure(&'a AzurePlatformStatus),
  Gcp(&'a GcpPlatformStatus),
  BareMetal(&'a OnPremPlatformStatus),
  OpenStack(&'a OpenStackPlatformStatus),
  Ovirt(&'a OnPremPlatformStatus),
  Kubevirt(&'a OnPremPlatformStatus),
  VSphere(&'a OnPremPlatformStatus),
}

/// Every populated block of `status`, each checked on its own.
pub fn platform_variants(status: &PlatformStatus) -> Vec<PlatformVariant<'_>> {
  [
    status.aws.as_ref().map(PlatformVariant::Aws),
    status.azure.as_ref().map(PlatformVariant::Azure),
    status.gcp.as_ref().map(PlatformVariant::Gcp),
    status.bare_metal.as_ref().map(PlatformVariant::BareMetal),
    status.openstack.as_ref().map(PlatformVariant::OpenStack),
    status.ovirt.as_ref().map(PlatformVariant::Ovirt),
    status.kubevirt.as_ref().map(PlatformVariant::Kubevirt),
    status.vsphere.as_ref().map(PlatformVariant::VSphere),
  ]
  .into_iter()
  .flatten()
  .collect()
}
