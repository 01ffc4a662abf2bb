/// Name of the application, used in user-facing output.
pub const APP_NAME: &str = "mcb";

/// Version string handed to templates as `version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config map key holding the PEM bundle of an additional trust bundle.
pub const TRUST_BUNDLE_KEY: &str = "ca-bundle.crt";

/// Config map key holding the cloud provider configuration.
pub const CLOUD_CONFIG_KEY: &str = "cloud.conf";

/// Platform name used when the infrastructure status does not name one.
pub const PLATFORM_NONE: &str = "none";

/// Index of the service network host reserved for cluster DNS.
pub const CLUSTER_DNS_HOST_INDEX: u128 = 10;

/// Number of hex characters kept when displaying a tree digest.
pub const DIGEST_DISPLAY_LEN: usize = 12;
