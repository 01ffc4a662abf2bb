//! Manifest rendering.
//!
//! Templates see a [`RenderConfig`]: the controller config plus a small side
//! bundle (serving CA text, images, API server endpoint, on-prem VIPs). The
//! [`Renderer`] trait is the seam between planning and the template engine;
//! [`TemplateRenderer`] is the Tera-backed implementation.

mod embedded;
mod template;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::consts::VERSION;
use crate::images::{Images, RenderConfigImages};
use crate::platform::{PlatformVariant, platform_variants};
use crate::resource::Infrastructure;
use crate::spec::ControllerConfigSpec;

pub use embedded::EMBEDDED_TEMPLATES;
pub use template::TemplateRenderer;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("template not found: {0}")]
  NotFound(String),

  #[error("invalid template {name}: {message}")]
  Parse { name: String, message: String },

  #[error("failed to read template {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to build render context: {0}")]
  Context(String),

  #[error("failed to render template {name}: {message}")]
  Render { name: String, message: String },
}

/// Turns a template name and the render config into the final bytes.
pub trait Renderer {
  fn render(&self, template: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError>;
}

/// Everything a template can reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderConfig {
  /// Empty at bootstrap; templates pick their own namespace.
  pub target_namespace: String,
  pub version: String,
  pub controller_config: ControllerConfigSpec,
  pub kube_api_server_serving_ca: String,
  pub api_server_url: String,
  pub images: RenderConfigImages,
  pub api_vip: String,
  pub ingress_vip: String,
}

impl RenderConfig {
  /// The render config used for bootstrap manifests.
  pub fn bootstrap(
    spec: ControllerConfigSpec,
    kube_api_server_serving_ca: &str,
    images: &Images,
    api_server_url: &str,
  ) -> Self {
    let (api_vip, ingress_vip) = spec.infra.as_ref().map(on_prem_vips).unwrap_or_default();
    Self {
      target_namespace: String::new(),
      version: VERSION.to_string(),
      controller_config: spec,
      kube_api_server_serving_ca: kube_api_server_serving_ca.to_string(),
      api_server_url: api_server_url.to_string(),
      images: images.render_images(),
      api_vip,
      ingress_vip,
    }
  }
}

/// API and ingress VIPs of the first populated on-prem status block.
fn on_prem_vips(infra: &Infrastructure) -> (String, String) {
  let Some(status) = infra.status.platform_status.as_ref() else {
    return Default::default();
  };
  platform_variants(status)
    .into_iter()
    .find_map(|variant| match variant {
      PlatformVariant::BareMetal(s)
      | PlatformVariant::Ovirt(s)
      | PlatformVariant::Kubevirt(s)
      | PlatformVariant::VSphere(s) => Some((s.api_server_internal_ip.clone(), s.ingress_ip.clone())),
      PlatformVariant::OpenStack(s) => Some((s.api_server_internal_ip.clone(), s.ingress_ip.clone())),
      PlatformVariant::Aws(_) | PlatformVariant::Azure(_) | PlatformVariant::Gcp(_) => None,
    })
    .unwrap_or_default()
}
