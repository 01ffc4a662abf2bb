mod plan;
mod render;

pub use plan::cmd_plan;
pub use render::cmd_render;

use std::path::Path;

use anyhow::{Context, Result};

use mcb_lib::images::Images;
use mcb_lib::render::TemplateRenderer;

fn load_images(path: &Path) -> Result<Images> {
  Images::from_file(path).with_context(|| format!("Failed to load images: {}", path.display()))
}

fn load_renderer(templates_dir: Option<&Path>) -> Result<TemplateRenderer> {
  let renderer = TemplateRenderer::from_embedded().context("Failed to load embedded templates")?;
  match templates_dir {
    Some(dir) => renderer
      .with_dir(dir)
      .with_context(|| format!("Failed to load templates from {}", dir.display())),
    None => Ok(renderer),
  }
}
