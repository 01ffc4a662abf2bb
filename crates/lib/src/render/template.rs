use std::collections::HashMap;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tera::{Context, Tera, Value};
use walkdir::WalkDir;

use super::embedded::EMBEDDED_TEMPLATES;
use super::{RenderConfig, RenderError, Renderer};

/// Tera-backed [`Renderer`].
///
/// Besides the Tera builtins, templates get two filters:
/// - `b64enc`: base64 of a string value
/// - `nindent(width=N)`: a newline followed by the value with every line indented by `N` spaces
pub struct TemplateRenderer {
  tera: Tera,
}

impl TemplateRenderer {
  /// A renderer holding only the templates compiled into the binary.
  pub fn from_embedded() -> Result<Self, RenderError> {
    let mut renderer = Self { tera: new_tera() };
    for (name, content) in EMBEDDED_TEMPLATES {
      renderer.add_template(name, content)?;
    }
    Ok(renderer)
  }

  /// Overlay every file under `dir` on top of the current templates.
  ///
  /// A file's template name is its path relative to `dir` with `/` separators,
  /// so `dir/manifests/master.machineconfigpool.yaml` replaces the embedded
  /// pool template.
  pub fn with_dir(mut self, dir: &Path) -> Result<Self, RenderError> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
      let entry = entry.map_err(|err| {
        let path = err.path().unwrap_or(dir).to_path_buf();
        RenderError::Read {
          path,
          source: err.into(),
        }
      })?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let Ok(relative) = path.strip_prefix(dir) else {
        continue;
      };
      let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      let content = std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
      })?;
      self.add_template(&name, &content)?;
    }
    Ok(self)
  }

  /// Register (or replace) a single template.
  pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), RenderError> {
    self.tera.add_raw_template(name, content).map_err(|err| RenderError::Parse {
      name: name.to_string(),
      message: error_chain(&err),
    })
  }

  pub fn has_template(&self, name: &str) -> bool {
    self.tera.get_template_names().any(|n| n == name)
  }

  /// All registered template names, sorted.
  pub fn template_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
    names.sort();
    names
  }
}

impl Renderer for TemplateRenderer {
  fn render(&self, template: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    if !self.has_template(template) {
      return Err(RenderError::NotFound(template.to_string()));
    }
    let context = Context::from_serialize(config).map_err(|err| RenderError::Context(error_chain(&err)))?;
    self
      .tera
      .render(template, &context)
      .map(String::into_bytes)
      .map_err(|err| RenderError::Render {
        name: template.to_string(),
        message: error_chain(&err),
      })
  }
}

fn new_tera() -> Tera {
  let mut tera = Tera::default();
  tera.register_filter("b64enc", b64enc);
  tera.register_filter("nindent", nindent);
  tera
}

/// Tera hides the useful part of an error in its source chain.
fn error_chain(err: &tera::Error) -> String {
  let mut message = err.to_string();
  let mut source = std::error::Error::source(err);
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}

fn b64enc(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
  let text = value
    .as_str()
    .ok_or_else(|| tera::Error::msg("filter `b64enc` expects a string"))?;
  Ok(Value::String(STANDARD.encode(text)))
}

fn nindent(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
  let text = value
    .as_str()
    .ok_or_else(|| tera::Error::msg("filter `nindent` expects a string"))?;
  let width = match args.get("width") {
    Some(width) => width
      .as_u64()
      .ok_or_else(|| tera::Error::msg("filter `nindent` expects an integer `width`"))?,
    None => 4,
  };
  let pad = " ".repeat(width as usize);

  let mut out = String::with_capacity(text.len() + 16);
  for line in text.lines() {
    out.push('\n');
    if !line.is_empty() {
      out.push_str(&pad);
      out.push_str(line);
    }
  }
  Ok(Value::String(out))
}
