//! Implementation of the `mcb plan` command.
//!
//! Loads and decodes every input, builds the controller config, and prints the
//! manifests a render would write. Nothing is written.

use anyhow::{Context, Result};
use serde::Serialize;

use mcb_lib::bootstrap::prepare;
use mcb_lib::manifest::{ManifestEntry, ManifestSource};
use mcb_lib::observe::TracingObserver;
use mcb_lib::util::hash::Hashable;

use super::load_images;
use crate::config::{InputArgs, resolve};
use crate::output::{Mark, OutputFormat, print_entry, print_json, print_line, print_stat};

#[derive(Serialize)]
struct PlannedEntry {
  path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  template: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  literal_bytes: Option<usize>,
  skip: bool,
}

impl From<&ManifestEntry> for PlannedEntry {
  fn from(entry: &ManifestEntry) -> Self {
    let (template, literal_bytes) = match &entry.source {
      ManifestSource::Template(name) => (Some(name.clone()), None),
      ManifestSource::Literal(data) => (None, Some(data.len())),
      ManifestSource::Skip => (None, None),
    };
    Self {
      path: entry.path.display().to_string(),
      template,
      literal_bytes,
      skip: entry.is_skip(),
    }
  }
}

#[derive(Serialize)]
struct PlanOutput {
  spec_hash: String,
  platform: String,
  cluster_dns_ip: String,
  extensions: Vec<&'static str>,
  entries: Vec<PlannedEntry>,
}

pub fn cmd_plan(args: &InputArgs, verbose: bool, format: OutputFormat) -> Result<()> {
  let inputs = resolve(args, false)?;
  let images = load_images(&inputs.images_file)?;

  let prepared = prepare(&inputs.options, &images, &TracingObserver)?;
  let spec = &prepared.config.controller_config;
  let spec_hash = spec.compute_hash().context("Failed to hash the controller config")?;
  let extensions: Vec<&'static str> = prepared.platforms.iter().map(|p| p.as_str()).collect();

  if format.is_json() {
    return print_json(&PlanOutput {
      spec_hash: spec_hash.0,
      platform: spec.platform.clone(),
      cluster_dns_ip: spec.cluster_dns_ip.clone(),
      extensions,
      entries: prepared.entries.iter().map(PlannedEntry::from).collect(),
    });
  }

  println!("Plan: {}", spec_hash);
  print_stat("Platform", &spec.platform);
  print_stat("Cluster DNS IP", &spec.cluster_dns_ip);
  if extensions.is_empty() {
    print_stat("Extensions", "none");
  } else {
    print_stat("Extensions", &extensions.join(", "));
  }
  println!();

  let mut writes = 0;
  for entry in &prepared.entries {
    match &entry.source {
      ManifestSource::Template(_) | ManifestSource::Literal(_) => {
        writes += 1;
        print_entry(Mark::Write, &entry.path, Some(entry.description().as_str()));
      }
      ManifestSource::Skip if verbose => print_entry(Mark::Skip, &entry.path, Some(entry.description().as_str())),
      ManifestSource::Skip => {}
    }
  }

  println!();
  print_line(Mark::Note, &format!("Would write {} manifest(s)", writes));
  Ok(())
}
