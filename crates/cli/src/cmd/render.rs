//! Implementation of the `mcb render` command.
//!
//! Runs the whole bootstrap pipeline and writes the manifest tree.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use mcb_lib::bootstrap::render_bootstrap;
use mcb_lib::observe::TracingObserver;

use super::{load_images, load_renderer};
use crate::config::{InputArgs, resolve};
use crate::output::{Mark, OutputFormat, print_entry, print_json, print_line, print_stat};

#[derive(Serialize)]
struct RenderOutput<'a> {
  destination: &'a PathBuf,
  platforms: Vec<&'static str>,
  written: &'a [PathBuf],
  skipped: &'a [PathBuf],
  digest: &'a str,
}

pub fn cmd_render(args: &InputArgs, verbose: bool, format: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let inputs = resolve(args, true)?;
  let images = load_images(&inputs.images_file)?;
  let renderer = load_renderer(inputs.templates_dir.as_deref())?;

  let summary = render_bootstrap(&inputs.options, &images, &renderer, &TracingObserver)?;
  let platforms: Vec<&'static str> = summary.platforms.iter().map(|p| p.as_str()).collect();

  if format.is_json() {
    return print_json(&RenderOutput {
      destination: &inputs.options.destination_dir,
      platforms,
      written: &summary.written,
      skipped: &summary.skipped,
      digest: &summary.digest.0,
    });
  }

  print_line(
    Mark::Done,
    &format!(
      "Rendered {} manifest(s) to {}",
      summary.written.len(),
      inputs.options.destination_dir.display()
    ),
  );
  if platforms.is_empty() {
    print_stat("Platforms", "none");
  } else {
    print_stat("Platforms", &platforms.join(", "));
  }
  print_stat("Skipped", &summary.skipped.len().to_string());
  print_stat("Digest", summary.digest.short());
  print_stat("Duration", &format!("{:.2?}", start.elapsed()));

  if verbose {
    println!();
    for path in &summary.written {
      print_entry(Mark::Written, path, None);
    }
  }

  Ok(())
}
