use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};

use serde::Serialize;
use tracing::info;

use crate::config::{OutputFormat, PipelineConfig};
use crate::error::{Result, StripError};
use crate::pipeline::MeshStrips;
use crate::types::StripStats;

#[derive(Serialize)]
struct Report<'a> {
    input: String,
    input_format: &'a str,
    allow_swaps: bool,
    concatenated: bool,
    totals: &'a StripStats,
    meshes: &'a [MeshStrips],
}

/// Render the report for a pipeline run.
pub fn render_report(
    input_format: &str,
    meshes: &[MeshStrips],
    totals: &StripStats,
    config: &PipelineConfig,
) -> Result<String> {
    match config.format {
        OutputFormat::Json => {
            let report = Report {
                input: config.input.display().to_string(),
                input_format,
                allow_swaps: config.strip.allow_swaps,
                concatenated: config.strip.concatenate,
                totals,
                meshes,
            };
            serde_json::to_string_pretty(&report)
                .map_err(|e| StripError::Output(format!("Failed to serialize report: {e}")))
        }
        OutputFormat::Text => Ok(render_text(meshes, totals)),
    }
}

/// Plain text layout: one header line per mesh, then one strip per line.
fn render_text(meshes: &[MeshStrips], totals: &StripStats) -> String {
    let mut out = String::new();
    for mesh in meshes {
        let _ = writeln!(
            out,
            "# {} ({} triangles, {} strips, {} indices)",
            mesh.name, mesh.stats.triangles, mesh.stats.strips, mesh.stats.indices
        );
        for strip in mesh.strips.as_strips() {
            let line: Vec<String> = strip.iter().map(u32::to_string).collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
    }
    let _ = writeln!(
        out,
        "# total: {} triangles, {} strips, {} indices ({:.3} per triangle)",
        totals.triangles,
        totals.strips,
        totals.indices,
        totals.indices_per_triangle()
    );
    out
}

/// Write the report to `config.output`, or to stdout when unset.
pub fn write_report(
    input_format: &str,
    meshes: &[MeshStrips],
    totals: &StripStats,
    config: &PipelineConfig,
) -> Result<()> {
    let report = render_report(input_format, meshes, totals, config)?;

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &report).map_err(|e| {
                StripError::Output(format!("Failed to write {}: {e}", path.display()))
            })?;
            info!(output = %path.display(), format = %config.format, "Wrote strip report");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            if !report.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    Ok(())
}
