use std::path::PathBuf;

use clap::Parser;

/// What to do when an edge is claimed by a third triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifoldPolicy {
    /// Abort graph construction with a `TopologyError`.
    #[default]
    Fatal,
    /// Record the violation and link the triangle anyway.
    Tolerant,
}

/// Report format written by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[value(name = "json")]
    Json,
    #[value(name = "text")]
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Stripification parameters for a single index buffer.
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Let growth cross the second edge of the leading triangle.
    pub allow_swaps: bool,
    /// Stitch all strips into one using degenerate joins.
    pub concatenate: bool,
    /// Raise `TopologyError` on an edge with more than two triangles.
    pub fatal_on_non_manifold: bool,
    /// Reject indices at or above this slot count when set.
    pub vertex_count: Option<usize>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            allow_swaps: false,
            concatenate: false,
            fatal_on_non_manifold: true,
            vertex_count: None,
        }
    }
}

impl StripConfig {
    pub fn manifold_policy(&self) -> ManifoldPolicy {
        if self.fatal_on_non_manifold {
            ManifoldPolicy::Fatal
        } else {
            ManifoldPolicy::Tolerant
        }
    }
}

/// Fully resolved pipeline configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub strip: StripConfig,
    pub optimize_cache: bool,
    pub verbose: bool,
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            format: OutputFormat::Json,
            strip: StripConfig::default(),
            optimize_cache: false,
            verbose: false,
            threads: None,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "tristrip",
    about = "Triangle list to triangle strip compiler",
    version
)]
pub struct CliArgs {
    /// Input file (OBJ, PLY, glTF, GLB, JSON)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Report format: json or text
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Allow vertex swaps during strip growth
    #[arg(long)]
    pub swaps: bool,

    /// Join all strips of a mesh into one strip
    #[arg(long)]
    pub concatenate: bool,

    /// Keep going when an edge is shared by more than two triangles
    #[arg(long)]
    pub tolerate_non_manifold: bool,

    /// Reorder triangles for vertex cache locality before stripping
    #[arg(long)]
    pub optimize_cache: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for PipelineConfig {
    fn from(args: CliArgs) -> Self {
        PipelineConfig {
            input: args.input,
            output: args.output,
            format: args.format,
            strip: StripConfig {
                allow_swaps: args.swaps,
                concatenate: args.concatenate,
                fatal_on_non_manifold: !args.tolerate_non_manifold,
                vertex_count: None,
            },
            optimize_cache: args.optimize_cache,
            verbose: args.verbose,
            threads: args.threads,
        }
    }
}
