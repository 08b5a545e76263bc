use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tristrip::config::{CliArgs, PipelineConfig};
use tristrip::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr so the report can be piped from stdout
    let filter = if args.verbose {
        EnvFilter::new("tristrip=debug")
    } else {
        EnvFilter::new("tristrip=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config: PipelineConfig = args.into();

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            info!(
                meshes = result.meshes.len(),
                triangles = result.totals.triangles,
                strips = result.totals.strips,
                indices_per_triangle = result.totals.indices_per_triangle(),
                "Done in {:.2}s",
                result.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(%e, "Pipeline failed");
            Err(anyhow::anyhow!(e)).context("tristrip pipeline failed")
        }
    }
}
