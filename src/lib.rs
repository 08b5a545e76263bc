pub mod config;
pub mod error;
pub mod graph;
pub mod ingestion;
pub mod output;
pub mod pipeline;
pub mod strip;
pub mod types;

pub use config::{ManifoldPolicy, PipelineConfig, StripConfig};
pub use error::{StripError, TopologyError};
pub use pipeline::Pipeline;
pub use strip::{Stripifier, stripify};
pub use types::{StripOutput, StripStats};
