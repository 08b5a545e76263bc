use std::io;

/// An edge shared by more than two triangles.
///
/// Carries the edge's two vertex slots, the triangles already registered on
/// it and the input triangle that tried to register as an extra one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "non-manifold input: edge ({}, {}) is already shared by triangles {attached:?}, triangle {triangle} cannot be added",
    edge.0,
    edge.1
)]
pub struct TopologyError {
    pub edge: (u32, u32),
    pub attached: Vec<usize>,
    pub triangle: usize,
}

/// All error types for the strip compiler and its pipeline.
#[derive(thiserror::Error, Debug)]
pub enum StripError {
    #[error("Input error: {0}")]
    Input(String),
    #[error("Invalid index buffer: {0}")]
    InvalidInput(String),
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
    #[error("Output error: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StripError>;
