pub mod mesh;
pub mod strip;

pub use mesh::IndexedMesh;
pub use strip::{StripOutput, StripStats};
