pub mod tessellator;
pub mod tube;

pub use tessellator::{MeshParams, TreeMesher};
pub use tube::{Mesh, Vertex};
