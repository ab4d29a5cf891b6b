mod context;
mod dots;
mod grouper;
pub mod loader;
mod neighbors;
mod options;
mod registry;
pub mod render;
mod shape;
mod swarm;
pub mod utils;
pub use grouper::{Grouper, Observer};
pub use swarm::{FrameStats, Swarm, SEED};

/// exported to enable observer
pub use context::{Context, Grouping};
pub use dots::{Dot, DotId, Dots, DotsBuilder};
pub use neighbors::{find_neighbors, Neighbor, Neighborhoods};
pub use options::{Boundary, Force, Options, OptionsError, TriangleOptions};
pub use registry::{
    EdgeKey, EdgeRegistry, Heat, Key, Registry, RegistryError, TriangleKey, TriangleRegistry,
};
pub use shape::{Point, Surface, Velocity};

#[cfg(not(feature = "f32"))]
pub type Float = f64;
#[cfg(feature = "f32")]
pub type Float = f32;

/// A triangle handed to rendering
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub dots: [DotId; 3],
    pub points: [Point; 3],
    pub intensity: Float,
}
