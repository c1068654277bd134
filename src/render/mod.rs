pub mod backend;
pub mod blit;
pub mod direct;
pub mod layout;
pub mod optimized;
pub(crate) mod raster;
pub mod scene_graph;
pub mod surface;
