//! Debug visualization: 2D images of a generated terrain.
//!
//! [`render_heightmap_debug`] colours each vertex by its height relative to the
//! pass's tracked [`HeightRange`](crate::HeightRange), and
//! [`render_normal_map_debug`] encodes normals as RGB. Both produce a
//! [`DebugImage`] with one pixel per grid vertex.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{height_to_color, render_heightmap_debug, render_normal_map_debug};
