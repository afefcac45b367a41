//! Rendering module
//!
//! Turns game state into draw calls against a `Platform`. Shapes are kept in
//! local space and placed through the viewport transform; platforms that
//! rasterize call `tessellate` to get screen-space triangles.

pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use scene::{draw_game_over, draw_hud, draw_world};
pub use shapes::{DrawShape, Layer, ShapeKind, tessellate};
pub use vertex::{Vertex, colors};
pub use viewport::{to_screen, viewport_offset, visible_world};
