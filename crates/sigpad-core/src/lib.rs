pub mod brush;
pub mod color;
pub mod config;
pub mod error;
pub mod raster;
pub mod snapshot;
pub mod viewport;

pub use brush::{BrushKind, StrokeStyle};
pub use color::Color;
pub use config::{DrawConfig, StrokeWidth, SurfaceConfig};
pub use error::{Result, SurfaceError};
pub use raster::Raster;
pub use snapshot::Snapshot;
pub use viewport::{CanvasSize, Viewport, to_canvas_local};

// Re-export kurbo geometry so downstream crates share one `Point` type
pub use kurbo::{Point, Vec2};
