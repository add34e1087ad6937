//! Points, lines and circles under Euclidean, spherical and hyperbolic
//! geometry, with the interaction state that builds them from pointer input.

pub mod animation;
pub mod config;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod scene;
pub mod session;

pub use config::Settings;
pub use error::{ConfigError, PlacementError};
pub use geom::{CanvasConfig, Curvature, Engine, GeometryModel, Pos};
pub use interaction::{ClickOutcome, Tool};
pub use scene::{Scene, SceneCounts};
pub use session::{Preview, Session};
