pub mod chrome;
pub mod config;
pub mod constants;
pub mod contact;
pub mod geometry;
pub mod motion;
pub mod parallax;
pub mod scene;
pub mod scroll;
pub mod state;
pub mod task;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use config::ContactConfig;
pub use geometry::*;
pub use motion::*;
pub use parallax::*;
pub use scene::*;
pub use scroll::*;
pub use state::*;
