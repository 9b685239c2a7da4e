pub mod catalog;
pub mod config;
pub mod constants;
pub mod depth;
pub mod gateway;
pub mod section;
pub mod starfield;
pub mod state;
pub mod store;

pub static STARFIELD_WGSL: &str = include_str!("../shaders/starfield.wgsl");

pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use depth::*;
pub use section::*;
pub use starfield::*;
pub use state::*;
pub use store::*;
