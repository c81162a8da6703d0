pub mod common;
pub mod image;
pub mod persona;
pub mod story;
pub mod wire;

pub use common::*;
pub use image::*;
pub use persona::*;
pub use story::*;
pub use wire::*;
