pub mod engine;
pub use engine::*;

pub mod request;
pub use request::*;

pub mod resolution;
pub use resolution::*;

pub mod roll;
pub use roll::*;
