mod build;
mod types;
mod write;

pub use build::*;
pub use types::*;
pub use write::*;
