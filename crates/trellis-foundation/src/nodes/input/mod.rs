mod focus;
mod types;

pub use focus::*;
pub use types::*;
