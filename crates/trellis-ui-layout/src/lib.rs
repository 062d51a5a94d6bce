//! Layout contracts & policies for Trellis

mod alignment;
mod axis;
mod constraints;
mod error;

pub use alignment::*;
pub use axis::*;
pub use constraints::*;
pub use error::*;

pub mod prelude {
    pub use crate::alignment::{CrossAxisAlignment, MainAxisAlignment};
    pub use crate::axis::Axis;
    pub use crate::constraints::{Constraints, SelfLayout};
    pub use crate::error::LayoutError;
}
