use thiserror::Error;
use trellis_core::IdentityError;

use crate::Axis;

/// Fatal layout conditions. Each one points at a defect in the code that
/// built the element tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("element {key} grows along the {axis:?} axis but the available space is unbounded")]
    UnboundedGrow { key: String, axis: Axis },
    #[error("element {key} produced an invalid size {width}x{height}")]
    InvalidGeometry { key: String, width: f32, height: f32 },
    #[error("unrecognized self layout mode `{0}`")]
    UnknownSelfLayout(String),
    #[error("unrecognized alignment `{0}`")]
    UnknownAlignment(String),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}
