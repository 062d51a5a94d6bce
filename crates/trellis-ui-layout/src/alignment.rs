//! Main-axis and cross-axis alignment policies.

use std::str::FromStr;

use crate::LayoutError;

/// How children are distributed along a box's main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MainAxisAlignment {
    /// Pack children from the origin.
    #[default]
    Start,
    /// Centre the packed run within the free space.
    Center,
    /// Pack children flush against the far edge.
    End,
    /// Spread the free space evenly between children. The first child sits
    /// at the start and the last flush with the end; a lone child sits at
    /// the start.
    Between,
}

impl MainAxisAlignment {
    /// Computes main-axis offsets for children of the given `sizes` inside a
    /// run of length `available`. Negative free space is treated as zero.
    pub fn arrange(&self, available: f32, sizes: &[f32], out_positions: &mut [f32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        if sizes.is_empty() {
            return;
        }
        let total: f32 = sizes.iter().sum();
        let free = if available.is_finite() {
            (available - total).max(0.0)
        } else {
            0.0
        };
        let (start, gap) = match self {
            MainAxisAlignment::Start => (0.0, 0.0),
            MainAxisAlignment::Center => (free / 2.0, 0.0),
            MainAxisAlignment::End => (free, 0.0),
            MainAxisAlignment::Between => {
                if sizes.len() > 1 {
                    (0.0, free / (sizes.len() - 1) as f32)
                } else {
                    (0.0, 0.0)
                }
            }
        };
        let mut cursor = start;
        for (position, size) in out_positions.iter_mut().zip(sizes) {
            *position = cursor;
            cursor += size + gap;
        }
    }
}

impl FromStr for MainAxisAlignment {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start" => Ok(MainAxisAlignment::Start),
            "center" => Ok(MainAxisAlignment::Center),
            "end" => Ok(MainAxisAlignment::End),
            "between" => Ok(MainAxisAlignment::Between),
            other => Err(LayoutError::UnknownAlignment(other.to_owned())),
        }
    }
}

/// Where each child sits across a box's main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossAxisAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl CrossAxisAlignment {
    /// Offset of a child of extent `child` inside `available`.
    pub fn align(&self, available: f32, child: f32) -> f32 {
        if !available.is_finite() {
            return 0.0;
        }
        match self {
            CrossAxisAlignment::Start => 0.0,
            CrossAxisAlignment::Center => ((available - child) / 2.0).max(0.0),
            CrossAxisAlignment::End => (available - child).max(0.0),
        }
    }
}

impl FromStr for CrossAxisAlignment {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start" => Ok(CrossAxisAlignment::Start),
            "center" => Ok(CrossAxisAlignment::Center),
            "end" => Ok(CrossAxisAlignment::End),
            other => Err(LayoutError::UnknownAlignment(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
