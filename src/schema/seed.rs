//! Seed shapes for initializing Gray-Scott simulations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Predefined seed topologies for fresh runs.
///
/// `Box` and `Circle` are deterministic. The blob shapes scatter randomly
/// placed discs and are only reproducible when the run supplies an explicit
/// RNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Centered square covering the middle 20% of each axis.
    Box,
    /// Centered disc of radius 0.15 * size.
    Circle,
    FiveLargeBlobs,
    NineMediumBlobs,
    TwelveSmallBlobs,
    FifteenTinyBlobs,
}

/// Count and radius (as a fraction of grid size) for a blob shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobLayout {
    pub count: usize,
    pub radius: f64,
}

impl Shape {
    /// All supported shapes, in selection-menu order.
    pub const ALL: [Shape; 6] = [
        Shape::Box,
        Shape::Circle,
        Shape::FiveLargeBlobs,
        Shape::NineMediumBlobs,
        Shape::TwelveSmallBlobs,
        Shape::FifteenTinyBlobs,
    ];

    /// Canonical kebab-case name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Circle => "circle",
            Shape::FiveLargeBlobs => "five-large-blobs",
            Shape::NineMediumBlobs => "nine-medium-blobs",
            Shape::TwelveSmallBlobs => "twelve-small-blobs",
            Shape::FifteenTinyBlobs => "fifteen-tiny-blobs",
        }
    }

    /// Blob layout for the random shapes, None for the deterministic ones.
    pub fn blobs(&self) -> Option<BlobLayout> {
        match self {
            Shape::Box | Shape::Circle => None,
            Shape::FiveLargeBlobs => Some(BlobLayout {
                count: 5,
                radius: 0.125,
            }),
            Shape::NineMediumBlobs => Some(BlobLayout {
                count: 9,
                radius: 0.075,
            }),
            Shape::TwelveSmallBlobs => Some(BlobLayout {
                count: 12,
                radius: 0.066,
            }),
            Shape::FifteenTinyBlobs => Some(BlobLayout {
                count: 15,
                radius: 0.04,
            }),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for seed shape names that match no known shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown seed shape `{0}`")]
pub struct UnknownShapeError(pub String);

impl FromStr for Shape {
    type Err = UnknownShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| UnknownShapeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>(), Ok(shape));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "hexagons".parse::<Shape>().unwrap_err();
        assert_eq!(err, UnknownShapeError("hexagons".to_string()));
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let json = serde_json::to_string(&Shape::FifteenTinyBlobs).unwrap();
        assert_eq!(json, "\"fifteen-tiny-blobs\"");
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Shape::FifteenTinyBlobs);
    }

    #[test]
    fn blob_layouts_shrink_with_shape() {
        let large = Shape::FiveLargeBlobs.blobs().unwrap();
        let tiny = Shape::FifteenTinyBlobs.blobs().unwrap();
        assert!(large.radius > tiny.radius);
        assert!(large.count < tiny.count);
        assert!(Shape::Box.blobs().is_none());
    }
}
