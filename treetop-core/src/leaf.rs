//! Leaf silhouettes.
//!
//! Every silhouette is a list of [`Lobe`]s. A lobe is one outline vertex,
//! placed at a fraction of the leaf length and rotated away from the leaf
//! axis by a fixed number of degrees. A fraction of zero is the anchor
//! itself, which is how outlines open, close and (for the fork) pass back
//! through the stem.

use serde::{Deserialize, Serialize};

use crate::geometry::{angular_offset, Point};

/// Highest valid leaf shape id.
pub const MAX_SHAPE_ID: u8 = 10;

/// One outline vertex of a leaf template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lobe {
    /// Numerator of the length fraction.
    pub numerator: u8,
    /// Denominator of the length fraction.
    pub denominator: u8,
    /// Rotation from the leaf axis, in degrees.
    pub offset: i32,
}

impl Lobe {
    /// Distance from the anchor as a fraction of the leaf length.
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

const fn lobe(numerator: u8, denominator: u8, offset: i32) -> Lobe {
    Lobe {
        numerator,
        denominator,
        offset,
    }
}

const STEM: Lobe = lobe(0, 1, 0);

const NEEDLE: &[Lobe] = &[STEM, lobe(1, 1, 4), lobe(1, 1, -4), STEM];

const LANCE: &[Lobe] = &[STEM, lobe(1, 2, 15), lobe(1, 1, 0), lobe(1, 2, -15), STEM];

const OVAL: &[Lobe] = &[STEM, lobe(2, 5, 45), lobe(1, 1, 0), lobe(2, 5, -45), STEM];

const HEART: &[Lobe] = &[
    STEM,
    lobe(2, 6, 60),
    lobe(4, 6, 20),
    lobe(1, 1, 0),
    lobe(4, 6, -20),
    lobe(2, 6, -60),
    STEM,
];

const NOTCHED: &[Lobe] = &[STEM, lobe(1, 1, 15), lobe(3, 5, 0), lobe(1, 1, -15), STEM];

const FERN: &[Lobe] = &[
    STEM,
    lobe(1, 1, 20),
    lobe(1, 5, 0),
    lobe(1, 1, 15),
    lobe(2, 5, 0),
    lobe(1, 1, 5),
    lobe(3, 5, 0),
    lobe(1, 1, -5),
    lobe(2, 5, 0),
    lobe(1, 1, -15),
    lobe(1, 5, 0),
    lobe(1, 1, -20),
    STEM,
];

const PALM: &[Lobe] = &[
    STEM,
    lobe(1, 1, 45),
    lobe(2, 6, 0),
    lobe(1, 1, 30),
    lobe(3, 6, 0),
    lobe(1, 1, 10),
    lobe(4, 6, 0),
    lobe(1, 1, -10),
    lobe(3, 6, 0),
    lobe(1, 1, -30),
    lobe(2, 6, 0),
    lobe(1, 1, -45),
    STEM,
];

const FAN: &[Lobe] = &[
    STEM,
    lobe(1, 2, 70),
    lobe(1, 2, 50),
    lobe(1, 2, 10),
    lobe(1, 2, -10),
    lobe(1, 2, -50),
    lobe(1, 2, -70),
    STEM,
];

const BLADE: &[Lobe] = &[STEM, lobe(1, 1, 20), lobe(1, 1, 5), lobe(1, 1, -20), STEM];

const FORK: &[Lobe] = &[
    STEM,
    lobe(1, 1, 60),
    lobe(2, 5, -45),
    STEM,
    lobe(2, 5, 45),
    lobe(1, 1, -60),
    STEM,
];

/// The leaf template selected by a shape id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    /// No silhouette; the leaf is a straight tick extending from the branch.
    Line,
    /// Thin spike.
    Needle,
    /// Narrow diamond with lobes at half length.
    Lance,
    /// Wide diamond.
    Oval,
    /// Six-sided rounded leaf.
    Heart,
    /// Arrow-head with a notch at the tip.
    Notched,
    /// Zig-zag fern with five points.
    Fern,
    /// Wide palm frond with five points.
    Palm,
    /// Short fan of six points.
    Fan,
    /// Asymmetric blade.
    Blade,
    /// Two crossed prongs meeting at the stem.
    Fork,
}

impl LeafKind {
    /// Map a shape id to a kind. Zero and unknown ids map to [`LeafKind::Line`].
    #[must_use]
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::Needle,
            2 => Self::Lance,
            3 => Self::Oval,
            4 => Self::Heart,
            5 => Self::Notched,
            6 => Self::Fern,
            7 => Self::Palm,
            8 => Self::Fan,
            9 => Self::Blade,
            10 => Self::Fork,
            _ => Self::Line,
        }
    }

    /// The outline template, or `None` for the straight-line fallback.
    #[must_use]
    pub fn template(self) -> Option<&'static [Lobe]> {
        let lobes = match self {
            Self::Line => return None,
            Self::Needle => NEEDLE,
            Self::Lance => LANCE,
            Self::Oval => OVAL,
            Self::Heart => HEART,
            Self::Notched => NOTCHED,
            Self::Fern => FERN,
            Self::Palm => PALM,
            Self::Fan => FAN,
            Self::Blade => BLADE,
            Self::Fork => FORK,
        };
        Some(lobes)
    }
}

/// Build the outline of a leaf rooted at `anchor` and pointing along `angle`.
///
/// Silhouettes 1 to 10 return a closed outline whose last point repeats the
/// first. Any other id returns the open two-point segment
/// `[anchor, anchor + offset(length, angle)]`.
#[must_use]
pub fn leaf_outline(shape_id: u8, anchor: Point, length: f64, angle: i32) -> Vec<Point> {
    match LeafKind::from_id(shape_id).template() {
        Some(lobes) => lobes
            .iter()
            .map(|lobe| angular_offset(anchor, length * lobe.fraction(), angle + lobe.offset))
            .collect(),
        None => vec![anchor, angular_offset(anchor, length, angle)],
    }
}
