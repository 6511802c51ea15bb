//! Error types for bounding-box estimation and field synthesis.
//!
//! Every variant except [`Error::Read`] and [`Error::Isosurface`] is a
//! validation failure raised before any lattice cell is touched.

use crate::model::lattice::ShapeError;
use thiserror::Error;

/// Errors that can occur while building a density field.
#[derive(Debug, Error)]
pub enum Error {
    /// No atoms were supplied.
    ///
    /// Bounding an empty set would otherwise produce an inverted box with
    /// infinite extent.
    #[error("atom set is empty: at least one atom is required")]
    EmptyAtomSet,

    /// Blobbyness must be strictly positive and finite.
    #[error("blobbyness must be a positive finite number, got {0}")]
    InvalidBlobbyness(f64),

    /// Every lattice axis needs at least two samples so both box faces land
    /// on lattice points.
    #[error("lattice dimensions must be at least 2 on every axis, got {0:?}")]
    InvalidDimensions([usize; 3]),

    /// Requested voxel spacing is not a positive finite length.
    #[error("lattice spacing must be a positive finite length, got {0}")]
    InvalidSpacing(f64),

    /// The bounding box has no positive, finite extent along an axis.
    #[error("bounding box has no positive extent along the {axis} axis (min {min}, max {max})")]
    DegenerateBounds {
        /// Axis label (`'x'`, `'y'` or `'z'`).
        axis: char,
        /// Lower bound on that axis.
        min: f64,
        /// Upper bound on that axis.
        max: f64,
    },

    /// The box is too large to sample at the requested spacing.
    #[error("a box of extent {extent:?} cannot be sampled every {spacing} Å: too many cells")]
    LatticeTooLarge {
        /// Box edge lengths.
        extent: [f64; 3],
        /// Requested spacing.
        spacing: f64,
    },

    /// The lattice cannot be allocated or the caller's buffer does not match
    /// its dimensions.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Reading the coordinate file failed.
    #[error("failed to read atoms: {0}")]
    Read(#[from] crate::io::Error),

    /// The external isosurface extractor reported a failure.
    #[error("isosurface extraction failed: {0}")]
    Isosurface(String),
}

impl Error {
    /// Creates a [`DegenerateBounds`](Error::DegenerateBounds) error for axis
    /// index `axis` (0, 1 or 2).
    pub fn degenerate_bounds(axis: usize, min: f64, max: f64) -> Self {
        Self::DegenerateBounds {
            axis: ['x', 'y', 'z'][axis],
            min,
            max,
        }
    }
}
