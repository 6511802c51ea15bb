mod blur;
mod bounds;
mod config;
mod error;
mod kernel;

pub use blur::{blur_atoms, blur_atoms_parallel, lattice_spacing};
pub use bounds::{bounding_box, lattice_dims, pad_flat_axes};
pub use config::{FieldConfig, Resolution};
pub use error::Error;
pub use kernel::{EPSILON, support_radius, truncation_radius};

use std::fmt;
use std::path::Path;

use log::debug;

use crate::io::{self, ReadOptions};
use crate::model::atom::Atom;
use crate::model::bounds::BoundingBox;
use crate::model::lattice::Lattice;

/// A synthesized lattice together with the box it spans.
///
/// Lattice point `(0, 0, 0)` sits on `bounds.min` and the last point on every
/// axis sits on `bounds.max`.
#[derive(Debug, Clone)]
pub struct DensityField {
    bounds: BoundingBox,
    lattice: Lattice,
    spacing: [f64; 3],
}

impl DensityField {
    /// Pairs an already filled lattice with its box.
    ///
    /// # Errors
    ///
    /// Fails if the lattice has fewer than 2 samples on an axis or the box is
    /// degenerate.
    pub fn new(bounds: BoundingBox, lattice: Lattice) -> Result<Self, Error> {
        let spacing = lattice_spacing(&bounds, lattice.dims())?;
        Ok(Self {
            bounds,
            lattice,
            spacing,
        })
    }

    /// Wraps a raw `dims`-shaped buffer, e.g. one filled by another process.
    pub fn from_parts(bounds: BoundingBox, dims: [usize; 3], data: Vec<f32>) -> Result<Self, Error> {
        Self::new(bounds, Lattice::from_vec(dims, data)?)
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn dims(&self) -> [usize; 3] {
        self.lattice.dims()
    }

    /// Distance between neighbouring samples on each axis.
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// World-space position of lattice point `(i, j, k)`.
    pub fn position(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        let min = self.bounds.min;
        [
            min[0] + i as f64 * self.spacing[0],
            min[1] + j as f64 * self.spacing[1],
            min[2] + k as f64 * self.spacing[2],
        ]
    }

    /// Smallest and largest stored values.
    pub fn value_range(&self) -> (f32, f32) {
        self.lattice
            .as_slice()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Number of samples inside the surface at `isovalue`.
    pub fn count_at_or_above(&self, isovalue: f32) -> usize {
        self.lattice
            .as_slice()
            .iter()
            .filter(|&&v| v >= isovalue)
            .count()
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }
}

/// Turns a density field into a surface mesh at a threshold value.
///
/// Mesh generation lives outside this crate; implement this trait to plug a
/// marching-cubes (or any other) extractor into [`build_field_from_file`].
pub trait IsosurfaceExtractor {
    type Mesh;
    type Error: fmt::Display;

    fn extract(&self, field: &DensityField, isovalue: f32) -> Result<Self::Mesh, Self::Error>;
}

/// Bounds `atoms`, allocates a lattice at the configured resolution and
/// accumulates every atom's kernel into it.
///
/// Axes along which the padded box is flat are widened with
/// [`pad_flat_axes`], so single atoms and planar sets still get a lattice.
///
/// # Errors
///
/// Returns a validation [`Error`] for an empty atom set, a non-positive
/// blobbyness or an unusable resolution, and [`Error::LatticeTooLarge`] or
/// [`Error::Shape`] when the lattice cannot be allocated.
pub fn synthesize(atoms: &[Atom], config: &FieldConfig) -> Result<DensityField, Error> {
    let bounds = bounding_box(atoms, config.blobbyness)?;
    let bounds = pad_flat_axes(bounds, atoms, config.blobbyness, config.resolution);
    let dims = lattice_dims(&bounds, config.resolution)?;
    debug!(
        "synthesizing {} atoms onto a {}x{}x{} lattice",
        atoms.len(),
        dims[0],
        dims[1],
        dims[2]
    );

    let mut lattice = Lattice::zeros(dims)?;
    if config.parallel {
        blur_atoms_parallel(atoms, &mut lattice, &bounds, config.blobbyness)?;
    } else {
        blur_atoms(atoms, &mut lattice, &bounds, config.blobbyness)?;
    }

    DensityField::new(bounds, lattice)
}

/// Reads a coordinate file, synthesizes its density field and hands the field
/// to `extractor`.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be opened or read,
/// [`Error::Isosurface`] if the extractor fails, and any validation error from
/// [`synthesize`].
pub fn build_field_from_file<P, X>(
    path: P,
    config: &FieldConfig,
    isovalue: f32,
    extractor: &X,
) -> Result<X::Mesh, Error>
where
    P: AsRef<Path>,
    X: IsosurfaceExtractor,
{
    let path = path.as_ref();
    let mut atoms = Vec::new();
    io::read_atoms(path, &ReadOptions::default(), &mut atoms)?;

    let field = synthesize(&atoms, config)?;
    debug!("extracting isosurface at {isovalue} from {}", path.display());

    extractor
        .extract(&field, isovalue)
        .map_err(|e| Error::Isosurface(e.to_string()))
}
