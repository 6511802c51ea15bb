//! Additive splatting of truncated Gaussian kernels onto a lattice.
//!
//! Each atom only visits the cells of a small index box around its center,
//! sized by its truncation radius, so the cost scales with the summed kernel
//! footprints rather than with the lattice volume.

use std::ops::RangeInclusive;

use log::debug;
use rayon::prelude::*;

use super::bounds::{check_blobbyness, check_dims};
use super::error::Error;
use super::kernel;
use crate::model::atom::Atom;
use crate::model::bounds::BoundingBox;
use crate::model::lattice::Lattice;

/// World-space distance between neighbouring lattice points on each axis.
///
/// The first and last lattice points of every axis sit exactly on the box
/// faces, so the spacing is `extent / (dim - 1)`.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] if any dimension is below 2 and
/// [`Error::DegenerateBounds`] if the box has no positive finite extent along
/// some axis.
pub fn lattice_spacing(bounds: &BoundingBox, dims: [usize; 3]) -> Result<[f64; 3], Error> {
    check_dims(dims)?;
    let extent = bounds.extent();
    let mut span = [0.0; 3];
    for axis in 0..3 {
        if !(extent[axis].is_finite() && extent[axis] > 0.0) {
            return Err(Error::degenerate_bounds(
                axis,
                bounds.min[axis],
                bounds.max[axis],
            ));
        }
        span[axis] = extent[axis] / (dims[axis] - 1) as f64;
    }
    Ok(span)
}

/// Validated lattice geometry shared by every atom of one synthesis run.
#[derive(Debug, Clone, Copy)]
struct Sampling {
    min: [f64; 3],
    span: [f64; 3],
    dims: [usize; 3],
    blobbyness: f64,
    truncation_factor: f64,
}

impl Sampling {
    fn new(
        atoms: &[Atom],
        dims: [usize; 3],
        bounds: &BoundingBox,
        blobbyness: f64,
    ) -> Result<Self, Error> {
        check_blobbyness(blobbyness)?;
        if atoms.is_empty() {
            return Err(Error::EmptyAtomSet);
        }
        let span = lattice_spacing(bounds, dims)?;

        Ok(Self {
            min: bounds.min,
            span,
            dims,
            blobbyness,
            truncation_factor: kernel::truncation_factor(blobbyness),
        })
    }

    /// Index box around the lattice point nearest to `center`, widened by
    /// `max_radius` plus one cell and clamped to the lattice. `None` when the
    /// box misses the lattice entirely.
    fn local_box(&self, center: [f64; 3], max_radius: f64) -> Option<[RangeInclusive<usize>; 3]> {
        let mut ranges: [RangeInclusive<usize>; 3] = [0..=0, 0..=0, 0..=0];
        for axis in 0..3 {
            let c = ((center[axis] - self.min[axis]) / self.span[axis]).round();
            let reach = max_radius / self.span[axis];

            let lo = ((c - reach - 1.0) as i64).max(0);
            let hi = ((c + reach + 1.0) as i64).min(self.dims[axis] as i64 - 1);
            if lo > hi {
                return None;
            }
            ranges[axis] = lo as usize..=hi as usize;
        }
        Some(ranges)
    }

    #[inline]
    fn coordinate(&self, axis: usize, index: usize) -> f64 {
        self.min[axis] + index as f64 * self.span[axis]
    }

    fn splat(&self, atom: &Atom, lattice: &mut Lattice) {
        let max_radius = atom.radius * self.truncation_factor;
        let Some([ri, rj, rk]) = self.local_box(atom.position, max_radius) else {
            return;
        };

        for k in rk {
            let z = self.coordinate(2, k);
            for j in rj.clone() {
                let y = self.coordinate(1, j);
                for i in ri.clone() {
                    let point = [self.coordinate(0, i), y, z];
                    let r = kernel::distance_sq(atom.position, point);
                    let value = kernel::density(r, atom.radius, max_radius, self.blobbyness);
                    if value > 0.0 {
                        lattice.add(i, j, k, value as f32);
                    }
                }
            }
        }
    }
}

/// Accumulates every atom's truncated kernel into `lattice`.
///
/// The lattice is expected to be zeroed; existing values are added to, never
/// read or overwritten. The result is bit-for-bit reproducible for the same
/// inputs.
///
/// # Errors
///
/// Fails before touching the lattice if `atoms` is empty, `blobbyness` is not
/// positive, any lattice dimension is below 2, or `bounds` is degenerate.
pub fn blur_atoms(
    atoms: &[Atom],
    lattice: &mut Lattice,
    bounds: &BoundingBox,
    blobbyness: f64,
) -> Result<(), Error> {
    let sampling = Sampling::new(atoms, lattice.dims(), bounds, blobbyness)?;
    for atom in atoms {
        sampling.splat(atom, lattice);
    }
    Ok(())
}

/// Parallel variant of [`blur_atoms`].
///
/// Atoms are split into one contiguous chunk per rayon worker. Each chunk is
/// splatted into its own scratch lattice, and the scratch lattices are then
/// summed into `lattice` in chunk order. No cell is ever written by two
/// threads. Peak memory is one extra lattice per worker.
///
/// Output is reproducible for a fixed thread count but can differ from
/// [`blur_atoms`] in the last bits, since floating-point sums are grouped
/// differently.
///
/// # Errors
///
/// Same as [`blur_atoms`], plus [`Error::Shape`] if a scratch lattice cannot
/// be allocated.
pub fn blur_atoms_parallel(
    atoms: &[Atom],
    lattice: &mut Lattice,
    bounds: &BoundingBox,
    blobbyness: f64,
) -> Result<(), Error> {
    let sampling = Sampling::new(atoms, lattice.dims(), bounds, blobbyness)?;
    let workers = rayon::current_num_threads().max(1);
    let chunk_len = atoms.len().div_ceil(workers);

    if chunk_len == atoms.len() {
        for atom in atoms {
            sampling.splat(atom, lattice);
        }
        return Ok(());
    }

    debug!(
        "splatting {} atoms in chunks of {chunk_len} across {workers} workers",
        atoms.len()
    );

    let dims = lattice.dims();
    let partials = atoms
        .par_chunks(chunk_len)
        .map(|chunk| -> Result<Lattice, Error> {
            let mut scratch = Lattice::zeros(dims)?;
            for atom in chunk {
                sampling.splat(atom, &mut scratch);
            }
            Ok(scratch)
        })
        .collect::<Result<Vec<_>, _>>()?;

    for partial in &partials {
        lattice.accumulate(partial);
    }
    Ok(())
}
