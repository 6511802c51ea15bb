//! A pure Rust library for turning molecular coordinate files into "blobby"
//! scalar density fields, ready for isosurface extraction of a molecular
//! surface.
//!
//! # Features
//!
//! - **Radius resolution**: Van der Waals radii for the 20 standard amino
//!   acids, looked up by residue and atom name from an embedded reference table
//! - **Flexible input**: PDB fixed-column records, PQR and XYZR files
//! - **Kernel synthesis**: Additive truncated Gaussian kernels whose cost scales
//!   with each atom's footprint, not with the lattice volume
//! - **Parallel accumulation**: Optional rayon-backed synthesis with
//!   per-worker scratch lattices and no per-cell locking
//!
//! # Quick Start
//!
//! A single alanine alpha carbon splatted onto a 5×5×5 lattice:
//!
//! ```
//! use blobgrid::{Atom, BoundingBox, Lattice, blur_atoms, table};
//!
//! let radius = table::lookup("ALA", " CA ").radius;
//! let atom = Atom::new([0.0, 0.0, 0.0], radius);
//!
//! let bounds = BoundingBox::new([-2.0; 3], [2.0; 3]);
//! let mut lattice = Lattice::zeros([5, 5, 5])?;
//! blur_atoms(&[atom], &mut lattice, &bounds, 2.0)?;
//!
//! // The center sample sits exactly on the atom.
//! let expected = (2.0f64 * (0.0 - 1.75 * 1.75)).exp() as f32;
//! assert_eq!(lattice.get(2, 2, 2), expected);
//!
//! // Corners are far outside the kernel cutoff.
//! assert_eq!(lattice.get(0, 0, 0), 0.0);
//! # Ok::<(), blobgrid::FieldError>(())
//! ```
//!
//! For whole files, [`synthesize`] picks the box and lattice size, and
//! [`build_field_from_file`] runs the full pipeline through an
//! [`IsosurfaceExtractor`].
//!
//! # Module Organization
//!
//! - [`io`]: Coordinate file readers (PDB, PQR, XYZR)
//! - [`table`]: Reference radii keyed by residue and atom name
//! - [`field`]: Bounding boxes, kernel math and density synthesis
//!
//! # Data Types
//!
//! - [`Atom`]: Atom center with its resolved radius
//! - [`BoundingBox`]: Axis-aligned box in world coordinates
//! - [`Lattice`]: Dense `f32` samples indexed by `(i, j, k)`
//! - [`DensityField`]: A lattice paired with the box it spans
//! - [`FieldConfig`] / [`Resolution`]: Synthesis settings

mod model;

pub mod field;
pub mod io;
pub mod table;

pub use model::atom::Atom;
pub use model::bounds::BoundingBox;
pub use model::lattice::{Lattice, ShapeError};

pub use field::{
    DensityField, FieldConfig, IsosurfaceExtractor, Resolution, blur_atoms, blur_atoms_parallel,
    bounding_box, build_field_from_file, synthesize,
};

pub use field::Error as FieldError;
pub use io::Error as ReadError;
