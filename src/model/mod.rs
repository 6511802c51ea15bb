//! Core data structures flowing through the `blobgrid` pipeline.
//!
//! - [`atom`]: An atom center with its resolved van der Waals radius.
//! - [`bounds`]: Axis-aligned bounding boxes in world coordinates.
//! - [`lattice`]: Dense scalar storage on a regular 3D lattice.
//!
//! Geometry ([`Atom`](atom::Atom)) is kept separate from the sampled field
//! ([`Lattice`](lattice::Lattice)) so the [`crate::field`] functions can read
//! one and write the other without either holding a reference to the other.

pub mod atom;
pub mod bounds;
pub mod lattice;
