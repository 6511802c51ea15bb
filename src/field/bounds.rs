use super::config::Resolution;
use super::error::Error;
use super::kernel;
use crate::model::atom::Atom;
use crate::model::bounds::BoundingBox;
use crate::model::lattice::{ShapeError, cell_count};

/// Half-width given to a flat axis when no atom has a positive truncation
/// radius and the resolution does not fix a spacing.
const FLAT_AXIS_PAD: f64 = 0.5;

pub(super) fn check_blobbyness(blobbyness: f64) -> Result<(), Error> {
    if blobbyness.is_finite() && blobbyness > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBlobbyness(blobbyness))
    }
}

/// Computes the box that covers every atom's kernel support.
///
/// The box is the componentwise extent of the atom centers, padded on every
/// side by the largest support radius in the set.
///
/// # Errors
///
/// Returns [`Error::EmptyAtomSet`] for an empty slice and
/// [`Error::InvalidBlobbyness`] unless `blobbyness` is positive and finite.
pub fn bounding_box(atoms: &[Atom], blobbyness: f64) -> Result<BoundingBox, Error> {
    check_blobbyness(blobbyness)?;
    if atoms.is_empty() {
        return Err(Error::EmptyAtomSet);
    }

    let factor = kernel::support_factor(blobbyness);
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    let mut pad: f64 = 0.0;

    for atom in atoms {
        for axis in 0..3 {
            min[axis] = min[axis].min(atom.position[axis]);
            max[axis] = max[axis].max(atom.position[axis]);
        }
        pad = pad.max(atom.radius * factor);
    }

    Ok(BoundingBox::new(min.map(|v| v - pad), max.map(|v| v + pad)))
}

/// Widens every axis of `bounds` that has zero extent.
///
/// Single atoms, collinear chains and planar sets give a flat box whenever the
/// support radius clamps to zero. Each flat axis is opened up on both sides by
/// the largest truncation radius in the set, or by one lattice spacing (0.5 Å
/// for a fixed resolution) when that radius is zero too. Axes with positive
/// extent are returned untouched.
pub fn pad_flat_axes(
    bounds: BoundingBox,
    atoms: &[Atom],
    blobbyness: f64,
    resolution: Resolution,
) -> BoundingBox {
    let extent = bounds.extent();
    if extent.iter().all(|&len| len > 0.0) {
        return bounds;
    }

    let factor = kernel::truncation_factor(blobbyness);
    let reach = atoms
        .iter()
        .map(|atom| atom.radius * factor)
        .fold(0.0, f64::max);
    let pad = if reach > 0.0 {
        reach
    } else {
        match resolution {
            Resolution::Spacing(spacing) if spacing.is_finite() && spacing > 0.0 => spacing,
            _ => FLAT_AXIS_PAD,
        }
    };

    let BoundingBox { mut min, mut max } = bounds;
    for axis in 0..3 {
        if extent[axis] <= 0.0 {
            min[axis] -= pad;
            max[axis] += pad;
        }
    }
    BoundingBox::new(min, max)
}

/// Chooses lattice dimensions for `bounds` at the given resolution.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] for a fixed resolution below 2 on any
/// axis, [`Error::InvalidSpacing`] for a non-positive spacing, and
/// [`Error::LatticeTooLarge`] or [`Error::Shape`] when the lattice would hold
/// more cells than `usize` can count.
pub fn lattice_dims(bounds: &BoundingBox, resolution: Resolution) -> Result<[usize; 3], Error> {
    let dims = match resolution {
        Resolution::Fixed(dims) => {
            check_dims(dims)?;
            dims
        }
        Resolution::Spacing(spacing) => {
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(Error::InvalidSpacing(spacing));
            }
            let extent = bounds.extent();
            let mut dims = [0; 3];
            for axis in 0..3 {
                let cells = (extent[axis].max(0.0) / spacing).ceil();
                // The cast saturates, so anything at or past the limit is refused.
                if !(cells.is_finite() && cells < usize::MAX as f64) {
                    return Err(Error::LatticeTooLarge { extent, spacing });
                }
                dims[axis] = (cells as usize)
                    .checked_add(1)
                    .ok_or(Error::LatticeTooLarge { extent, spacing })?
                    .max(2);
            }
            dims
        }
    };

    if cell_count(dims).is_none() {
        return Err(ShapeError::TooLarge(dims).into());
    }
    Ok(dims)
}

pub(super) fn check_dims(dims: [usize; 3]) -> Result<(), Error> {
    if dims.iter().all(|&d| d >= 2) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions(dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_atoms() -> Vec<Atom> {
        vec![
            Atom::new([0.0, 0.0, 0.0], 1.5),
            Atom::new([4.0, -2.0, 1.0], 1.0),
            Atom::new([-1.0, 3.0, -5.0], 2.0),
        ]
    }

    #[test]
    fn pads_extent_by_largest_support_radius() {
        let b = 10.0;
        let bounds = bounding_box(&sample_atoms(), b).expect("bounds");
        let pad = 2.0 * kernel::support_factor(b);

        let expected_min = [-1.0 - pad, -2.0 - pad, -5.0 - pad];
        let expected_max = [4.0 + pad, 3.0 + pad, 1.0 + pad];
        for axis in 0..3 {
            assert!((bounds.min[axis] - expected_min[axis]).abs() < 1e-12);
            assert!((bounds.max[axis] - expected_max[axis]).abs() < 1e-12);
        }
    }

    #[test]
    fn covers_every_atom_support() {
        for b in [7.0, 10.0, 25.0, 100.0] {
            let atoms = sample_atoms();
            let bounds = bounding_box(&atoms, b).expect("bounds");
            for atom in &atoms {
                let support = kernel::support_radius(atom.radius, b);
                assert!(
                    bounds.contains_sphere(atom.position, support),
                    "atom at {:?} not covered for blobbyness {b}",
                    atom.position
                );
            }
        }
    }

    #[test]
    fn single_atom_box_is_symmetric() {
        let atom = Atom::new([1.0, 2.0, 3.0], 1.75);
        let bounds = bounding_box(&[atom], 20.0).expect("bounds");
        let center = bounds.center();
        for axis in 0..3 {
            assert!((center[axis] - atom.position[axis]).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_set_is_an_error() {
        assert!(matches!(bounding_box(&[], 10.0), Err(Error::EmptyAtomSet)));
    }

    #[test]
    fn rejects_non_positive_blobbyness() {
        let atoms = sample_atoms();
        for b in [0.0, -0.2, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                bounding_box(&atoms, b),
                Err(Error::InvalidBlobbyness(_))
            ));
        }
    }

    #[test]
    fn spacing_resolution_rounds_up() {
        let bounds = BoundingBox::new([0.0; 3], [4.0, 4.1, 0.0]);
        let dims = lattice_dims(&bounds, Resolution::Spacing(1.0)).expect("dims");
        assert_eq!(dims, [5, 6, 2]);
    }

    #[test]
    fn huge_extent_is_refused() {
        let bounds = BoundingBox::new([-1e300; 3], [1e300; 3]);
        assert!(matches!(
            lattice_dims(&bounds, Resolution::Spacing(0.5)),
            Err(Error::LatticeTooLarge { spacing, .. }) if spacing == 0.5
        ));

        let bounds = BoundingBox::new([0.0; 3], [1e7; 3]);
        assert!(matches!(
            lattice_dims(&bounds, Resolution::Spacing(1.0)),
            Err(Error::Shape(ShapeError::TooLarge(_)))
        ));
    }

    #[test]
    fn fixed_resolution_cell_count_must_fit() {
        let bounds = BoundingBox::new([0.0; 3], [1.0; 3]);
        assert!(matches!(
            lattice_dims(&bounds, Resolution::Fixed([1 << 22; 3])),
            Err(Error::Shape(ShapeError::TooLarge([4_194_304, 4_194_304, 4_194_304])))
        ));
    }

    #[test]
    fn flat_axes_take_the_truncation_radius() {
        let atoms = [
            Atom::new([0.0, 0.0, 0.0], 1.5),
            Atom::new([2.0, 1.0, 0.0], 2.0),
        ];
        let b = 5.0;
        let bounds = bounding_box(&atoms, b).expect("bounds");
        assert_eq!(bounds.extent()[2], 0.0);

        let padded = pad_flat_axes(bounds, &atoms, b, Resolution::default());
        let reach = kernel::truncation_radius(2.0, b);
        assert!(reach > 0.0);
        assert!((padded.min[2] + reach).abs() < 1e-12);
        assert!((padded.max[2] - reach).abs() < 1e-12);
        assert_eq!(padded.min[0], bounds.min[0]);
        assert_eq!(padded.max[1], bounds.max[1]);
    }

    #[test]
    fn flat_axes_fall_back_to_one_spacing() {
        let atom = Atom::new([1.0, 2.0, 3.0], 1.75);
        let bounds = bounding_box(&[atom], 2.0).expect("bounds");
        assert_eq!(bounds.extent(), [0.0; 3]);

        let padded = pad_flat_axes(bounds, &[atom], 2.0, Resolution::Spacing(0.25));
        assert_eq!(padded.min, [0.75, 1.75, 2.75]);
        assert_eq!(padded.max, [1.25, 2.25, 3.25]);

        let padded = pad_flat_axes(bounds, &[atom], 2.0, Resolution::Fixed([3, 3, 3]));
        assert_eq!(padded.extent(), [2.0 * FLAT_AXIS_PAD; 3]);
    }

    #[test]
    fn boxes_with_volume_are_not_padded() {
        let atoms = sample_atoms();
        let bounds = bounding_box(&atoms, 10.0).expect("bounds");
        let padded = pad_flat_axes(bounds, &atoms, 10.0, Resolution::default());
        assert_eq!(padded, bounds);
    }

    #[test]
    fn fixed_resolution_is_validated() {
        let bounds = BoundingBox::new([0.0; 3], [1.0; 3]);
        assert_eq!(
            lattice_dims(&bounds, Resolution::Fixed([5, 5, 5])).expect("dims"),
            [5, 5, 5]
        );
        assert!(matches!(
            lattice_dims(&bounds, Resolution::Fixed([5, 1, 5])),
            Err(Error::InvalidDimensions([5, 1, 5]))
        ));
        assert!(matches!(
            lattice_dims(&bounds, Resolution::Spacing(0.0)),
            Err(Error::InvalidSpacing(_))
        ));
    }
}
