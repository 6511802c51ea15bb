/// Settings for [`synthesize`](super::synthesize) and
/// [`build_field_from_file`](super::build_field_from_file).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Kernel sharpness; must be positive.
    pub blobbyness: f64,
    /// How the lattice is laid over the bounding box.
    pub resolution: Resolution,
    /// Accumulate on the rayon thread pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            blobbyness: 8.0,
            resolution: Resolution::default(),
            parallel: false,
        }
    }
}

/// Lattice sampling of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Exact sample counts per axis.
    Fixed([usize; 3]),
    /// Target voxel edge length in Ångström. Each axis gets
    /// `ceil(extent / spacing) + 1` samples, and never fewer than 2.
    Spacing(f64),
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Spacing(0.5)
    }
}
