//! Truncated Gaussian kernel shared by box estimation and synthesis.
//!
//! An atom of radius `R` contributes `exp(B * (r² - R²))` at squared distance
//! `r²` from its center, where `B` is the blobbyness. Two cutoff radii derive
//! from the negligible-value threshold [`EPSILON`]:
//!
//! - the **support radius** `R * sqrt(1 + ln(EPSILON) / B)` pads the bounding
//!   box, and
//! - the **truncation radius** `R * sqrt(1 + ln(EPSILON) / (2B))` is where an
//!   atom's own contribution is forced to zero.
//!
//! When `1 + ln(EPSILON) / d` is negative the radius is taken as zero.

/// Kernel values below this are treated as negligible.
pub const EPSILON: f64 = 1e-3;

fn radius_factor(denominator: f64) -> f64 {
    (1.0 + EPSILON.ln() / denominator).max(0.0).sqrt()
}

/// Scale applied to an atom radius to get its support radius.
pub fn support_factor(blobbyness: f64) -> f64 {
    radius_factor(blobbyness)
}

/// Scale applied to an atom radius to get its truncation radius.
pub fn truncation_factor(blobbyness: f64) -> f64 {
    radius_factor(2.0 * blobbyness)
}

pub fn support_radius(radius: f64, blobbyness: f64) -> f64 {
    radius * support_factor(blobbyness)
}

pub fn truncation_radius(radius: f64, blobbyness: f64) -> f64 {
    radius * truncation_factor(blobbyness)
}

/// Squared Euclidean distance.
#[inline]
pub fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

/// Kernel value of an atom of `radius` at squared distance `r` from its
/// center, zero beyond `max_radius`.
#[inline]
pub fn density(r: f64, radius: f64, max_radius: f64, blobbyness: f64) -> f64 {
    if r.sqrt() > max_radius {
        return 0.0;
    }
    let r0 = radius * radius;
    (blobbyness * (r - r0)).exp()
}
