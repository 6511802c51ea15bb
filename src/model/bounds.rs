/// Axis-aligned box spanning `[min, max]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Edge lengths `max - min` per axis.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        ]
    }

    /// Returns `true` if `point` lies inside the box, boundary included.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Returns `true` if the sphere at `center` with `radius` lies entirely
    /// inside the box.
    pub fn contains_sphere(&self, center: [f64; 3], radius: f64) -> bool {
        (0..3).all(|axis| {
            center[axis] - radius >= self.min[axis] && center[axis] + radius <= self.max[axis]
        })
    }
}
