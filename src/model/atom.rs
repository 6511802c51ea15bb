/// An atom center and its van der Waals radius, both in Ångström.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub position: [f64; 3],
    pub radius: f64,
}

impl Atom {
    pub fn new(position: [f64; 3], radius: f64) -> Self {
        Self { position, radius }
    }
}
