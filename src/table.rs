//! Reference van der Waals radii for the standard amino acids.
//!
//! The table is packaged as an embedded TOML resource and indexed on first use
//! by residue name, then by atom name. Both keys keep the fixed-width padding
//! of the PDB columns they come from (`" CA "`, not `"CA"`), so callers must
//! look up the raw column text rather than a trimmed copy.
//!
//! Lookups never fail: an unknown residue or atom logs a warning and resolves
//! to [`DEFAULT_RADIUS`].

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const ATOM_TABLE_TOML: &str = include_str!("../resources/atom_table.toml");

static ATOM_TABLE: OnceLock<AtomTable> = OnceLock::new();

/// Radius assigned to atoms that cannot be resolved in the table.
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Number of entries in the embedded table.
pub const TABLE_LEN: usize = 167;

/// One (residue, atom) row of the reference table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomTableEntry {
    /// Three-letter residue name, e.g. `"ALA"`.
    pub residue: String,
    /// Four-column, space-padded atom name, e.g. `" CA "`.
    pub atom: String,
    /// Van der Waals radius in Ångström.
    pub radius: f64,
    /// Display color (RGB in `[0, 1]`). Not used by the field computation.
    pub color: [f32; 3],
    /// Hydrophobicity sign, `+1` or `-1`.
    pub hydrophobicity: i8,
    /// Residue class index.
    pub residue_index: u8,
}

#[derive(Deserialize)]
struct AtomTableFile {
    entry: Vec<AtomTableEntry>,
}

/// Outcome of a radius lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusLookup {
    pub radius: f64,
    pub found: bool,
}

impl RadiusLookup {
    fn resolved(radius: f64) -> Self {
        Self {
            radius,
            found: true,
        }
    }

    fn fallback() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            found: false,
        }
    }
}

/// Immutable, indexed view over the reference entries.
#[derive(Debug)]
pub struct AtomTable {
    entries: Vec<AtomTableEntry>,
    index: HashMap<String, HashMap<String, usize>>,
}

impl AtomTable {
    fn from_entries(entries: Vec<AtomTableEntry>) -> Self {
        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            index
                .entry(entry.residue.clone())
                .or_default()
                .insert(entry.atom.clone(), i);
        }
        Self { entries, index }
    }

    /// All entries in their packaged order.
    pub fn entries(&self) -> &[AtomTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct residues in the index.
    pub fn residue_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the entry for `(residue, atom)` without logging on a miss.
    pub fn entry(&self, residue: &str, atom: &str) -> Option<&AtomTableEntry> {
        self.index
            .get(residue)
            .and_then(|atoms| atoms.get(atom))
            .map(|&i| &self.entries[i])
    }

    /// Resolves the radius of `(residue, atom)`, logging a warning and falling
    /// back to [`DEFAULT_RADIUS`] when either key is unknown.
    pub fn lookup(&self, residue: &str, atom: &str) -> RadiusLookup {
        let Some(atoms) = self.index.get(residue) else {
            warn!("could not find residue '{residue}' in atom table, using default radius");
            return RadiusLookup::fallback();
        };

        match atoms.get(atom) {
            Some(&i) => RadiusLookup::resolved(self.entries[i].radius),
            None => {
                warn!(
                    "could not find atom '{atom}' in residue '{residue}', using default radius"
                );
                RadiusLookup::fallback()
            }
        }
    }
}

/// Returns the process-wide table, building the index on first call.
///
/// Initialization runs exactly once even under concurrent first use; later
/// calls are a read of the already built index.
pub fn atom_table() -> &'static AtomTable {
    ATOM_TABLE.get_or_init(|| {
        let file: AtomTableFile = toml::from_str(ATOM_TABLE_TOML)
            .expect("Failed to parse embedded atom table. This is a library bug.");
        AtomTable::from_entries(file.entry)
    })
}

/// Builds the table index ahead of first lookup. Calling it again is a no-op.
pub fn init() {
    atom_table();
}

/// Shorthand for `atom_table().lookup(residue, atom)`.
pub fn lookup(residue: &str, atom: &str) -> RadiusLookup {
    atom_table().lookup(residue, atom)
}
