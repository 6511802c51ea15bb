//! Readers for molecular coordinate files.
//!
//! Three line-oriented formats are recognized, each classified by file
//! extension (see [`Format::from_path`]):
//!
//! - **PDB**: fixed-column `ATOM` records; radii come from the reference
//!   [`table`](crate::table).
//! - **PQR**: whitespace-separated `ATOM`/`HETATM` records carrying their own
//!   radius.
//! - **XYZR**: one `x y z radius` line per atom.
//!
//! Readers append into any [`Extend<Atom>`] sink and report a
//! [`ReadSummary`]. Per-line problems (unknown residues, malformed numbers)
//! are logged and counted but never abort a read; only I/O failures do.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::model::atom::Atom;

pub mod error;

pub mod pdb {
    pub mod reader;
}

pub mod pqr {
    pub mod reader;
}

pub mod xyzr {
    pub mod reader;
}

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Pdb,
    Pqr,
    Xyzr,
}

impl Format {
    /// Classifies a file by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdb" => Some(Format::Pdb),
            "pqr" => Some(Format::Pqr),
            "xyzr" => Some(Format::Xyzr),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Pqr => write!(f, "PQR"),
            Format::Xyzr => write!(f, "XYZR"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Overrides extension-based format inference.
    pub format: Option<Format>,
    /// Skip (and count) records with unparsable coordinates instead of
    /// reading them as `0.0`. Only affects PDB input; the other formats always
    /// skip malformed lines.
    pub strict: bool,
}

/// Per-read diagnostic counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Atoms appended to the sink.
    pub records: usize,
    /// Atoms whose radius fell back to the default.
    pub unresolved: usize,
    /// Lines that looked like records but were skipped.
    pub malformed: usize,
}

/// Builder-style reader over an already opened stream.
pub struct AtomReader<R> {
    reader: R,
    format: Format,
    strict: bool,
}

impl<R: BufRead> AtomReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self {
            reader,
            format,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Appends every atom in the stream to `sink`.
    pub fn read_into<E: Extend<Atom>>(self, sink: &mut E) -> Result<ReadSummary, Error> {
        match self.format {
            Format::Pdb => pdb::reader::read(self.reader, self.strict, sink),
            Format::Pqr => pqr::reader::read(self.reader, sink),
            Format::Xyzr => xyzr::reader::read(self.reader, sink),
        }
    }

    /// Collects every atom in the stream into a new vector.
    pub fn read(self) -> Result<(Vec<Atom>, ReadSummary), Error> {
        let mut atoms = Vec::new();
        let summary = self.read_into(&mut atoms)?;
        Ok((atoms, summary))
    }
}

/// Opens `path` and appends every atom it contains to `sink`.
///
/// # Errors
///
/// Returns [`Error::UnknownFormat`] if no format override is given and the
/// extension is not recognized, [`Error::Open`] if the file cannot be opened,
/// and [`Error::Io`] if reading fails part-way.
pub fn read_atoms<P, E>(path: P, options: &ReadOptions, sink: &mut E) -> Result<ReadSummary, Error>
where
    P: AsRef<Path>,
    E: Extend<Atom>,
{
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => Format::from_path(path).ok_or_else(|| Error::UnknownFormat(path.to_path_buf()))?,
    };

    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let summary = AtomReader::new(BufReader::new(file), format)
        .strict(options.strict)
        .read_into(sink)?;

    debug!(
        "read {} {} atoms from {} ({} unresolved, {} malformed)",
        summary.records,
        format,
        path.display(),
        summary.unresolved,
        summary.malformed
    );

    Ok(summary)
}

/// Calls `f` with the 1-based line number and content of every line, with any
/// trailing carriage return removed.
fn for_each_line<R, F>(reader: R, mut f: F) -> Result<(), Error>
where
    R: BufRead,
    F: FnMut(usize, &str),
{
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        f(i + 1, line.trim_end_matches('\r'));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str) -> NamedTempFile {
        tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file")
    }

    const ALA_CA: &str =
        "ATOM      2  CA  ALA A   1      11.104   6.134  -6.504  1.00  0.00           C";

    #[test]
    fn classifies_by_extension_case_insensitively() {
        assert_eq!(Format::from_path(Path::new("1abc.pdb")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("1ABC.PDB")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("mol.pqr")), Some(Format::Pqr));
        assert_eq!(Format::from_path(Path::new("mol.XyZr")), Some(Format::Xyzr));
        assert_eq!(Format::from_path(Path::new("mol.cif")), None);
        assert_eq!(Format::from_path(Path::new("pdb")), None);
    }

    #[test]
    fn reader_dispatches_on_format() {
        let (atoms, summary) = AtomReader::new(Cursor::new("1 2 3 1.5\n"), Format::Xyzr)
            .read()
            .expect("read xyzr");
        assert_eq!(summary.records, 1);
        assert_eq!(atoms, vec![Atom::new([1.0, 2.0, 3.0], 1.5)]);
    }

    #[test]
    fn read_atoms_appends_to_existing_sink() {
        let mut file = temp_file(".pdb");
        writeln!(file, "HEADER    TEST").unwrap();
        writeln!(file, "{ALA_CA}").unwrap();
        writeln!(file, "END").unwrap();

        let mut atoms = vec![Atom::new([0.0; 3], 2.0)];
        let summary =
            read_atoms(file.path(), &ReadOptions::default(), &mut atoms).expect("read pdb");

        assert_eq!(summary.records, 1);
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[1].position, [11.104, 6.134, -6.504]);
        assert_eq!(atoms[1].radius, 1.750);
    }

    #[test]
    fn format_override_wins_over_extension() {
        let mut file = temp_file(".txt");
        writeln!(file, "0 0 0 2.0").unwrap();

        let options = ReadOptions {
            format: Some(Format::Xyzr),
            ..ReadOptions::default()
        };
        let mut atoms = Vec::new();
        read_atoms(file.path(), &options, &mut atoms).expect("read with override");
        assert_eq!(atoms, vec![Atom::new([0.0; 3], 2.0)]);
    }

    #[test]
    fn unknown_extension_is_reported() {
        let file = temp_file(".txt");
        let mut atoms: Vec<Atom> = Vec::new();
        let err = read_atoms(file.path(), &ReadOptions::default(), &mut atoms).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.pdb");
        let mut atoms: Vec<Atom> = Vec::new();
        let err = read_atoms(&path, &ReadOptions::default(), &mut atoms).unwrap_err();

        assert!(matches!(err, Error::Open { .. }));
        assert!(err.to_string().contains("missing.pdb"));
        assert!(atoms.is_empty());
    }

    #[test]
    fn line_iteration_strips_carriage_returns() {
        let mut seen = Vec::new();
        for_each_line(Cursor::new("a\r\nb\n"), |ln, line| seen.push((ln, line.to_string())))
            .expect("iterate lines");
        assert_eq!(seen, vec![(1, "a".to_string()), (2, "b".to_string())]);
    }
}
