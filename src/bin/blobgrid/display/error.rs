use std::io::{self, Write};

use anyhow::Error;

use blobgrid::{FieldError, ShapeError};
use blobgrid::io::Error as ReadError;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<&'static str> {
    let read_err = err.downcast_ref::<ReadError>().or_else(|| {
        err.downcast_ref::<FieldError>().and_then(|e| match e {
            FieldError::Read(inner) => Some(inner),
            _ => None,
        })
    });

    if let Some(e) = read_err {
        return read_hints(e);
    }
    if let Some(e) = err.downcast_ref::<FieldError>() {
        return field_hints(e);
    }
    Vec::new()
}

fn read_hints(err: &ReadError) -> Vec<&'static str> {
    match err {
        ReadError::Open { source, .. } | ReadError::Io { source } => io_hints(source),
        ReadError::UnknownFormat(_) => vec![
            "Recognized extensions: .pdb, .pqr, .xyzr (any case)",
            "Use --format to read a file with another extension",
        ],
        ReadError::MalformedRecord { .. } => vec![
            "Inspect the file around that line for malformed entries",
            "Drop --strict to read unparsable PDB coordinates as 0.0",
        ],
    }
}

fn io_hints(source: &io::Error) -> Vec<&'static str> {
    match source.kind() {
        io::ErrorKind::NotFound => vec![
            "File or directory not found",
            "Check the path spelling and ensure the file exists",
        ],
        io::ErrorKind::PermissionDenied => vec![
            "Permission denied accessing the file",
            "Check file permissions with `ls -la`",
        ],
        io::ErrorKind::InvalidData => vec![
            "File contains invalid or non UTF-8 data",
            "Verify the file is a plain-text coordinate file",
        ],
        _ => Vec::new(),
    }
}

fn field_hints(err: &FieldError) -> Vec<&'static str> {
    match err {
        FieldError::EmptyAtomSet => vec![
            "No atom records were found in the input",
            "PDB records must start with `ATOM` in column 1",
            "Run `blobgrid inspect` with -v to see skipped lines",
        ],
        FieldError::InvalidBlobbyness(_) => vec![
            "Pass a positive value to --blobbyness, e.g. -b 8",
        ],
        FieldError::InvalidDimensions(_) => vec![
            "Every --dims value must be at least 2",
        ],
        FieldError::InvalidSpacing(_) => vec![
            "Pass a positive length in Å to --spacing, e.g. --spacing 0.5",
        ],
        FieldError::DegenerateBounds { .. } => vec![
            "The atom coordinates do not span a finite box",
            "Check the input for NaN, infinite or huge coordinates",
        ],
        FieldError::LatticeTooLarge { .. } | FieldError::Shape(ShapeError::TooLarge(_)) => vec![
            "The lattice would not fit in memory",
            "Check the input for stray coordinates far from the molecule",
            "Use a coarser --spacing or smaller --dims",
        ],
        FieldError::Shape(_) | FieldError::Read(_) | FieldError::Isosurface(_) => Vec::new(),
    }
}
