//! PQR records: PDB-like `ATOM`/`HETATM` lines whose columns are separated by
//! whitespace rather than fixed widths, ending in `x y z charge radius`.

use crate::io::{Error, Format, ReadSummary, for_each_line};
use crate::model::atom::Atom;
use log::warn;
use std::io::BufRead;

fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parses the trailing `x y z charge radius` fields of a record.
pub fn parse_atom(line: &str) -> Result<Atom, &'static str> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return Err("record must end with x, y, z, charge and radius fields");
    }

    let tail = &tokens[tokens.len() - 5..];
    let number = |s: &str, what: &'static str| s.parse::<f64>().map_err(|_| what);

    let x = number(tail[0], "invalid x coordinate")?;
    let y = number(tail[1], "invalid y coordinate")?;
    let z = number(tail[2], "invalid z coordinate")?;
    number(tail[3], "invalid charge")?;
    let radius = number(tail[4], "invalid radius")?;

    if !(radius.is_finite() && radius > 0.0) {
        return Err("radius must be positive");
    }

    Ok(Atom::new([x, y, z], radius))
}

pub fn read<R: BufRead, E: Extend<Atom>>(reader: R, sink: &mut E) -> Result<ReadSummary, Error> {
    let mut summary = ReadSummary::default();
    for_each_line(reader, |ln, line| {
        if !is_atom_record(line) {
            return;
        }

        match parse_atom(line) {
            Ok(atom) => {
                sink.extend(std::iter::once(atom));
                summary.records += 1;
            }
            Err(details) => {
                warn!("{}, skipping record", Error::malformed(Format::Pqr, ln, details));
                summary.malformed += 1;
            }
        }
    })?;

    Ok(summary)
}
