use crate::io::{Error, Format, ReadSummary, for_each_line};
use crate::model::atom::Atom;
use log::warn;
use std::io::BufRead;

/// Parses an `x y z radius` line. Fields past the fourth are ignored.
pub fn parse_atom(line: &str) -> Result<Atom, &'static str> {
    let mut fields = line.split_whitespace();
    let mut next = |what: &'static str| -> Result<f64, &'static str> {
        fields.next().ok_or(what)?.parse::<f64>().map_err(|_| what)
    };

    let x = next("invalid x coordinate")?;
    let y = next("invalid y coordinate")?;
    let z = next("invalid z coordinate")?;
    let radius = next("invalid radius")?;

    if !(radius.is_finite() && radius > 0.0) {
        return Err("radius must be positive");
    }

    Ok(Atom::new([x, y, z], radius))
}

pub fn read<R: BufRead, E: Extend<Atom>>(reader: R, sink: &mut E) -> Result<ReadSummary, Error> {
    let mut summary = ReadSummary::default();
    for_each_line(reader, |ln, line| {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            return;
        }

        match parse_atom(content) {
            Ok(atom) => {
                sink.extend(std::iter::once(atom));
                summary.records += 1;
            }
            Err(details) => {
                warn!("{}, skipping line", Error::malformed(Format::Xyzr, ln, details));
                summary.malformed += 1;
            }
        }
    })?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_one_atom_per_line() {
        let input = "# comment\n\n 1.0 2.0 3.0 1.5\n-4 -5 -6 2 extra\n";
        let mut atoms = Vec::new();
        let summary = read(Cursor::new(input), &mut atoms).expect("read");

        assert_eq!(summary.records, 2);
        assert_eq!(
            atoms,
            vec![
                Atom::new([1.0, 2.0, 3.0], 1.5),
                Atom::new([-4.0, -5.0, -6.0], 2.0)
            ]
        );
    }

    #[test]
    fn skips_short_and_invalid_lines() {
        let input = "1.0 2.0 3.0\n1.0 2.0 3.0 0.0\n1.0 y 3.0 1.0\n0 0 0 1\n";
        let mut atoms = Vec::new();
        let summary = read(Cursor::new(input), &mut atoms).expect("read");

        assert_eq!(summary.malformed, 3);
        assert_eq!(atoms, vec![Atom::new([0.0; 3], 1.0)]);
    }
}
