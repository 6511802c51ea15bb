use crate::io::{Error, Format, ReadSummary, for_each_line};
use crate::model::atom::Atom;
use crate::table;
use log::warn;
use std::io::BufRead;
use std::ops::Range;

/// Leading token identifying an atom record (case-sensitive).
pub const RECORD_MARKER: &str = "ATOM";

const ATOM_NAME: Range<usize> = 12..16;
const RESIDUE_NAME: Range<usize> = 17..20;
const X: Range<usize> = 30..38;
const Y: Range<usize> = 38..46;
const Z: Range<usize> = 46..54;

/// One `ATOM` record with its identity and coordinate columns kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord<'a> {
    pub atom_name: &'a str,
    pub residue_name: &'a str,
    /// Raw `x`, `y`, `z` columns, untrimmed.
    pub coord_fields: [&'a str; 3],
}

impl AtomRecord<'_> {
    /// Coordinates parsed as whole columns; `None` where a column is not a
    /// number.
    pub fn coords(&self) -> [Option<f64>; 3] {
        self.coord_fields.map(|field| field.trim().parse().ok())
    }

    /// Coordinates read from the numeric prefix of each column, `0.0` where
    /// there is none.
    pub fn lenient_position(&self) -> [f64; 3] {
        self.coord_fields.map(leading_float)
    }
}

pub fn is_atom_record(line: &str) -> bool {
    line.starts_with(RECORD_MARKER)
}

/// Splits an `ATOM` line into its columns. Columns past the end of a short
/// line read as empty.
pub fn parse_record(line: &str) -> AtomRecord<'_> {
    AtomRecord {
        atom_name: column(line, ATOM_NAME),
        residue_name: column(line, RESIDUE_NAME),
        coord_fields: [column(line, X), column(line, Y), column(line, Z)],
    }
}

/// Parses one `ATOM` line into an [`Atom`] the way [`read`] does in lenient
/// mode.
pub fn parse_atom(line: &str) -> Atom {
    let record = parse_record(line);
    resolve(&record, record.lenient_position()).0
}

/// Builds the atom for `record` at `position`, with its radius looked up by
/// the padded name columns. The flag is `false` when the lookup missed and the
/// default radius was used.
fn resolve(record: &AtomRecord<'_>, position: [f64; 3]) -> (Atom, bool) {
    let lookup = table::lookup(record.residue_name, record.atom_name);
    (Atom::new(position, lookup.radius), lookup.found)
}

fn column(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("")
}

/// Value of the longest numeric prefix of `field` after leading whitespace:
/// optional sign, digits with an optional fraction, then an exponent only if
/// it has digits. `0.0` when no digit is found.
fn leading_float(field: &str) -> f64 {
    let text = field.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

pub fn read<R: BufRead, E: Extend<Atom>>(
    reader: R,
    strict: bool,
    sink: &mut E,
) -> Result<ReadSummary, Error> {
    table::init();

    let mut summary = ReadSummary::default();
    for_each_line(reader, |ln, line| {
        if !is_atom_record(line) {
            return;
        }

        let record = parse_record(line);
        let position = if strict {
            match record.coords() {
                [Some(x), Some(y), Some(z)] => [x, y, z],
                coords => {
                    let axis = coords.iter().position(Option::is_none).unwrap_or(0);
                    let diag = Error::malformed(
                        Format::Pdb,
                        ln,
                        format!("invalid {} coordinate", ['x', 'y', 'z'][axis]),
                    );
                    warn!("{diag}, skipping record");
                    summary.malformed += 1;
                    return;
                }
            }
        } else {
            record.lenient_position()
        };

        let (atom, found) = resolve(&record, position);
        if !found {
            summary.unresolved += 1;
        }
        sink.extend(std::iter::once(atom));
        summary.records += 1;
    })?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DEFAULT_RADIUS;
    use std::collections::VecDeque;
    use std::io::Cursor;

    const ALA_CA: &str =
        "ATOM      2  CA  ALA A   1      11.104   6.134  -6.504  1.00  0.00           C";
    const GLY_N: &str =
        "ATOM      5  N   GLY A   2       0.000   0.000   0.000  1.00  0.00           N";
    const UNKNOWN: &str =
        "ATOM      9  XX  ZZZ A   3       1.000   2.000   3.000  1.00  0.00           X";
    const HETATM: &str =
        "HETATM   10  O   HOH A   4       5.000   5.000   5.000  1.00  0.00           O";

    fn read_str(input: &str, strict: bool) -> (Vec<Atom>, ReadSummary) {
        let mut atoms = Vec::new();
        let summary = read(Cursor::new(input.to_string()), strict, &mut atoms).expect("read");
        (atoms, summary)
    }

    #[test]
    fn splits_fixed_columns_without_trimming_names() {
        let record = parse_record(ALA_CA);
        assert_eq!(record.atom_name, " CA ");
        assert_eq!(record.residue_name, "ALA");
        assert_eq!(record.coord_fields, ["  11.104", "   6.134", "  -6.504"]);
        assert_eq!(record.coords(), [Some(11.104), Some(6.134), Some(-6.504)]);
    }

    #[test]
    fn numeric_prefix_is_read_like_atof() {
        assert_eq!(leading_float("   6.1.4"), 6.1);
        assert_eq!(leading_float(" 1.5e2x"), 150.0);
        assert_eq!(leading_float("  -.5"), -0.5);
        assert_eq!(leading_float("+3."), 3.0);
        assert_eq!(leading_float("1e"), 1.0);
        assert_eq!(leading_float("2.5E-1z"), 0.25);
        assert_eq!(leading_float("e5"), 0.0);
        assert_eq!(leading_float("  -"), 0.0);
        assert_eq!(leading_float(""), 0.0);
    }

    #[test]
    fn parse_atom_matches_lenient_read() {
        let line = ALA_CA.replace("   6.134", "   6.1.4");
        let (atoms, _) = read_str(&line, false);
        assert_eq!(parse_atom(&line), atoms[0]);
        assert_eq!(atoms[0].position, [11.104, 6.1, -6.504]);
    }

    #[test]
    fn parse_atom_resolves_radius_from_table() {
        let atom = parse_atom(ALA_CA);
        assert_eq!(atom.position, [11.104, 6.134, -6.504]);
        assert_eq!(atom.radius, 1.750);
    }

    #[test]
    fn only_atom_records_are_read() {
        let input = format!("REMARK   1\n{ALA_CA}\n{HETATM}\n{GLY_N}\nTER\nEND\n");
        let (atoms, summary) = read_str(&input, false);
        assert_eq!(summary.records, 2);
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[1].radius, 1.625);
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert!(is_atom_record(ALA_CA));
        assert!(!is_atom_record(&ALA_CA.replacen("ATOM", "atom", 1)));
        assert!(!is_atom_record(HETATM));
    }

    #[test]
    fn unresolved_names_keep_default_radius() {
        let (atoms, summary) = read_str(UNKNOWN, false);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(atoms[0].radius, DEFAULT_RADIUS);
        assert_eq!(atoms[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn lenient_mode_reads_bad_coordinates_as_zero() {
        let line = ALA_CA.replace("  11.104", "  abcdef");
        let (atoms, summary) = read_str(&line, false);
        assert_eq!(summary.malformed, 0);
        assert_eq!(atoms[0].position, [0.0, 6.134, -6.504]);
    }

    #[test]
    fn strict_mode_skips_bad_coordinates() {
        let bad = ALA_CA.replace("   6.134", "   6.1.4");
        let input = format!("{bad}\n{GLY_N}\n");
        let (atoms, summary) = read_str(&input, true);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(atoms[0].radius, 1.625);

        let (atoms, summary) = read_str(&input, false);
        assert_eq!(summary.malformed, 0);
        assert_eq!(atoms[0].position, [11.104, 6.1, -6.504]);
    }

    #[test]
    fn truncated_line_degrades_to_zero_and_default() {
        let (atoms, summary) = read_str("ATOM      1", false);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(atoms[0], Atom::new([0.0; 3], DEFAULT_RADIUS));
    }

    #[test]
    fn accepts_any_extend_sink() {
        let mut sink: VecDeque<Atom> = VecDeque::new();
        let summary = read(Cursor::new(format!("{GLY_N}\n{ALA_CA}\n")), false, &mut sink)
            .expect("read");
        assert_eq!(summary.records, 2);
        assert_eq!(sink.front().map(|a| a.radius), Some(1.625));
        assert_eq!(sink.back().map(|a| a.radius), Some(1.750));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let (atoms, summary) = read_str("", false);
        assert!(atoms.is_empty());
        assert_eq!(summary, ReadSummary::default());
    }
}
