use std::io::{self, Write};
use std::path::Path;

use blobgrid::io::ReadSummary;
use blobgrid::{BoundingBox, DensityField};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_read_summary(path: &Path, format: &str, summary: &ReadSummary) {
    let rows = vec![
        ("File", path.display().to_string()),
        ("Format", format.to_string()),
        ("Atoms", summary.records.to_string()),
        ("Default radius", summary.unresolved.to_string()),
        ("Skipped lines", summary.malformed.to_string()),
    ];
    print_kv_table(&mut io::stdout().lock(), "Structure Summary", &rows);
}

pub fn print_bounds(bounds: &BoundingBox, blobbyness: f64) {
    let extent = bounds.extent();
    let rows = vec![
        ("Blobbyness", format!("{blobbyness}")),
        ("Min (Å)", triple(bounds.min)),
        ("Max (Å)", triple(bounds.max)),
        ("Extent (Å)", triple(extent)),
    ];
    print_kv_table(&mut io::stdout().lock(), "Bounding Box", &rows);
}

pub fn print_field_summary(field: &DensityField, isovalue: f32) {
    let [nx, ny, nz] = field.dims();
    let (lo, hi) = field.value_range();
    let inside = field.count_at_or_above(isovalue);
    let total = field.lattice().len();
    let pct = if total == 0 {
        0.0
    } else {
        inside as f64 * 100.0 / total as f64
    };

    let rows = vec![
        ("Lattice", format!("{nx} × {ny} × {nz}")),
        ("Samples", total.to_string()),
        ("Spacing (Å)", triple(field.spacing())),
        ("Min value", format!("{lo:.4e}")),
        ("Max value", format!("{hi:.4e}")),
        ("Isovalue", format!("{isovalue:.4e}")),
        ("At or above", format!("{inside} ({pct:.1}%)")),
    ];
    print_kv_table(&mut io::stdout().lock(), "Density Field", &rows);
}

fn triple(v: [f64; 3]) -> String {
    format!("{:.3}, {:.3}, {:.3}", v[0], v[1], v[2])
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(out, "{INDENT}├{k_line}┼{v_line}┤");

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}
