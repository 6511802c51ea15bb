mod field;
mod inspect;

use field::run_field;
use inspect::run_inspect;

use anyhow::Result;

use blobgrid::Atom;
use blobgrid::io::{Error as ReadError, Format, ReadOptions, ReadSummary, read_atoms};

use crate::cli::{Command, InputOptions};
use crate::config::build_read_options;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Inspect(args) => run_inspect(args, ctx),
        Command::Field(args) => run_field(args, ctx),
    }
}

/// Atoms read from the command's input file.
struct Structure {
    atoms: Vec<Atom>,
    summary: ReadSummary,
    format: Format,
}

fn read_structure(input: &InputOptions) -> Result<Structure> {
    let options = build_read_options(input);
    let format = resolve_format(input, &options)?;

    let mut atoms = Vec::new();
    let summary = read_atoms(
        &input.file,
        &ReadOptions {
            format: Some(format),
            ..options
        },
        &mut atoms,
    )?;

    Ok(Structure {
        atoms,
        summary,
        format,
    })
}

fn resolve_format(input: &InputOptions, options: &ReadOptions) -> Result<Format> {
    options
        .format
        .or_else(|| Format::from_path(&input.file))
        .ok_or_else(|| ReadError::UnknownFormat(input.file.clone()).into())
}

fn read_details(structure: &Structure) -> Vec<String> {
    let mut details = vec![format!(
        "Parse {} records ({} atoms)",
        structure.format, structure.summary.records
    )];
    if structure.summary.unresolved > 0 {
        details.push(format!(
            "{} atoms fell back to the default radius",
            structure.summary.unresolved
        ));
    }
    if structure.summary.malformed > 0 {
        details.push(format!(
            "{} malformed lines skipped",
            structure.summary.malformed
        ));
    }
    details
}
