use anyhow::{Result, bail};
use log::LevelFilter;

use blobgrid::io::{Format, ReadOptions};
use blobgrid::{FieldConfig, Resolution};

use crate::cli::{InputFormat, InputOptions, LatticeOptions};

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Pdb => Format::Pdb,
            InputFormat::Pqr => Format::Pqr,
            InputFormat::Xyzr => Format::Xyzr,
        }
    }
}

pub fn build_read_options(opts: &InputOptions) -> ReadOptions {
    ReadOptions {
        format: opts.format.map(Format::from),
        strict: opts.strict,
    }
}

pub fn build_field_config(input: &InputOptions, lattice: &LatticeOptions) -> Result<FieldConfig> {
    let resolution = match lattice.dims.as_deref() {
        Some(&[nx, ny, nz]) => Resolution::Fixed([nx, ny, nz]),
        Some(other) => bail!(
            "--dims expects exactly three comma-separated values, got {}",
            other.len()
        ),
        None => Resolution::Spacing(lattice.spacing),
    };

    Ok(FieldConfig {
        blobbyness: input.blobbyness,
        resolution,
        parallel: lattice.parallel,
    })
}

/// Default level for the `log` facade; `RUST_LOG` still takes precedence.
pub fn log_level(opts: &InputOptions) -> LevelFilter {
    if opts.quiet {
        return LevelFilter::Error;
    }
    match opts.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
