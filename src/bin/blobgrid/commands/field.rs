use anyhow::{Context, Result};

use blobgrid::synthesize;

use super::{read_details, read_structure};
use crate::cli::FieldArgs;
use crate::config::build_field_config;
use crate::display::{
    Context as DisplayContext, Progress, print_bounds, print_field_summary, print_read_summary,
};

const TOTAL_STAGES: u8 = 2;

pub fn run_field(args: FieldArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_field_config(&args.input, &args.lattice)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STAGES);

    progress.begin("Reading structure");
    let structure = read_structure(&args.input)?;
    progress.done("Reading structure", &read_details(&structure));

    progress.begin("Synthesizing density field");
    let field = synthesize(&structure.atoms, &config).context("Density synthesis failed")?;
    let [nx, ny, nz] = field.dims();
    let mode = if config.parallel {
        format!("{} threads", rayon::current_num_threads())
    } else {
        "single thread".to_string()
    };
    progress.done(
        "Synthesizing density field",
        &[
            format!("Lattice {nx} × {ny} × {nz}"),
            format!("Accumulate kernels ({mode})"),
        ],
    );

    progress.finish("Field complete");

    print_read_summary(
        &args.input.file,
        &structure.format.to_string(),
        &structure.summary,
    );
    print_bounds(field.bounds(), config.blobbyness);
    print_field_summary(&field, args.lattice.isovalue);

    Ok(())
}
