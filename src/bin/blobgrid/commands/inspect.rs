use anyhow::{Context, Result};

use blobgrid::bounding_box;

use super::{read_details, read_structure};
use crate::cli::InspectArgs;
use crate::display::{Context as DisplayContext, Progress, print_bounds, print_read_summary};

const TOTAL_STAGES: u8 = 2;

pub fn run_inspect(args: InspectArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STAGES);

    progress.begin("Reading structure");
    let structure = read_structure(&args.input)?;
    progress.done("Reading structure", &read_details(&structure));

    progress.begin("Computing bounding box");
    let bounds = bounding_box(&structure.atoms, args.input.blobbyness)
        .context("Cannot bound the structure")?;
    progress.done("Computing bounding box", &[]);

    progress.finish("Inspection complete");

    print_read_summary(
        &args.input.file,
        &structure.format.to_string(),
        &structure.summary,
    );
    print_bounds(&bounds, args.input.blobbyness);

    Ok(())
}
