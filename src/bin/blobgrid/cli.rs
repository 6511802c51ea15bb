use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "blobgrid",
    about = "Gaussian density fields from molecular coordinate files",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a structure and report atoms, radius lookups and bounds
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),

    /// Synthesize the density field and report lattice statistics
    #[command(visible_alias = "f")]
    Field(FieldArgs),
}

impl Command {
    pub fn input(&self) -> &InputOptions {
        match self {
            Command::Inspect(args) => &args.input,
            Command::Field(args) => &args.input,
        }
    }
}

/// Input and diagnostics options shared by all commands.
#[derive(Args)]
pub struct InputOptions {
    /// Coordinate file (.pdb, .pqr or .xyzr)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (inferred from the extension if omitted)
    #[arg(long, value_name = "FMT")]
    pub format: Option<InputFormat>,

    /// Skip PDB records with unparsable coordinates instead of reading them as 0.0
    #[arg(long)]
    pub strict: bool,

    /// Kernel sharpness (must be positive)
    #[arg(short, long, value_name = "B", default_value = "8.0")]
    pub blobbyness: f64,

    /// Suppress progress output and warnings (for scripting)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputOptions,
}

#[derive(Args)]
pub struct FieldArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub lattice: LatticeOptions,
}

/// Lattice sizing and synthesis options.
#[derive(Args)]
#[command(next_help_heading = "Lattice")]
pub struct LatticeOptions {
    /// Target voxel edge length in Å
    #[arg(long, value_name = "Å", default_value = "0.5", conflicts_with = "dims")]
    pub spacing: f64,

    /// Exact sample counts per axis, as NX,NY,NZ
    #[arg(long, value_name = "NX,NY,NZ", value_delimiter = ',')]
    pub dims: Option<Vec<usize>>,

    /// Threshold counted as inside the surface
    #[arg(long, value_name = "ISO", default_value = "1e-6")]
    pub isovalue: f32,

    /// Accumulate on all cores
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    Pdb,
    Pqr,
    Xyzr,
}

pub fn parse() -> Cli {
    Cli::parse()
}
