use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let input = cli.command.input();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::log_level(input).as_str()),
    )
    .format_timestamp(None)
    .init();

    let ctx = display::Context::detect().with_quiet(input.quiet);

    match commands::dispatch(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
