use clap::Parser;
use gqlmap_cli::args::CliArgs;
use gqlmap_cli::driver;
use gqlmap_cli::tracing_config::LogConfig;
use std::process::ExitCode;

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let args = CliArgs::parse();
    LogConfig::resolve(args.log_format).install();

    match driver::run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
