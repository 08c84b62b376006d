use clap::Parser;
use tascript::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
