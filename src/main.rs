use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{build, index, list};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version = VERSION)]
#[command(about = "CLI for building and indexing a static utility directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single utility from its util.json metadata
    Build(build::BuildArgs),
    /// Generate the HTML index from the site template
    Index(index::IndexArgs),
    /// List discovered utilities without generating the index
    List(list::ListArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    match output::print_json_result(json_result) {
        Ok(()) => std::process::ExitCode::from(exit_code_to_u8(exit_code)),
        Err(_) => std::process::ExitCode::from(1),
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
