use clap::Args;
use vitrine::build;

use crate::commands::{expand_path, CmdResult};

#[derive(Args)]
pub struct BuildArgs {
    /// Utility directory containing util.json
    pub dir: String,

    /// Kill the build command after this many seconds (0 disables the limit)
    #[arg(long, default_value_t = build::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

pub fn run(
    args: BuildArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<build::BuildOutput> {
    let dir = expand_path(&args.dir);

    if !dir.is_dir() {
        return Err(vitrine::Error::validation_invalid_argument(
            "dir",
            format!("'{}' is not a directory", args.dir),
            Some(vec![
                "Build a utility: vitrine build <utility-directory>".to_string(),
            ]),
        ));
    }

    build::run(&dir, args.timeout)
}
