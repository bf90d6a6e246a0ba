use clap::Args;
use vitrine::index;

use crate::commands::{expand_path, CmdResult};

#[derive(Args)]
pub struct ListArgs {
    /// Site root to scan for utility directories
    #[arg(long, default_value = ".")]
    pub root: String,
}

pub fn run(args: ListArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<index::ListOutput> {
    let root = expand_path(&args.root);

    if !root.is_dir() {
        return Err(vitrine::Error::validation_invalid_argument(
            "root",
            format!("'{}' is not a directory", args.root),
            None,
        ));
    }

    index::list(&root)
}
