use clap::Args;
use vitrine::index::{self, IndexOptions};

use crate::commands::{expand_path, CmdResult};

#[derive(Args)]
pub struct IndexArgs {
    /// Site root to scan for utility directories
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Template file (defaults to <root>/index-template.html)
    #[arg(long)]
    pub template: Option<String>,

    /// Output file (defaults to <root>/index.html)
    #[arg(long)]
    pub out: Option<String>,

    /// Public base URL prefixed to utility links
    #[arg(long, default_value = "")]
    pub base_url: String,
}

pub fn run(
    args: IndexArgs,
    _global: &crate::commands::GlobalArgs,
) -> CmdResult<index::IndexOutput> {
    let root = expand_path(&args.root);

    if !root.is_dir() {
        return Err(vitrine::Error::validation_invalid_argument(
            "root",
            format!("'{}' is not a directory", args.root),
            None,
        ));
    }

    let mut options = IndexOptions::for_root(root);
    if let Some(template) = &args.template {
        options.template = expand_path(template);
    }
    if let Some(out) = &args.out {
        options.output = expand_path(out);
    }
    options.base_url = args.base_url;

    index::generate(&options)
}
