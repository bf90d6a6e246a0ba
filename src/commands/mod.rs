use std::path::PathBuf;

pub type CmdResult<T> = vitrine::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Expand `~` in a user-supplied path argument.
pub(crate) fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (vitrine::Result<serde_json::Value>, i32) {
    crate::tty::status("vitrine is working...");

    match command {
        crate::Commands::Build(args) => dispatch!(args, global, build),
        crate::Commands::Index(args) => dispatch!(args, global, index),
        crate::Commands::List(args) => dispatch!(args, global, list),
    }
}

pub mod build;
pub mod index;
pub mod list;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_path_passes_plain_paths_through() {
        assert_eq!(expand_path("/tmp/site"), PathBuf::from("/tmp/site"));
        assert_eq!(expand_path("relative/site"), PathBuf::from("relative/site"));
    }
}
