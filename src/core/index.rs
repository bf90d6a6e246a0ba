use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths;
use crate::render;
use crate::scan::{self, Utility};
use crate::template;
use crate::utils::io;

/// Options for one index generation run.
///
/// Every path is explicit configuration; nothing is inferred from the
/// binary's own location.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub root: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub base_url: String,
}

impl IndexOptions {
    /// Default template and output locations under a site root.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let template = paths::default_template(&root);
        let output = paths::default_output(&root);
        Self {
            root,
            template,
            output,
            base_url: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOutput {
    pub command: String,
    pub output: String,
    pub utility_count: usize,
    pub utilities: Vec<Utility>,
}

/// Generate the index document: scan, render, substitute, write.
///
/// A missing template aborts before any scanning happens and nothing is
/// written. Individual bad utilities only shrink the listed set. The
/// output file is fully regenerated on every run.
pub fn generate(options: &IndexOptions) -> Result<(IndexOutput, i32)> {
    if !options.template.is_file() {
        return Err(Error::template_not_found(
            options.template.display().to_string(),
        ));
    }

    let utilities = scan::discover(&options.root)?;
    log_status!("index", "Found {} utilities", utilities.len());

    let fragment = render::render_utilities(&utilities, &options.base_url);

    let template = io::read_file(&options.template, "read template")?;
    if !template::has_placeholder(&template) {
        log_status!(
            "index",
            "Warning: template {} has no {} marker; writing it through unchanged",
            options.template.display(),
            template::UTILITIES_PLACEHOLDER
        );
    }

    let document = template::apply(&template, &fragment);
    io::write_file_atomic(&options.output, &document, "write index")?;

    log_status!("index", "Generated {}", options.output.display());

    Ok((
        IndexOutput {
            command: "index.generate".to_string(),
            output: options.output.display().to_string(),
            utility_count: utilities.len(),
            utilities,
        },
        0,
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    pub command: String,
    pub root: String,
    pub utility_count: usize,
    pub utilities: Vec<Utility>,
}

/// Scan a site root without touching the template or output file.
pub fn list(root: &Path) -> Result<(ListOutput, i32)> {
    let utilities = scan::discover(root)?;

    Ok((
        ListOutput {
            command: "index.list".to_string(),
            root: root.display().to_string(),
            utility_count: utilities.len(),
            utilities,
        },
        0,
    ))
}
