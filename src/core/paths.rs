use std::path::{Path, PathBuf};

/// Metadata file looked up inside each utility directory.
pub const METADATA_FILE_NAME: &str = "util.json";

/// Template file name, resolved under the site root unless overridden.
pub const TEMPLATE_FILE_NAME: &str = "index-template.html";

/// Generated index file name, resolved under the site root unless overridden.
pub const OUTPUT_FILE_NAME: &str = "index.html";

/// util.json path inside a utility directory
pub fn metadata(utility_dir: &Path) -> PathBuf {
    utility_dir.join(METADATA_FILE_NAME)
}

/// Default template path under the site root
pub fn default_template(root: &Path) -> PathBuf {
    root.join(TEMPLATE_FILE_NAME)
}

/// Default output path under the site root
pub fn default_output(root: &Path) -> PathBuf {
    root.join(OUTPUT_FILE_NAME)
}
