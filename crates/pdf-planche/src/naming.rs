//! Output file naming
//!
//! A composed file is named `<base>-planche.pdf`. The base is either given
//! explicitly or taken from the input file stem, minus a trailing
//! "cropped" marker left by the cropping step.

use crate::constants::{CROPPED_SUFFIXES, PDF_EXTENSION, PLANCHE_SUFFIX};
use std::path::{Path, PathBuf};

/// Remove the first matching "cropped" suffix, if any.
///
/// Suffixes are tried in a fixed order and matched case-sensitively; at most
/// one is removed.
pub fn strip_cropped_suffix(stem: &str) -> &str {
    CROPPED_SUFFIXES
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix))
        .unwrap_or(stem)
}

/// File name of the planche for `base`
pub fn planche_file_name(base: &str) -> String {
    format!("{}{}.{}", base, PLANCHE_SUFFIX, PDF_EXTENSION)
}

/// Base name derived from an input path
pub fn derive_base_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    strip_cropped_suffix(&stem).to_string()
}

/// Output path next to `input`.
///
/// An explicit `base_name` is used verbatim; otherwise the base is derived
/// from the input file name.
pub fn planche_output_path(input: &Path, base_name: Option<&str>) -> PathBuf {
    let base = match base_name {
        Some(base) => base.to_string(),
        None => derive_base_name(input),
    };
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(planche_file_name(&base))
}
