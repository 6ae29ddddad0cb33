//! Template discovery.
//!
//! Content-element templates live under the `Content/` subdirectory of each
//! registered template root. The scan is a pure read: a missing directory
//! simply contributes no templates.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::constants::{TEMPLATE_EXTENSION, TEMPLATE_SUBDIR};

/// One discovered template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Absolute (or root-relative) path of the file on disk.
    pub path: PathBuf,
    /// Path relative to the `Content/` directory, with `/` separators.
    /// This is the `<relativeFile>` part of element ids and identities.
    pub relative: String,
}

/// Finds all template files under `root`'s `Content/` subdirectory.
///
/// Traversal is recursive, does not follow symlinks, and is sorted by file
/// name so discovery order is deterministic across platforms. Only files
/// with the `html` extension are returned; a missing directory yields an
/// empty list.
pub fn find_content_templates(root: &Path) -> Vec<TemplateFile> {
    let content_dir = root.join(TEMPLATE_SUBDIR);
    if !content_dir.is_dir() {
        debug!(path = %content_dir.display(), "template directory missing, skipping");
        return Vec::new();
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(&content_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_template = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == TEMPLATE_EXTENSION);
        if !is_template {
            continue;
        }
        let Ok(relative) = path.strip_prefix(&content_dir) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        templates.push(TemplateFile {
            path: path.to_path_buf(),
            relative,
        });
    }
    debug!(root = %root.display(), count = templates.len(), "scanned template root");
    templates
}
