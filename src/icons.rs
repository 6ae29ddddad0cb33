//! Icon classification, registration and cache replay.
//!
//! Every element with a resolvable icon file gets a synthesized icon
//! identifier registered with the host's icon registry. That registry is
//! not persistent across requests, so each registration is also written to
//! the cache under the [`ICON_CACHE_TAG`] tag; on a page-TSconfig cache hit
//! the whole set is replayed from the cache without touching the
//! filesystem.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::ConfigCache;
use crate::config::WizardSettings;
use crate::constants::{ICON_CACHE_TAG, ICON_IDENTIFIER_PREFIX, PAGE_TS_CACHE_TTL};

/// How the host should rasterize an icon source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconProviderKind {
    /// Scalable source (`svg`, `svgz`).
    Vector,
    /// Anything else (png, gif, ...).
    Raster,
}

/// Classifies an icon file by its extension, case-insensitively.
pub fn provider_for_extension(extension: &str) -> IconProviderKind {
    match extension.to_ascii_lowercase().as_str() {
        "svg" | "svgz" => IconProviderKind::Vector,
        _ => IconProviderKind::Raster,
    }
}

/// One icon registration, as handed to the registrar and as persisted in
/// the tagged cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRegistration {
    /// Synthesized identifier (`icon-fluidcontent-<elementId>`).
    pub identifier: String,
    /// Provider kind derived from the source file extension.
    pub provider: IconProviderKind,
    /// Icon source file.
    pub source: PathBuf,
    /// Display width in the host's dimension syntax.
    pub width: String,
    /// Display height in the host's dimension syntax.
    pub height: String,
}

/// Host icon-registry capability. Registration is idempotent per
/// identifier; registering the same identifier twice is harmless.
pub trait IconRegistrar {
    /// Registers `registration` with the host registry.
    fn register(&self, registration: &IconRegistration);
}

/// Resolves element icons against the filesystem, registering and caching
/// whatever it finds.
pub struct IconResolver<'a> {
    registrar: &'a dyn IconRegistrar,
    cache: Option<&'a dyn ConfigCache>,
    settings: &'a WizardSettings,
}

impl<'a> IconResolver<'a> {
    /// Builds a resolver. `cache` being `None` disables persistence; icons
    /// are still registered for the current request.
    pub fn new(
        registrar: &'a dyn IconRegistrar,
        cache: Option<&'a dyn ConfigCache>,
        settings: &'a WizardSettings,
    ) -> Self {
        Self {
            registrar,
            cache,
            settings,
        }
    }

    /// Resolves the icon for one element and returns its synthesized
    /// identifier, or `None` when neither the declared icon nor the default
    /// icon exists on disk.
    pub fn resolve(&self, element_id: &str, declared: Option<&Path>) -> Option<String> {
        let source = declared.or(self.settings.default_icon.as_deref())?;
        if !source.is_file() {
            debug!(icon = %source.display(), "icon source missing, element keeps no icon");
            return None;
        }
        let extension = source.extension().and_then(|e| e.to_str()).unwrap_or("");
        let registration = IconRegistration {
            identifier: format!("{ICON_IDENTIFIER_PREFIX}{element_id}"),
            provider: provider_for_extension(extension),
            source: source.to_path_buf(),
            width: self.settings.icon_width.clone(),
            height: self.settings.icon_height.clone(),
        };
        self.registrar.register(&registration);
        if let Some(cache) = self.cache {
            persist_registration(cache, &registration, PAGE_TS_CACHE_TTL);
        }
        Some(registration.identifier)
    }
}

fn persist_registration(cache: &dyn ConfigCache, registration: &IconRegistration, ttl: Duration) {
    match serde_json::to_string(registration) {
        Ok(payload) => {
            cache.set(&registration.identifier, &payload, &[ICON_CACHE_TAG], ttl);
        }
        Err(err) => {
            warn!(identifier = %registration.identifier, %err, "failed to serialize icon registration");
        }
    }
}

/// Replays every cached icon registration into the registrar.
///
/// Called on a page-TSconfig cache hit; no filesystem access happens here.
/// Undecodable entries are skipped with a warning. Returns the number of
/// icons registered.
pub fn replay_cached_icons(cache: &dyn ConfigCache, registrar: &dyn IconRegistrar) -> usize {
    let mut replayed = 0;
    for (key, payload) in cache.entries_tagged(ICON_CACHE_TAG) {
        match serde_json::from_str::<IconRegistration>(&payload) {
            Ok(registration) => {
                registrar.register(&registration);
                replayed += 1;
            }
            Err(err) => {
                warn!(cache_key = %key, %err, "skipping undecodable cached icon entry");
            }
        }
    }
    debug!(count = replayed, "replayed cached icon registrations");
    replayed
}
