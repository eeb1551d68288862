//! Platform registry for managing all platform descriptors.
//!
//! The registry provides static access to every platform configuration
//! and routes URLs to the platform that serves them.

use std::collections::HashMap;
use std::sync::OnceLock;

use vidsaver_core::Platform;

use crate::descriptor::PlatformDescriptor;
use crate::facebook::facebook_descriptor;
use crate::instagram::instagram_descriptor;
use crate::youtube::youtube_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all platform descriptors.
static DESCRIPTORS: OnceLock<Vec<PlatformDescriptor>> = OnceLock::new();

/// Static storage for CLI name to platform mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, Platform>> = OnceLock::new();

fn init_descriptors() -> Vec<PlatformDescriptor> {
    vec![
        instagram_descriptor(),
        facebook_descriptor(),
        youtube_descriptor(),
    ]
}

/// Builds the CLI name to platform mapping.
fn build_cli_name_map(descriptors: &[PlatformDescriptor]) -> HashMap<String, Platform> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.cli.name.to_string(), desc.id);
        for alias in desc.cli.aliases {
            map.insert((*alias).to_string(), desc.id);
        }
    }

    map
}

// ============================================================================
// Platform Registry
// ============================================================================

/// Global registry of all platform descriptors.
///
/// Initialized lazily on first access.
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Returns all platform descriptors.
    pub fn all() -> &'static [PlatformDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a platform descriptor by id.
    pub fn get(id: Platform) -> Option<&'static PlatformDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the CLI name to platform mapping.
    pub fn cli_name_map() -> &'static HashMap<String, Platform> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a platform by CLI name or alias.
    pub fn get_by_cli_name(name: &str) -> Option<&'static PlatformDescriptor> {
        let id = Self::cli_name_map().get(&name.trim().to_ascii_lowercase())?;
        Self::get(*id)
    }

    /// Finds the platform serving a post URL.
    pub fn detect(raw_url: &str) -> Option<&'static PlatformDescriptor> {
        Self::get(Platform::from_url(raw_url)?)
    }

    /// Returns the number of registered platforms.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all platform ids.
    pub fn platforms() -> Vec<Platform> {
        Self::all().iter().map(|d| d.id).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
