//! Platform descriptor system.
//!
//! A descriptor holds the static configuration for one platform:
//! - Identity and display name
//! - Hosts it answers for
//! - Fetch plan (which strategies run, in which order)
//! - CLI naming

use vidsaver_core::Platform;
use vidsaver_fetch::{ExtractContext, ExtractPipeline};

// ============================================================================
// Platform Descriptor
// ============================================================================

/// Complete descriptor for a platform.
pub struct PlatformDescriptor {
    /// Platform identifier.
    pub id: Platform,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Hosts routed to this platform. Subdomains match too.
    pub hosts: &'static [&'static str],
    /// How to extract media.
    pub fetch_plan: FetchPlan,
    /// CLI naming.
    pub cli: CliConfig,
}

impl PlatformDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.cli.name
    }

    /// Builds the strategy pipeline for this platform.
    pub fn build_pipeline(&self, ctx: &ExtractContext) -> ExtractPipeline {
        (self.fetch_plan.build_pipeline)(ctx)
    }
}

impl std::fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("id", &self.id)
            .field("hosts", &self.hosts)
            .field("cli", &self.cli.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Plan
// ============================================================================

/// How a platform's pipeline is assembled.
pub struct FetchPlan {
    /// Builds the ordered strategy list.
    pub build_pipeline: fn(&ExtractContext) -> ExtractPipeline,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            build_pipeline: |_| ExtractPipeline::new(),
        }
    }
}

// ============================================================================
// CLI Config
// ============================================================================

/// CLI naming for a platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliConfig {
    /// Primary name accepted by `--platform`.
    pub name: &'static str,
    /// Alternative names.
    pub aliases: &'static [&'static str],
}
