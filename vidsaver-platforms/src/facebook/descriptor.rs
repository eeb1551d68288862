//! Facebook platform descriptor.

use vidsaver_core::Platform;
use vidsaver_fetch::{ExtractContext, ExtractPipeline};

use super::strategies::FacebookPageStrategy;
use crate::descriptor::{CliConfig, FetchPlan, PlatformDescriptor};

/// Descriptor for Facebook videos, reels and `fb.watch` links.
pub fn facebook_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: Platform::Facebook,
        display_name: Platform::Facebook.display_name(),
        hosts: Platform::Facebook.hosts(),
        fetch_plan: FetchPlan {
            build_pipeline: build_facebook_pipeline,
        },
        cli: CliConfig {
            name: Platform::Facebook.cli_name(),
            aliases: Platform::Facebook.aliases(),
        },
    }
}

fn build_facebook_pipeline(_ctx: &ExtractContext) -> ExtractPipeline {
    ExtractPipeline::with_strategies(vec![Box::new(FacebookPageStrategy::new())])
}
