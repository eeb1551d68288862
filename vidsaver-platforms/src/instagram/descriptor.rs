//! Instagram platform descriptor.

use vidsaver_core::Platform;
use vidsaver_fetch::{ExtractContext, ExtractPipeline};

use super::strategies::{InstagramEmbedStrategy, InstagramJsonStrategy, InstagramPageStrategy};
use crate::descriptor::{CliConfig, FetchPlan, PlatformDescriptor};

/// Descriptor for Instagram posts and reels.
pub fn instagram_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: Platform::Instagram,
        display_name: Platform::Instagram.display_name(),
        hosts: Platform::Instagram.hosts(),
        fetch_plan: FetchPlan {
            build_pipeline: build_instagram_pipeline,
        },
        cli: CliConfig {
            name: Platform::Instagram.cli_name(),
            aliases: Platform::Instagram.aliases(),
        },
    }
}

fn build_instagram_pipeline(_ctx: &ExtractContext) -> ExtractPipeline {
    ExtractPipeline::with_strategies(vec![
        Box::new(InstagramJsonStrategy::new()),
        Box::new(InstagramEmbedStrategy::new()),
        Box::new(InstagramPageStrategy::new()),
    ])
}
