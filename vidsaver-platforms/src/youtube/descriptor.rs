//! YouTube platform descriptor.

use vidsaver_core::Platform;
use vidsaver_fetch::{ExtractContext, ExtractPipeline};

use super::strategies::YouTubeApiStrategy;
use crate::descriptor::{CliConfig, FetchPlan, PlatformDescriptor};

/// Descriptor for YouTube videos and shorts.
pub fn youtube_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: Platform::YouTube,
        display_name: Platform::YouTube.display_name(),
        hosts: Platform::YouTube.hosts(),
        fetch_plan: FetchPlan {
            build_pipeline: build_youtube_pipeline,
        },
        cli: CliConfig {
            name: Platform::YouTube.cli_name(),
            aliases: Platform::YouTube.aliases(),
        },
    }
}

fn build_youtube_pipeline(_ctx: &ExtractContext) -> ExtractPipeline {
    ExtractPipeline::with_strategies(vec![Box::new(YouTubeApiStrategy::new())])
}
