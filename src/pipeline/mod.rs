// Tue Oct 20 2026 - Alex

pub mod error;

pub use error::PipelineError;

use crate::capture::CaptureResult;
use crate::config::Config;
use crate::linkmap::{LinkMap, LinkMapParser, ParseStats};
use crate::order::{GenerationStats, OrderFile, OrderFileGenerator};
use crate::resolver::{AddressResolver, ResolveStats};
use crate::utils::logging::scoped_timer;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub order_file: OrderFile,
    pub parse_stats: ParseStats,
    pub resolve_stats: ResolveStats,
    pub generation_stats: GenerationStats,
    pub symbol_count: usize,
}

/// Link map parse, trace resolution and order file generation, in that order.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser(&self) -> LinkMapParser {
        LinkMapParser::new(self.config.eligibility_filter())
    }

    pub fn load_link_map<P: AsRef<Path>>(&self, path: P) -> Result<(LinkMap, ParseStats), PipelineError> {
        let _timer = scoped_timer("parse link map");
        Ok(self.parser().parse_file(path)?)
    }

    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, link_map: P, capture: Q) -> Result<PipelineOutput, PipelineError> {
        self.config.validate()?;
        let (map, parse_stats) = self.load_link_map(link_map)?;
        let capture = CaptureResult::load(capture)?;
        Ok(self.generate(&map, parse_stats, &capture))
    }

    pub fn run_in_memory(&self, link_map: &str, capture: &CaptureResult) -> Result<PipelineOutput, PipelineError> {
        self.config.validate()?;
        let (map, parse_stats) = {
            let _timer = scoped_timer("parse link map");
            self.parser().parse_with_stats(link_map)
        };
        Ok(self.generate(&map, parse_stats, capture))
    }

    fn generate(&self, map: &LinkMap, parse_stats: ParseStats, capture: &CaptureResult) -> PipelineOutput {
        if capture.is_empty() {
            log::warn!("Capture contains no addresses; order file will only hold the remaining symbols");
        }

        let trace = {
            let _timer = scoped_timer("resolve addresses");
            AddressResolver::new(map).resolve(capture)
        };

        let filter = self.config.eligibility_filter();
        let (order_file, generation_stats) = {
            let _timer = scoped_timer("generate order file");
            OrderFileGenerator::new(map, &filter)
                .with_remaining_order(self.config.remaining_order)
                .generate_with_stats(&trace.symbols)
        };

        PipelineOutput {
            order_file,
            parse_stats,
            resolve_stats: trace.stats,
            generation_stats,
            symbol_count: map.len(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
