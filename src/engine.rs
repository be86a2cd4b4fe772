use crate::config::AppConfig;
use crate::error::Error;
use crate::scanner;
use crate::tree::{TemplateTree, TreeBuilder};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Ties the directory walk and the tree conversion together. Each scan
/// request starts from scratch; the templating-engine loader that consumes
/// the result owns any caching.
pub struct ScanEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct ScanResult {
    pub trees: BTreeMap<String, TemplateTree>,
    pub walk_duration: Duration,
    pub build_duration: Duration,
    pub unit_count: usize,
    pub total_templates: usize,
}

impl ScanEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scan every configured unit:
    /// 1. Walk each unit's template root (parallel, one path list per unit)
    /// 2. Convert each path list into a nested template tree
    pub fn scan(&self) -> Result<ScanResult, Error> {
        info!("Scanning template roots...");
        let walk_start = Instant::now();
        let sections = scanner::collect_unit_paths(&self.config)?;
        let walk_duration = walk_start.elapsed();

        let total_templates: usize = sections.values().map(Vec::len).sum();
        debug!(
            "Walk completed in {:.2}ms — {} units, {} templates",
            walk_duration.as_secs_f64() * 1000.0,
            sections.len(),
            total_templates,
        );

        let build_start = Instant::now();
        let builder = TreeBuilder::new(self.config.delimiter);
        let trees = builder.build_all(&sections);
        let build_duration = build_start.elapsed();
        debug!(
            "Tree build completed in {:.2}ms",
            build_duration.as_secs_f64() * 1000.0,
        );

        Ok(ScanResult {
            unit_count: trees.len(),
            total_templates,
            trees,
            walk_duration,
            build_duration,
        })
    }

    /// Scan a single unit and return just its tree. Avoids walking the
    /// roots of units the caller does not need.
    pub fn scan_unit(&self, unit: &str) -> Result<TemplateTree, Error> {
        let paths = scanner::collect_unit_paths_for(&self.config, unit)?;
        debug!("Unit '{}': {} templates", unit, paths.len());
        Ok(TreeBuilder::new(self.config.delimiter).build_one(&paths))
    }
}
