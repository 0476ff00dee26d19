use crate::catalog::ResourceCatalog;
use crate::error::Result;
use crate::scanner::ScanConfig;
use crate::StraightEngine;

pub struct StraightEngineBuilder<'a> {
    catalog: &'a ResourceCatalog,
    config: ScanConfig,
}

impl<'a> StraightEngineBuilder<'a> {
    pub fn new(catalog: &'a ResourceCatalog) -> Self {
        Self {
            catalog,
            config: ScanConfig::default(),
        }
    }
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.config.early_exit = early_exit;
        self
    }
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.config.validate = validate;
        self
    }
    pub fn build(self) -> Result<StraightEngine> {
        StraightEngine::with_config(self.catalog, self.config)
    }
}
