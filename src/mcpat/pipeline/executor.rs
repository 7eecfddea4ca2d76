//! Pipeline executor that runs processing configurations

use crate::mcpat::lexing::{tokenize, LexedLine, UnknownLineError};
use crate::mcpat::parsing::{build_tree, ParseTree};
use crate::mcpat::pipeline::config::{ConfigRegistry, ProcessingConfig, Stage};
use crate::mcpat::pipeline::normalization::normalization_passes;
use crate::mcpat::pipeline::pass::run_passes;
use crate::mcpat::pipeline::reshaping::reshaping_passes;
use std::fmt;

/// Errors during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionError {
    ConfigNotFound(String),
    Lexing(UnknownLineError),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::ConfigNotFound(name) => write!(f, "Config '{}' not found", name),
            ExecutionError::Lexing(err) => write!(f, "Lexing failed: {}", err),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl From<UnknownLineError> for ExecutionError {
    fn from(err: UnknownLineError) -> Self {
        ExecutionError::Lexing(err)
    }
}

/// Output from pipeline execution
#[derive(Debug)]
pub enum ExecutionOutput {
    Tokens(Vec<LexedLine>),
    Tree(ParseTree),
}

/// Executes processing configurations
pub struct PipelineExecutor {
    registry: ConfigRegistry,
}

impl PipelineExecutor {
    /// Create executor with default configurations
    pub fn new() -> Self {
        Self {
            registry: ConfigRegistry::with_defaults(),
        }
    }

    /// Create executor with custom registry
    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self { registry }
    }

    /// Execute a named configuration
    pub fn execute(
        &self,
        config_name: &str,
        source: &str,
    ) -> Result<ExecutionOutput, ExecutionError> {
        let config = self
            .registry
            .get(config_name)
            .ok_or_else(|| ExecutionError::ConfigNotFound(config_name.to_string()))?;

        // Step 1: Lexing
        let lines = tokenize(source)?;
        if config.stage == Stage::Tokens {
            return Ok(ExecutionOutput::Tokens(lines));
        }

        // Step 2: Indentation tree
        let mut tree = build_tree(&lines);

        // Step 3: Normalization, then reshaping
        if config.stage >= Stage::Normalized {
            tree = run_passes(tree, &normalization_passes());
        }
        if config.stage >= Stage::Reshaped {
            tree = run_passes(tree, &reshaping_passes());
        }

        Ok(ExecutionOutput::Tree(tree))
    }

    /// List all available configurations
    pub fn list_configs(&self) -> Vec<&ProcessingConfig> {
        self.registry.list_all()
    }

    /// Get the registry
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}
