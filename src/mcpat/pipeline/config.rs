//! Processing configuration system for the report pipeline
//!
//! This module defines named configurations that specify where the fixed pipeline
//! stops. Pass order is never configurable; a configuration only picks the stage whose
//! output it wants:
//! 1. Tokens (lexer output)
//! 2. Raw tree (indentation only)
//! 3. Normalized tree
//! 4. Reshaped tree (what alignment consumes)

use std::collections::HashMap;

/// A named configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub name: String,
    pub description: String,
    pub stage: Stage,
}

/// The last pipeline stage to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Stop after lexing
    Tokens,

    /// Stop after indentation tree building
    RawTree,

    /// Stop after the four normalization passes
    Normalized,

    /// Run everything, including schema reshaping
    Reshaped,
}

/// Registry of processing configurations
pub struct ConfigRegistry {
    configs: HashMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConfigRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a configuration
    pub fn register(&mut self, config: ProcessingConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    /// Get a configuration by name
    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    /// Check if a configuration exists
    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// List all configurations (sorted by name)
    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    /// Create registry with standard configurations
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingConfig {
            name: "default".into(),
            description: "Full pipeline: lex, build, normalize, reshape".into(),
            stage: Stage::Reshaped,
        });

        // Intermediate stages (for debugging reports that fail to align)
        registry.register(ProcessingConfig {
            name: "tokens".into(),
            description: "Lexer output only, one token per line".into(),
            stage: Stage::Tokens,
        });

        registry.register(ProcessingConfig {
            name: "raw".into(),
            description: "Indentation tree before any pass".into(),
            stage: Stage::RawTree,
        });

        registry.register(ProcessingConfig {
            name: "normalized".into(),
            description: "Tree after the normalization passes, before reshaping".into(),
            stage: Stage::Normalized,
        });

        registry
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
