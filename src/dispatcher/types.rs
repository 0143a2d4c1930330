// Descriptors exchanged between the dispatcher and the automation loop
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a recurring trigger should run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    /// Free-form options handed through to the trigger
    pub params: BTreeMap<String, String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 50,
            params: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeTimer {
    pub name: String,
    pub config: TriggerConfig,
}

impl RealtimeTimer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: TriggerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TriggerConfig) -> Self {
        self.config = config;
        self
    }
}

/// A one-shot routine run by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloTask {
    pub name: String,
}

impl SoloTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchCommand {
    AddTrigger { name: String, config: TriggerConfig },
    StartRoutine(String),
}
