// Registry of named routines and recurring triggers
use super::types::{DispatchCommand, RealtimeTimer, SoloTask, TriggerConfig};
use crate::error::{VisionError, VisionResult};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::mpsc;

pub struct Dispatcher {
    routines: BTreeSet<String>,
    triggers: HashMap<String, TriggerConfig>,
    command_tx: mpsc::Sender<DispatchCommand>,
}

impl Dispatcher {
    pub fn new(command_tx: mpsc::Sender<DispatchCommand>) -> Self {
        Self {
            routines: BTreeSet::new(),
            triggers: HashMap::new(),
            command_tx,
        }
    }

    /// Make a one-shot routine startable by name
    pub fn register_routine(&mut self, name: impl Into<String>) {
        self.routines.insert(name.into());
    }

    pub fn routine_names(&self) -> impl Iterator<Item = &str> {
        self.routines.iter().map(String::as_str)
    }

    pub fn trigger(&self, name: &str) -> Option<&TriggerConfig> {
        self.triggers.get(name)
    }

    /// Register (or replace) a recurring trigger and notify the loop.
    pub fn add_timer(&mut self, timer: RealtimeTimer) -> VisionResult<()> {
        if timer.name.trim().is_empty() {
            return Err(VisionError::InvalidArgument {
                name: "timer.name",
                reason: "realtime timer name must not be empty".to_string(),
            });
        }

        self.command_tx
            .try_send(DispatchCommand::AddTrigger {
                name: timer.name.clone(),
                config: timer.config.clone(),
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Closed(_) => VisionError::ChannelClosed,
                mpsc::error::TrySendError::Full(_) => VisionError::QueueFull,
            })?;

        log::info!("⏱️ Trigger '{}' registered", timer.name);
        self.triggers.insert(timer.name, timer.config);
        Ok(())
    }

    /// Start a registered routine by name.
    pub async fn run_task(&self, task: &SoloTask) -> VisionResult<()> {
        if task.name.trim().is_empty() {
            return Err(VisionError::InvalidArgument {
                name: "task.name",
                reason: "solo task name must not be empty".to_string(),
            });
        }
        if !self.routines.contains(&task.name) {
            return Err(VisionError::UnknownRoutine {
                name: task.name.clone(),
            });
        }

        self.command_tx
            .send(DispatchCommand::StartRoutine(task.name.clone()))
            .await
            .map_err(|_| VisionError::ChannelClosed)?;
        log::info!("▶️ Routine '{}' started", task.name);
        Ok(())
    }
}
