// Dispatch boundary
// Named routines and recurring triggers are registered here and forwarded to
// the automation loop as commands. When triggers fire is decided elsewhere.

pub mod channels;
pub mod registry;
pub mod types;

pub use channels::create_dispatch_channels;
pub use registry::Dispatcher;
pub use types::{DispatchCommand, RealtimeTimer, SoloTask, TriggerConfig};
