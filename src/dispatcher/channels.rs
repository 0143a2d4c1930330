// Communication channel between the dispatcher and the automation loop
use super::types::DispatchCommand;
use tokio::sync::mpsc;

/// Commands that may be pending before the loop drains them
pub const DISPATCH_QUEUE_CAPACITY: usize = 32;

/// Helper function to create the dispatch command channel
pub fn create_dispatch_channels() -> (
    mpsc::Sender<DispatchCommand>,
    mpsc::Receiver<DispatchCommand>,
) {
    mpsc::channel(DISPATCH_QUEUE_CAPACITY)
}
