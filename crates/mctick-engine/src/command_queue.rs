//! Bounded single-consumer queue for commands that enqueue further work
//! from inside a running tick (capacity 128, FIFO, no TTL/priority).
//!
//! Grounded on the bounded-capacity-with-rejection pattern in
//! `murk-engine::ingress::IngressQueue`, simplified: rejection here is a
//! plain [`SchedulerError::QueueFull`], since nothing in this system
//! assigns a deadline or priority class to a queued command.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::error::SchedulerError;

/// Default capacity of a [`CommandQueue`], matching the Go source's
/// `commandQueue chan commandTask` buffer size.
pub const DEFAULT_CAPACITY: usize = 128;

/// A command posted to the queue: a registered command name plus its
/// defensively-copied argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedCommand {
    /// The registered command name to invoke.
    pub name: String,
    /// Arguments passed to the command handler.
    pub args: Vec<String>,
}

/// A bounded, single-consumer FIFO of [`QueuedCommand`]s.
pub struct CommandQueue {
    tx: Sender<QueuedCommand>,
    rx: Receiver<QueuedCommand>,
}

impl CommandQueue {
    /// A queue with the default capacity (128).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A queue with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self { tx, rx }
    }

    /// Post a command. Fails with `QueueFull` if the queue has no free slot.
    pub fn push(&self, name: impl Into<String>, args: Vec<String>) -> Result<(), SchedulerError> {
        let command = QueuedCommand {
            name: name.into(),
            args,
        };
        self.tx
            .try_send(command)
            .map_err(|e| match e {
                TrySendError::Full(_) => SchedulerError::QueueFull,
                TrySendError::Disconnected(_) => SchedulerError::QueueFull,
            })
    }

    /// Drain every command currently queued, in FIFO order, without blocking.
    pub fn drain(&self) -> Vec<QueuedCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = self.rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    /// Number of commands currently queued.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether the queue currently holds no commands.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_fifo_order() {
        let q = CommandQueue::with_capacity(4);
        q.push("a", vec![]).unwrap();
        q.push("b", vec!["x".into()]).unwrap();
        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].name, "a");
        assert_eq!(drained[1].name, "b");
        assert_eq!(drained[1].args, vec!["x".to_string()]);
    }

    #[test]
    fn full_queue_rejects() {
        let q = CommandQueue::with_capacity(1);
        q.push("a", vec![]).unwrap();
        assert_eq!(q.push("b", vec![]).unwrap_err(), SchedulerError::QueueFull);
    }

    #[test]
    fn drain_empties_the_queue() {
        let q = CommandQueue::with_capacity(4);
        q.push("a", vec![]).unwrap();
        assert_eq!(q.drain().len(), 1);
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }
}
