//! Errors raised by [`crate::TickScheduler`] and [`crate::command_queue::CommandQueue`].

use std::fmt;

/// State and argument errors surfaced by the tick scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// `schedule()` named a command that was never registered.
    UnknownCommand {
        /// The offending command name.
        name: String,
    },
    /// The bounded command queue was full.
    QueueFull,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { name } => write!(f, "no command registered as {name:?}"),
            Self::QueueFull => write!(f, "command queue is full"),
        }
    }
}

impl std::error::Error for SchedulerError {}
