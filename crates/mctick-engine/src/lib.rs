//! The tick scheduler: logical tick counter, scheduled-command table,
//! and the per-tick control flow tying the animation manager to a
//! backend `BlockStore`.
//!
//! Grounded on `tickScheduler`/`World` in
//! `original_source/mcticks/go/world/world.go`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command_queue;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod ticker;

pub use command_queue::CommandQueue;
pub use error::SchedulerError;
pub use scheduler::{CommandHandler, ScheduledCommand, TickScheduler, TpsSummary};
pub use ticker::{spawn_ticker, TickerHandle};

