//! Command-line driver for the animation manager, tick scheduler, and
//! judge record/compare pair.
//!
//! Grounded on `cmd/mcticks/main.go`'s script-driven command loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod commands;
