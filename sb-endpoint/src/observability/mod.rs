//! Observability helpers shared across the crate.
//!
//! Library code emits `tracing` events and never installs a global
//! subscriber; binaries and tests own one-time subscriber initialization.

pub mod events;
