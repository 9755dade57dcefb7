//! Progress event infrastructure for prospect processing.
//!
//! This crate provides the server-side building blocks the pipeline
//! and the API share to stream processing progress:
//!
//! - [`ProgressChannels`] — per-prospect broadcast fan-out with a
//!   global firehose for cross-cutting subscribers.
//! - [`EventPersistence`] — background service that durably writes
//!   every event to the `prospect_events` table.
//!
//! The wire envelope itself ([`ProcessingEvent`]) lives in
//! `mirador-core` so pure consumers (the agent) can parse it without
//! this crate's database dependencies; it is re-exported here for
//! convenience.

pub mod channels;
pub mod persistence;

pub use channels::ProgressChannels;
pub use mirador_core::progress::ProcessingEvent;
pub use persistence::EventPersistence;
