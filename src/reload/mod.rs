// src/reload/mod.rs

//! The reload notification stream.
//!
//! A push-style channel: connected development clients receive one JSON line
//! per emitted file and refresh themselves. Fire-and-forget by design; there
//! is no acknowledgment and no backpressure, a slow or dead client is simply
//! dropped.

pub mod message;
pub mod server;
pub mod trigger;

pub use message::ReloadMessage;
pub use server::ReloadServer;
pub use trigger::trigger;
