//! Lifecycle management for the long-running `watch` mode.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to request loop and reload loop → exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
