//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → logging → metrics → dispatcher → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight requests → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
