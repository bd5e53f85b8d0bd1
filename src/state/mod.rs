//! State management module
//!
//! This module owns the in-memory session state and the shutdown sequence

pub mod session;
pub mod shutdown;

// Re-export commonly used state components
pub use session::{SessionController, SessionState};
pub use shutdown::{termination_signal, ShutdownReason, ShutdownSignal};
