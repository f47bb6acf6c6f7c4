//! Window management module for haighframe
//!
//! This module contains the window core, split into logical submodules:
//! the frame state machine, the public property surface, the OS event
//! handlers and the state/border transitions.

pub mod state;
pub mod manager;
mod proc;
mod transitions;

// Re-export main types for convenience
pub use manager::Window;
pub use state::{BorderStyle, FrameState, SavedFrame, WindowState};
