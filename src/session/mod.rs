//! Magnifier session module
//!
//! This module contains:
//! - Message types for pointer input and controls
//! - Interaction scripts replayed by the command line

pub mod messages;
