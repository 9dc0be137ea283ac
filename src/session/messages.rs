//! Message types for a magnifier session
//!
//! This module contains:
//! - PointerEvent carrying raw device coordinates
//! - Msg, everything the shell can ask the magnifier to do
//! - Script, a JSON list of messages replayed by the CLI

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Pointer input in device coordinates relative to the primary surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    /// Raw device coordinates of the event
    pub fn coordinates(&self) -> (f64, f64) {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                (x, y)
            }
        }
    }
}

/// All magnifier messages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    Pointer(PointerEvent),
    /// Redraw the original image contained in the primary surface
    Reset,
    /// Clear the primary surface
    Clear,
}

impl Msg {
    /// Press at one corner, move and release at the other
    pub fn drag(x0: f64, y0: f64, x1: f64, y1: f64) -> [Msg; 3] {
        [
            Msg::Pointer(PointerEvent::Down { x: x0, y: y0 }),
            Msg::Pointer(PointerEvent::Move { x: x1, y: y1 }),
            Msg::Pointer(PointerEvent::Up { x: x1, y: y1 }),
        ]
    }
}

impl From<PointerEvent> for Msg {
    fn from(event: PointerEvent) -> Self {
        Msg::Pointer(event)
    }
}

/// Ordered list of messages to replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Msg>,
}

impl Script {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid interaction script")
    }

    /// Read a script from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json)
    }
}
