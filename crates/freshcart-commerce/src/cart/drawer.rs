//! Cart drawer visibility.
//!
//! Presentation state only; nothing in the cart or pricing reads it.

use serde::{Deserialize, Serialize};

/// Whether the cart drawer is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDrawer {
    open: bool,
}

impl CartDrawer {
    /// Create a closed drawer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
