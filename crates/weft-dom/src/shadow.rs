//! Shadow Subtree
//!
//! The isolated rendering subtree attached to a host element. Content is
//! replaced wholesale at commit time (clear-then-insert, never a diff), so
//! the subtree always shows exactly one committed fragment.

use crate::Fragment;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Isolated rendering subtree
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    pub mode: ShadowRootMode,
    content: Fragment,
}

impl ShadowRoot {
    /// Create an empty shadow root
    pub fn new(mode: ShadowRootMode) -> Self {
        Self {
            mode,
            content: Fragment::new(),
        }
    }

    /// Currently visible content
    pub fn content(&self) -> &Fragment {
        &self.content
    }

    /// Replace the entire visible content with a committed fragment
    pub fn replace_content(&mut self, fragment: Fragment) {
        self.content = fragment;
    }

    /// Clear the visible content
    pub fn clear(&mut self) {
        self.content = Fragment::new();
    }

    /// Whether any content is committed
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}
