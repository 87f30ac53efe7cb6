//! Weft DOM - Host element and render fragment model
//!
//! The pieces of the platform a component instance governs: the host
//! element with its raw attribute store, the isolated shadow subtree the
//! engine commits into, and the detached fragment tree used as the render
//! artifact.

mod attributes;
mod events;
mod fragment;
mod host;
mod node;
mod shadow;

pub use attributes::{Attr, AttributeMap};
pub use events::ErrorEvent;
pub use fragment::Fragment;
pub use host::HostElement;
pub use node::{ElementData, Node, NodeData, TextData};
pub use shadow::{ShadowRoot, ShadowRootMode};

/// Node identifier (index into a fragment arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node of a fragment
    pub const ROOT: NodeId = NodeId(0);
}
