//! Render Fragment
//!
//! Detached arena tree used as the render artifact. A fragment is created
//! fresh for every render attempt, populated by the component's render hook,
//! and only becomes visible when the scheduler commits it into the shadow
//! subtree. Building one has no visible side effect.

use crate::node::{ElementData, Node, NodeData, TextData};
use crate::NodeId;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Detached content fragment
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    /// Create an empty fragment (root node only)
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Root)],
        }
    }

    /// Root node id
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Total node count, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // Root alone counts as empty content
        self.nodes.len() <= 1 || self.first_child(NodeId::ROOT).is_none()
    }

    /// Get a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(
            tag_name.to_ascii_lowercase(),
        ))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(TextData {
            content: content.to_string(),
        })))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0 as usize].parent.is_none());
        let prev = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = None;
        }
        match prev {
            Some(prev) => self.nodes[prev.0 as usize].next_sibling = Some(child),
            None => self.nodes[parent.0 as usize].first_child = Some(child),
        }
        self.nodes[parent.0 as usize].last_child = Some(child);
    }

    /// Insert a detached node as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0 as usize].parent.is_none());
        let next = self.nodes[parent.0 as usize].first_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = Some(parent);
            node.prev_sibling = None;
            node.next_sibling = next;
        }
        match next {
            Some(next) => self.nodes[next.0 as usize].prev_sibling = Some(child),
            None => self.nodes[parent.0 as usize].last_child = Some(child),
        }
        self.nodes[parent.0 as usize].first_child = Some(child);
    }

    /// Unlink a node (and its subtree) from its parent. The subtree stays in
    /// the arena but is no longer reachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0 as usize];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if let Some(prev) = prev {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else if let Some(parent) = parent {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if let Some(next) = next {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else if let Some(parent) = parent {
            self.nodes[parent.0 as usize].last_child = prev;
        }
        let node = &mut self.nodes[id.0 as usize];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// First child of a node
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.first_child(id);
        while let Some(child) = cursor {
            out.push(child);
            cursor = self.nodes[child.0 as usize].next_sibling;
        }
        out
    }

    /// Depth-first walk of the subtree rooted at `id`, excluding `id` itself
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id);
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids = self.children(node);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// First element with the given tag name, depth-first
    pub fn find_by_tag(&self, tag_name: &str) -> Option<NodeId> {
        let tag = tag_name.to_ascii_lowercase();
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&id| self.nodes[id.0 as usize].as_element().is_some_and(|e| e.tag_name == tag))
    }

    /// All elements with the given tag name, depth-first
    pub fn find_all_by_tag(&self, tag_name: &str) -> Vec<NodeId> {
        let tag = tag_name.to_ascii_lowercase();
        self.descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&id| self.nodes[id.0 as usize].as_element().is_some_and(|e| e.tag_name == tag))
            .collect()
    }

    /// First element whose `id` attribute matches
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT).into_iter().find(|&id| {
            self.nodes[id.0 as usize]
                .as_element()
                .and_then(|e| e.get_attr("id"))
                == Some(element_id)
        })
    }

    /// Concatenated descendant text of a node
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for child in self.descendants(id) {
            if let Some(text) = self.nodes[child.0 as usize].as_text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the children of a node with a single text node
    pub fn set_text(&mut self, id: NodeId, content: &str) {
        for child in self.children(id) {
            self.detach(child);
        }
        let text = self.create_text(content);
        self.append_child(id, text);
    }

    /// Detach every element with the given tag name and return the text each
    /// one contained, in document order.
    pub fn take_elements(&mut self, tag_name: &str) -> Vec<String> {
        let found = self.find_all_by_tag(tag_name);
        let mut texts = Vec::with_capacity(found.len());
        for id in found {
            texts.push(self.text_content(id));
            self.detach(id);
        }
        texts
    }

    /// Serialize the fragment content to markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(NodeId::ROOT) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0 as usize].data {
            NodeData::Root => {}
            NodeData::Text(t) => out.push_str(&t.content),
            NodeData::Comment(c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
            NodeData::Element(e) => {
                out.push('<');
                out.push_str(&e.tag_name);
                for attr in &e.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&attr.value);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&e.tag_name.as_str()) {
                    return;
                }
                for child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&e.tag_name);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut frag = Fragment::new();
        let div = frag.create_element("div");
        let span = frag.create_element("span");
        let text = frag.create_text("Hello");

        frag.append_child(frag.root(), div);
        frag.append_child(div, span);
        frag.append_child(span, text);

        assert_eq!(frag.len(), 4);
        assert_eq!(frag.children(div), vec![span]);
        assert_eq!(frag.text_content(div), "Hello");
    }

    #[test]
    fn test_prepend() {
        let mut frag = Fragment::new();
        let a = frag.create_element("a");
        let b = frag.create_element("b");
        frag.append_child(frag.root(), a);
        frag.prepend_child(frag.root(), b);

        assert_eq!(frag.children(frag.root()), vec![b, a]);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut frag = Fragment::new();
        let a = frag.create_element("a");
        let b = frag.create_element("b");
        let c = frag.create_element("c");
        for id in [a, b, c] {
            frag.append_child(frag.root(), id);
        }

        frag.detach(b);
        assert_eq!(frag.children(frag.root()), vec![a, c]);
    }

    #[test]
    fn test_take_elements() {
        let mut frag = Fragment::new();
        let style1 = frag.create_element("style");
        frag.append_child(frag.root(), style1);
        let t1 = frag.create_text(":host { color: red }");
        frag.append_child(style1, t1);

        let hr = frag.create_element("hr");
        frag.append_child(frag.root(), hr);

        let texts = frag.take_elements("style");
        assert_eq!(texts, vec![":host { color: red }".to_string()]);
        assert!(frag.find_by_tag("style").is_none());
        assert!(frag.find_by_tag("hr").is_some());
    }

    #[test]
    fn test_to_html() {
        let mut frag = Fragment::new();
        let div = frag.create_element("div");
        frag.append_child(frag.root(), div);
        frag.get_mut(div)
            .unwrap()
            .as_element_mut()
            .unwrap()
            .set_attr("class", "row");
        let hr = frag.create_element("hr");
        frag.append_child(div, hr);

        assert_eq!(frag.to_html(), "<div class=\"row\"><hr></div>");
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut frag = Fragment::new();
        let div = frag.create_element("div");
        frag.append_child(frag.root(), div);
        frag.set_text(div, "one");
        frag.set_text(div, "two");

        assert_eq!(frag.text_content(div), "two");
        assert_eq!(frag.children(div).len(), 1);
    }
}
