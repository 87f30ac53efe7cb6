//! Template parser
//!
//! Uses html5ever's built-in RcDom and converts to our fragment format.
//! Template strings are fragments, not documents, so the html/head/body
//! scaffolding the document parser introduces is unwrapped: the children of
//! `head` (where the parser hoists leading `<style>` elements) and `body`
//! become the fragment's content, in that order.
//!
//! Whitespace-only text nodes are dropped during conversion. This is the
//! normalization that makes template composition idempotent modulo
//! whitespace.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use weft_dom::{Fragment, NodeId};

/// Template parse error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read template markup: {0}")]
    Read(String),
}

/// Parse a markup string into a detached fragment
pub fn parse_template(markup: &str) -> Result<Fragment, ParseError> {
    tracing::debug!(target: "weft::html", len = markup.len(), "parsing template");

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| ParseError::Read(e.to_string()))?;

    let mut fragment = Fragment::new();
    let root = fragment.root();
    for section in ["head", "body"] {
        if let Some(handle) = find_element(&dom.document, section) {
            for child in handle.children.borrow().iter() {
                convert_node(child, &mut fragment, root);
            }
        }
    }

    tracing::debug!(target: "weft::html", nodes = fragment.len(), "parsed template");
    Ok(fragment)
}

/// Find the first element with the given local name, depth-first
fn find_element(handle: &Handle, local_name: &str) -> Option<Handle> {
    if let RcNodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == local_name {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_element(child, local_name) {
            return Some(found);
        }
    }
    None
}

/// Convert an RcDom node into our fragment format
fn convert_node(handle: &Handle, fragment: &mut Fragment, parent: NodeId) {
    match &handle.data {
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = fragment.create_text(&text);
                fragment.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = fragment.create_comment(&contents.to_string());
            fragment.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = fragment.create_element(name.local.as_ref());
            if let Some(elem) = fragment.get_mut(id).and_then(|n| n.as_element_mut()) {
                for attr in attrs.borrow().iter() {
                    elem.set_attr(attr.name.local.as_ref(), &attr.value);
                }
            }
            fragment.append_child(parent, id);
            for child in handle.children.borrow().iter() {
                convert_node(child, fragment, id);
            }
        }
        // Doctype, processing instructions, nested documents: not template content
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_template() {
        let fragment = parse_template("<hr />").unwrap();
        assert!(fragment.find_by_tag("hr").is_some());
    }

    #[test]
    fn test_parse_keeps_style_elements() {
        let fragment = parse_template("<style>:host { color: red }</style><hr />").unwrap();
        let style = fragment.find_by_tag("style").expect("style element kept");
        assert_eq!(fragment.text_content(style), ":host { color: red }");
        assert!(fragment.find_by_tag("hr").is_some());
    }

    #[test]
    fn test_parse_attributes() {
        let fragment = parse_template("<div class=\"row\" id=\"main\"><span>x</span></div>").unwrap();
        let div = fragment.find_by_tag("div").unwrap();
        let elem = fragment.get(div).unwrap().as_element().unwrap();
        assert_eq!(elem.get_attr("class"), Some("row"));
        assert_eq!(elem.get_attr("id"), Some("main"));
    }

    #[test]
    fn test_whitespace_only_text_dropped() {
        let fragment = parse_template("  <hr />\n  ").unwrap();
        let children = fragment.children(fragment.root());
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_parse_empty_markup() {
        let fragment = parse_template("").unwrap();
        assert!(fragment.is_empty());
    }
}
