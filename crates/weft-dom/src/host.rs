//! Host Element
//!
//! The platform-provided object representing one component instance in the
//! document: a tag name, the raw attribute store, an optional shadow
//! subtree, and a queue of dispatched events. The behaviour engine governs
//! exactly one of these per instance and reaches its state only through the
//! narrow accessors here.

use crate::{AttributeMap, ErrorEvent, ShadowRoot, ShadowRootMode};

/// One live element in the host document
#[derive(Debug, Clone)]
pub struct HostElement {
    tag_name: String,
    attributes: AttributeMap,
    shadow: Option<ShadowRoot>,
    events: Vec<ErrorEvent>,
}

impl HostElement {
    /// Create a host element with the given tag name
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: AttributeMap::new(),
            shadow: None,
            events: Vec::new(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Get a raw attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    /// Write a raw attribute value, returning the previous one.
    ///
    /// This is the storage-level write; change notification is the
    /// responsibility of whoever drives the element (the behaviour engine
    /// routes observed writes through its lifecycle pipeline).
    pub fn set_attribute_raw(&mut self, name: &str, value: &str) -> Option<String> {
        self.attributes.set(name, value)
    }

    /// Remove a raw attribute, returning the previous value
    pub fn remove_attribute_raw(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// The raw attribute store
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Attach a shadow subtree. Repeated attaches keep the existing one.
    pub fn attach_shadow(&mut self, mode: ShadowRootMode) -> &mut ShadowRoot {
        self.shadow.get_or_insert_with(|| ShadowRoot::new(mode))
    }

    pub fn shadow_root(&self) -> Option<&ShadowRoot> {
        self.shadow.as_ref()
    }

    pub fn shadow_root_mut(&mut self) -> Option<&mut ShadowRoot> {
        self.shadow.as_mut()
    }

    /// Dispatch a diagnostic event onto this element
    pub fn dispatch_error(&mut self, event: ErrorEvent) {
        tracing::warn!(target: "weft::host", tag = %self.tag_name, message = %event.message, "error event");
        self.events.push(event);
    }

    /// Events dispatched so far
    pub fn events(&self) -> &[ErrorEvent] {
        &self.events
    }

    /// Drain dispatched events
    pub fn take_events(&mut self) -> Vec<ErrorEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_roundtrip() {
        let mut host = HostElement::new("hour-marker");
        assert_eq!(host.set_attribute_raw("hour", "9"), None);
        assert_eq!(host.set_attribute_raw("hour", "12"), Some("9".to_string()));
        assert_eq!(host.get_attribute("hour"), Some("12"));
        assert_eq!(host.remove_attribute_raw("hour"), Some("12".to_string()));
        assert!(!host.has_attribute("hour"));
    }

    #[test]
    fn test_attach_shadow_idempotent() {
        let mut host = HostElement::new("hour-marker");
        host.attach_shadow(ShadowRootMode::Open);
        {
            let shadow = host.shadow_root_mut().unwrap();
            let mut frag = crate::Fragment::new();
            let hr = frag.create_element("hr");
            frag.append_child(frag.root(), hr);
            shadow.replace_content(frag);
        }
        // Second attach must not wipe committed content
        host.attach_shadow(ShadowRootMode::Open);
        assert!(host.shadow_root().unwrap().has_content());
    }

    #[test]
    fn test_events_queue() {
        let mut host = HostElement::new("hour-marker");
        host.dispatch_error(ErrorEvent::new("failed", "boom"));
        assert_eq!(host.events().len(), 1);
        assert_eq!(host.take_events().len(), 1);
        assert!(host.events().is_empty());
    }
}
