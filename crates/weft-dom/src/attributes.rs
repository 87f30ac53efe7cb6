//! Host Attribute Storage
//!
//! The host element's raw attribute map. The behaviour engine treats this
//! as an external string-keyed store reached through a narrow accessor; it
//! never owns or caches the values itself.

use std::collections::HashMap;

/// Ordered attribute collection with name lookup
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes present
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, returning the previous value if any
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        if let Some(&index) = self.by_name.get(name) {
            let old = std::mem::replace(&mut self.attributes[index].value, value.to_string());
            Some(old)
        } else {
            let index = self.attributes.len();
            self.by_name.insert(name.to_string(), index);
            self.attributes.push(Attr::new(name, value));
            None
        }
    }

    /// Remove an attribute by name, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.by_name.remove(name)?;
        // Reindex entries after the removed one
        for (_, idx) in self.by_name.iter_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index).value)
    }

    /// Check if an attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut attrs = AttributeMap::new();
        attrs.set("hour", "9");
        attrs.set("line-style", "dashed");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("hour"), Some("9"));
        assert_eq!(attrs.get("line-style"), Some("dashed"));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn test_set_returns_old_value() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.set("hour", "9"), None);
        assert_eq!(attrs.set("hour", "12"), Some("9".to_string()));
        assert_eq!(attrs.get("hour"), Some("12"));
    }

    #[test]
    fn test_remove_reindexes() {
        let mut attrs = AttributeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("c", "3");

        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert!(!attrs.has("a"));
        assert_eq!(attrs.get("b"), Some("2"));
        assert_eq!(attrs.get("c"), Some("3"));
    }

    #[test]
    fn test_order_preserved() {
        let mut attrs = AttributeMap::new();
        attrs.set("b", "2");
        attrs.set("a", "1");

        let names: Vec<_> = attrs.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
