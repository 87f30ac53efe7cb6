//! Attribute Proxy ("dataset")
//!
//! Typed read view over the host's raw attributes, driven by the class's
//! compiled descriptor table: one camelCase property per declared
//! attribute, parse transform applied on read. Writes do not live here —
//! they go through `ComponentInstance::set_data` so every write re-enters
//! the lifecycle pipeline.

use weft_dom::HostElement;

use crate::descriptor::{AttrValue, ValidationError};
use crate::registry::ComponentClass;

/// Read view over a host element's declared attributes
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    host: &'a HostElement,
    class: &'a ComponentClass,
}

impl<'a> Dataset<'a> {
    pub fn new(host: &'a HostElement, class: &'a ComponentClass) -> Self {
        Self { host, class }
    }

    /// Read a declared property by its camelCase name.
    ///
    /// Applies the attribute's parse transform when one is declared; the
    /// transform's rejection propagates to the caller (inside a render hook
    /// it becomes a render failure). An absent attribute reads as
    /// `AttrValue::Null` without invoking the transform; a present
    /// attribute without a transform reads as its raw string.
    pub fn get(&self, prop: &str) -> Result<AttrValue, ValidationError> {
        let attr = self
            .class
            .attribute_by_prop(prop)
            .ok_or_else(|| ValidationError::Undeclared(prop.to_string()))?;
        match self.host.get_attribute(&attr.name) {
            None => Ok(AttrValue::Null),
            Some(raw) => match &attr.parse {
                Some(parse) => parse(raw),
                None => Ok(AttrValue::Str(raw.to_string())),
            },
        }
    }

    /// Raw attribute value, bypassing transforms (read-only)
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.host.get_attribute(name)
    }

    /// Declared camelCase property names, in declaration order
    pub fn props(&self) -> impl Iterator<Item = &str> {
        self.class.attributes().iter().map(|a| a.prop.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentBehaviour;
    use crate::descriptor::AttributeSpec;
    use crate::validators;

    struct HourMarker;

    impl ComponentBehaviour for HourMarker {
        fn template() -> &'static str {
            "<hr />"
        }
        fn observed_attributes() -> &'static [&'static str] {
            &["hour", "line-style"]
        }
        fn attributes_properties() -> Vec<AttributeSpec> {
            vec![AttributeSpec::new("hour")
                .with_default("9")
                .with_parse_fn(validators::hour())]
        }
    }

    fn class() -> ComponentClass {
        ComponentClass::compile::<HourMarker>("HourMarker").unwrap()
    }

    #[test]
    fn test_get_parses_value() {
        let class = class();
        let mut host = HostElement::new(class.tag_name());
        host.set_attribute_raw("hour", "14");

        let dataset = Dataset::new(&host, &class);
        assert_eq!(dataset.get("hour").unwrap(), AttrValue::Int(14));
    }

    #[test]
    fn test_get_rejects_invalid_value() {
        let class = class();
        let mut host = HostElement::new(class.tag_name());
        host.set_attribute_raw("hour", "30");

        let dataset = Dataset::new(&host, &class);
        assert!(dataset.get("hour").is_err());
    }

    #[test]
    fn test_absent_reads_null_without_transform_call() {
        let class = class();
        let host = HostElement::new(class.tag_name());

        let dataset = Dataset::new(&host, &class);
        assert_eq!(dataset.get("hour").unwrap(), AttrValue::Null);
    }

    #[test]
    fn test_untransformed_attribute_reads_raw() {
        let class = class();
        let mut host = HostElement::new(class.tag_name());
        host.set_attribute_raw("line-style", "dashed");

        let dataset = Dataset::new(&host, &class);
        assert_eq!(
            dataset.get("lineStyle").unwrap(),
            AttrValue::Str("dashed".to_string())
        );
    }

    #[test]
    fn test_undeclared_property_rejected() {
        let class = class();
        let host = HostElement::new(class.tag_name());

        let dataset = Dataset::new(&host, &class);
        assert!(matches!(
            dataset.get("width"),
            Err(ValidationError::Undeclared(_))
        ));
    }
}
