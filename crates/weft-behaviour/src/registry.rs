//! Component Registry
//!
//! Once-per-class registration: derives the element tag name from the class
//! name, validates the static contract, and compiles the attribute
//! declarations into the shared descriptor table every instance of the
//! class reads through. A malformed contract is a definition-time error;
//! nothing here ever fails at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::ComponentBehaviour;
use crate::compose;
use crate::descriptor::CompiledAttribute;
use crate::name_op::{camel_to_kebab, kebab_to_camel};

/// Names reserved by the host platform
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Malformed component class contract
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrationError {
    #[error("class <{class}> does not follow component naming rules: tag <{tag}> must contain at least two word segments")]
    InvalidName { class: String, tag: String },

    #[error("tag name <{0}> is reserved")]
    ReservedName(String),

    #[error("component <{0}> is already defined")]
    AlreadyDefined(String),

    #[error("no template available for component <{0}>")]
    MissingTemplate(String),

    #[error("template for component <{class}> is not valid markup: {source}")]
    InvalidTemplate {
        class: String,
        #[source]
        source: weft_html::ParseError,
    },
}

/// Compiled, immutable per-class data shared by every instance
#[derive(Debug, Clone)]
pub struct ComponentClass {
    class_name: String,
    tag_name: String,
    template: &'static str,
    style: &'static str,
    attributes: Vec<CompiledAttribute>,
    by_name: HashMap<String, usize>,
    by_prop: HashMap<String, usize>,
}

impl ComponentClass {
    /// Compile and validate a component class's static contract
    pub fn compile<C: ComponentBehaviour>(class_name: &str) -> Result<Self, RegistrationError> {
        let tag_name = camel_to_kebab(class_name);
        if !Self::is_valid_tag(&tag_name) {
            return Err(RegistrationError::InvalidName {
                class: class_name.to_string(),
                tag: tag_name,
            });
        }
        if RESERVED_NAMES.contains(&tag_name.as_str()) {
            return Err(RegistrationError::ReservedName(tag_name));
        }

        let template = C::template();
        if template.trim().is_empty() {
            return Err(RegistrationError::MissingTemplate(class_name.to_string()));
        }
        // Compose once so malformed or content-free markup fails here, not
        // inside the render pipeline
        let fragment = compose::compose(template, C::style()).map_err(|source| {
            RegistrationError::InvalidTemplate {
                class: class_name.to_string(),
                source,
            }
        })?;
        if fragment.children(fragment.root()).len() <= 1 {
            // Only the synthesized style block: the markup had no content
            return Err(RegistrationError::MissingTemplate(class_name.to_string()));
        }

        let mut class = Self {
            class_name: class_name.to_string(),
            tag_name,
            template,
            style: C::style(),
            attributes: Vec::new(),
            by_name: HashMap::new(),
            by_prop: HashMap::new(),
        };

        let observed = C::observed_attributes();
        for spec in C::attributes_properties() {
            let observed = observed.contains(&spec.name.as_str());
            class.add_attribute(CompiledAttribute {
                prop: kebab_to_camel(&spec.name),
                name: spec.name,
                default: spec.default,
                parse: spec.parse,
                serialize: spec.serialize,
                observed,
            });
        }
        for &name in observed {
            if class.by_name.contains_key(name) {
                continue;
            }
            class.add_attribute(CompiledAttribute {
                prop: kebab_to_camel(name),
                name: name.to_string(),
                default: None,
                parse: None,
                serialize: None,
                observed: true,
            });
        }

        Ok(class)
    }

    fn add_attribute(&mut self, attr: CompiledAttribute) {
        let index = self.attributes.len();
        self.by_name.insert(attr.name.clone(), index);
        // First declaration wins when two names collapse to one property
        self.by_prop.entry(attr.prop.clone()).or_insert(index);
        self.attributes.push(attr);
    }

    fn is_valid_tag(tag: &str) -> bool {
        tag.contains('-')
            && tag
                .chars()
                .next()
                .map(|c| c.is_ascii_lowercase())
                .unwrap_or(false)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Derived element tag name
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn style(&self) -> &'static str {
        self.style
    }

    /// Compiled descriptor table, in declaration order
    pub fn attributes(&self) -> &[CompiledAttribute] {
        &self.attributes
    }

    /// Look up a descriptor by raw attribute name
    pub fn attribute_by_name(&self, name: &str) -> Option<&CompiledAttribute> {
        self.by_name.get(name).map(|&i| &self.attributes[i])
    }

    /// Look up a descriptor by camelCase property name
    pub fn attribute_by_prop(&self, prop: &str) -> Option<&CompiledAttribute> {
        self.by_prop.get(prop).map(|&i| &self.attributes[i])
    }

    /// Whether host mutations of this attribute drive the render pipeline
    pub fn is_observed(&self, name: &str) -> bool {
        self.attribute_by_name(name).is_some_and(|a| a.observed)
    }
}

/// Registry of defined component classes, keyed by tag name
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    definitions: HashMap<String, Arc<ComponentClass>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a component class, deriving its tag name from `class_name`
    pub fn define<C: ComponentBehaviour>(
        &mut self,
        class_name: &str,
    ) -> Result<Arc<ComponentClass>, RegistrationError> {
        let class = ComponentClass::compile::<C>(class_name)?;
        if self.definitions.contains_key(class.tag_name()) {
            return Err(RegistrationError::AlreadyDefined(
                class.tag_name().to_string(),
            ));
        }
        tracing::debug!(target: "weft::registry", class = class_name, tag = class.tag_name(), "defined component");
        let class = Arc::new(class);
        self.definitions
            .insert(class.tag_name().to_string(), class.clone());
        Ok(class)
    }

    /// Get a defined class by tag name
    pub fn get(&self, tag_name: &str) -> Option<&Arc<ComponentClass>> {
        self.definitions.get(tag_name)
    }

    /// Check if a tag name is defined
    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.definitions.contains_key(tag_name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
