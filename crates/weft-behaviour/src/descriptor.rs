//! Attribute Descriptors
//!
//! Static, per-class declaration of observed attributes: default raw value,
//! parse transform (raw -> domain value, may fail) and serialize transform
//! (domain value -> raw). Declarations are compiled once at registration
//! into a shared per-class table; instances never build accessor objects of
//! their own.

use std::fmt;
use std::sync::Arc;

/// Domain value of an attribute after its parse transform
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Attribute absent on the host
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Raw attribute form of this value (the default serialization)
    pub fn to_raw(&self) -> String {
        match self {
            AttrValue::Null => String::new(),
            AttrValue::Bool(v) => v.to_string(),
            AttrValue::Int(v) => v.to_string(),
            AttrValue::Float(v) => v.to_string(),
            AttrValue::Str(v) => v.clone(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// Attribute transform rejected a value, or an undeclared property was used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid attribute value: {0}")]
    Invalid(String),

    #[error("<{0}> is not a declared attribute of this component")]
    Undeclared(String),
}

/// Parse transform: raw attribute text to domain value
pub type ParseFn = Arc<dyn Fn(&str) -> Result<AttrValue, ValidationError> + Send + Sync>;

/// Serialize transform: domain value to raw attribute text
pub type SerializeFn = Arc<dyn Fn(&AttrValue) -> Result<String, ValidationError> + Send + Sync>;

/// Static declaration of one observed attribute
#[derive(Clone)]
pub struct AttributeSpec {
    pub name: String,
    pub default: Option<String>,
    pub parse: Option<ParseFn>,
    pub serialize: Option<SerializeFn>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            parse: None,
            serialize: None,
        }
    }

    /// Default raw value, applied once at attach if the attribute is absent
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_parse(
        mut self,
        parse: impl Fn(&str) -> Result<AttrValue, ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.parse = Some(Arc::new(parse));
        self
    }

    pub fn with_serialize(
        mut self,
        serialize: impl Fn(&AttrValue) -> Result<String, ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.serialize = Some(Arc::new(serialize));
        self
    }

    /// Attach an already-built parse transform
    pub fn with_parse_fn(mut self, parse: ParseFn) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Attach an already-built serialize transform
    pub fn with_serialize_fn(mut self, serialize: SerializeFn) -> Self {
        self.serialize = Some(serialize);
        self
    }
}

impl fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("parse", &self.parse.is_some())
            .field("serialize", &self.serialize.is_some())
            .finish()
    }
}

/// One entry of a class's compiled descriptor table
#[derive(Clone)]
pub struct CompiledAttribute {
    /// Raw attribute name on the host
    pub name: String,
    /// camelCase property name on the dataset proxy
    pub prop: String,
    /// Default raw value applied at attach when absent
    pub default: Option<String>,
    pub parse: Option<ParseFn>,
    pub serialize: Option<SerializeFn>,
    /// Whether host mutations of this attribute drive the render pipeline
    pub observed: bool,
}

impl fmt::Debug for CompiledAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAttribute")
            .field("name", &self.name)
            .field("prop", &self.prop)
            .field("default", &self.default)
            .field("observed", &self.observed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_value_conversions() {
        assert_eq!(AttrValue::from(9i64).as_int(), Some(9));
        assert_eq!(AttrValue::from(2.5).as_f64(), Some(2.5));
        assert_eq!(AttrValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(AttrValue::from("dashed").as_str(), Some("dashed"));
        assert!(AttrValue::Null.is_null());
    }

    #[test]
    fn test_to_raw() {
        assert_eq!(AttrValue::Int(12).to_raw(), "12");
        assert_eq!(AttrValue::Bool(true).to_raw(), "true");
        assert_eq!(AttrValue::Null.to_raw(), "");
    }

    #[test]
    fn test_spec_builder() {
        let spec = AttributeSpec::new("hour")
            .with_default("9")
            .with_parse(|raw| {
                raw.parse::<i64>()
                    .map(AttrValue::Int)
                    .map_err(|e| ValidationError::Invalid(e.to_string()))
            });

        assert_eq!(spec.name, "hour");
        assert_eq!(spec.default.as_deref(), Some("9"));
        let parse = spec.parse.as_ref().unwrap();
        assert_eq!(parse("7").unwrap(), AttrValue::Int(7));
        assert!(parse("x").is_err());
    }
}
