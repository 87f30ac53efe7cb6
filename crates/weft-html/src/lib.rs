//! Weft HTML - Template parsing
//!
//! Turns a component class's static markup string into a detached
//! `weft_dom::Fragment`, built on html5ever's RcDom.

mod parser;

pub use parser::{parse_template, ParseError};
