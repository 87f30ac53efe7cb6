//! Template Compositor
//!
//! Builds one immutable render artifact per render pass from a class's
//! static markup and style: parse the markup into a detached fragment,
//! collapse every embedded `<style>` element together with the class style
//! (markup styles first, class style last) into a single new style node,
//! and reinsert it as the fragment's first child.
//!
//! Composition is idempotent modulo whitespace and has no visible side
//! effect: the artifact stays fully detached until the scheduler commits it.

use weft_dom::Fragment;
use weft_html::{parse_template, ParseError};

/// Compose a render artifact from static markup and style text
pub fn compose(template: &str, style: &str) -> Result<Fragment, ParseError> {
    let mut fragment = parse_template(template.trim())?;

    let mut styles = fragment.take_elements("style");
    styles.push(style.to_string());
    let text = styles.join("\n").trim().to_string();

    let style_node = fragment.create_element("style");
    if !text.is_empty() {
        let text_node = fragment.create_text(&text);
        fragment.append_child(style_node, text_node);
    }
    fragment.prepend_child(fragment.root(), style_node);

    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_block_is_first_child() {
        let artifact = compose("<hr />", ":host { color: red }").unwrap();
        let first = artifact.first_child(artifact.root()).unwrap();
        let elem = artifact.get(first).unwrap().as_element().unwrap();
        assert_eq!(elem.tag_name, "style");
        assert_eq!(artifact.text_content(first), ":host { color: red }");
    }

    #[test]
    fn test_embedded_styles_collapse_before_class_style() {
        let artifact = compose(
            "<style>a { top: 0 }</style><hr /><style>b { left: 0 }</style>",
            ":host { color: red }",
        )
        .unwrap();

        // One style element total after composition
        assert_eq!(artifact.find_all_by_tag("style").len(), 1);

        let style = artifact.find_by_tag("style").unwrap();
        assert_eq!(
            artifact.text_content(style),
            "a { top: 0 }\nb { left: 0 }\n:host { color: red }"
        );
    }

    #[test]
    fn test_idempotent_composition() {
        let a = compose("<style>a { top: 0 }</style><hr />", ":host {}").unwrap();
        let b = compose("<style>a { top: 0 }</style><hr />", ":host {}").unwrap();
        assert_eq!(a.to_html(), b.to_html());
    }

    #[test]
    fn test_empty_style_still_prepended() {
        let artifact = compose("<hr />", "").unwrap();
        let first = artifact.first_child(artifact.root()).unwrap();
        let elem = artifact.get(first).unwrap().as_element().unwrap();
        assert_eq!(elem.tag_name, "style");
        assert_eq!(artifact.text_content(first), "");
    }

    #[test]
    fn test_markup_content_preserved() {
        let artifact = compose("<div id=\"track\"><hr /></div>", "").unwrap();
        assert!(artifact.find_by_id("track").is_some());
        assert!(artifact.find_by_tag("hr").is_some());
    }
}
