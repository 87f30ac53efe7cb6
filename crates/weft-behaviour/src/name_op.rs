//! Attribute and class name conventions
//!
//! Attribute names are kebab-case on the host (`hour-begin`), camelCase on
//! the dataset proxy (`hourBegin`); class names are CamelCase and map to
//! hyphenated tag names (`WorkdayTimeline` -> `workday-timeline`).

/// Convert a kebab-case attribute name to a camelCase property name.
/// A leading `data-` prefix is stripped, mirroring the host platform's
/// dataset naming.
pub fn kebab_to_camel(name: &str) -> String {
    let name = name.strip_prefix("data-").unwrap_or(name);
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a CamelCase (or camelCase) name to kebab-case
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}
