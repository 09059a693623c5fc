//! Property derivation (§4.B.1): the tree-sitter-cpp analogue of libclang's
//! cursor-spelling and boolean-predicate scan.

use astmatch_core::{PropertyMap, PropertyValue};

/// C/C++ specifier keywords the adapter records as boolean flags, mirroring
/// libclang's `is_const`/`is_static`/... cursor predicates.
const SPECIFIER_KEYWORDS: &[&str] = &[
    "const",
    "static",
    "volatile",
    "inline",
    "virtual",
    "extern",
    "mutable",
    "constexpr",
    "explicit",
];

/// Kinds whose own raw text is recorded as a `LITERAL` property: literal
/// token kinds plus bare identifiers used in reference position.
pub(crate) fn is_literal_kind(kind: &str) -> bool {
    kind.ends_with("_literal") || kind == "identifier"
}

pub(crate) fn is_specifier_keyword(text: &str) -> bool {
    SPECIFIER_KEYWORDS.contains(&text)
}

/// Build the property map for a single tree-sitter node given its already
/// decoded `name`, the source bytes, the node's own raw text, and operator
/// text computed by the caller (who has access to the left/right operand
/// fields tree-sitter's borrow rules make awkward to thread through here).
pub(crate) fn derive_properties(
    name: &str,
    kind: &str,
    raw_text: &str,
    operator: Option<&str>,
    specifiers: impl Iterator<Item = String>,
) -> PropertyMap {
    let mut properties = PropertyMap::new();
    if !name.is_empty() {
        properties.insert("name".to_string(), PropertyValue::Str(name.to_string()));
    }
    if let Some(op) = operator {
        properties.insert("operator".to_string(), PropertyValue::Str(op.to_string()));
    }
    if is_literal_kind(kind) {
        properties.insert("LITERAL".to_string(), PropertyValue::Str(raw_text.to_string()));
    }
    for keyword in specifiers {
        properties.insert(keyword, PropertyValue::Bool(true));
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_kinds_cover_common_suffixes_and_identifier() {
        assert!(is_literal_kind("number_literal"));
        assert!(is_literal_kind("string_literal"));
        assert!(is_literal_kind("identifier"));
        assert!(!is_literal_kind("binary_expression"));
    }

    #[test]
    fn specifier_keyword_membership() {
        assert!(is_specifier_keyword("const"));
        assert!(is_specifier_keyword("constexpr"));
        assert!(!is_specifier_keyword("foo"));
    }
}
