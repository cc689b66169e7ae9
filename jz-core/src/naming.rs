//! Identifier safety for generated JavaScript.

use crate::utils::is_identifier;

/// Words that cannot be used as binding names in generated modules.
pub const JS_RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    // Bound by the host import in every generated module
    "z",
];

/// Check if a name is reserved.
pub fn is_reserved(name: &str) -> bool {
    JS_RESERVED_WORDS.contains(&name)
}

/// Turn an arbitrary export or document name into a usable binding name.
///
/// Valid, unreserved identifiers pass through untouched. Anything else has
/// invalid characters replaced by `_` and gets a `_` prefix when it would
/// start with a digit or collide with a reserved word.
pub fn safe_identifier(name: &str) -> String {
    if is_identifier(name) && !is_reserved(name) {
        return name.to_string();
    }

    let mut ident: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if ident.is_empty()
        || ident.starts_with(|c: char| c.is_ascii_digit())
        || is_reserved(&ident)
    {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("class"));
        assert!(is_reserved("z"));
        assert!(!is_reserved("user"));
    }

    #[test]
    fn test_safe_identifier_passthrough() {
        assert_eq!(safe_identifier("Address"), "Address");
        assert_eq!(safe_identifier("userSchema"), "userSchema");
    }

    #[test]
    fn test_safe_identifier_escapes() {
        assert_eq!(safe_identifier("default"), "_default");
        assert_eq!(safe_identifier("order-line"), "order_line");
        assert_eq!(safe_identifier("2fa"), "_2fa");
        assert_eq!(safe_identifier(""), "_");
    }
}
