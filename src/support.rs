//! Case-transform helpers used by the parameter-binding invoker.
//!
//! All four transforms share one boundary rule: a word boundary opens
//! before any ASCII uppercase letter whose preceding character is a word
//! character (letter, digit, or underscore). Digits never open a boundary,
//! so `camel2Case` splits before `C` but not before `2`. Existing `-`, `_`,
//! and whitespace separators are boundaries as well.
//!
//! These functions decide parameter binding, so their output is stable and
//! covered by exact-vector tests below plus property tests in `tests/`.

/// Identity transform. First entry of the default transform chain.
pub fn identity(input: &str) -> String {
    input.to_string()
}

/// `kebab-case`: lowercased, boundaries and separator runs become `-`.
pub fn kebab_case(input: &str) -> String {
    collapse(&mark_boundaries(input).to_ascii_lowercase(), '-')
}

/// `snake_case`: lowercased, boundaries and separator runs become `_`.
pub fn snake_case(input: &str) -> String {
    collapse(&mark_boundaries(input).to_ascii_lowercase(), '_')
}

/// `camelCase`: word heads capitalized, separators stripped, first
/// character lowercased.
pub fn camel_case(input: &str) -> String {
    let mut out = pascal_case(input);
    if let Some(first) = out.get(..1) {
        let lowered = first.to_ascii_lowercase();
        out.replace_range(..1, &lowered);
    }
    out
}

/// `PascalCase`: word heads capitalized, separators stripped.
///
/// Only word heads are touched; the remainder of each word keeps its
/// original casing (`FOO-bar` becomes `FOOBar`, not `FooBar`).
pub fn pascal_case(input: &str) -> String {
    let spaced = mark_boundaries(input).replace(['-', '_'], " ");

    let mut out = String::with_capacity(spaced.len());
    let mut at_word_head = true;
    for c in spaced.chars() {
        if c.is_whitespace() {
            at_word_head = true;
        } else if at_word_head {
            out.push(c.to_ascii_uppercase());
            at_word_head = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Insert a `-` before every uppercase letter that follows a word character.
fn mark_boundaries(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for c in input.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_alphanumeric() || p == '_')
        {
            out.push('-');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Replace every run of `-`, `_`, or whitespace with a single separator.
/// Leading and trailing runs are replaced too, not trimmed.
fn collapse(input: &str, sep: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !in_run {
                out.push(sep);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case(""), "");
        assert_eq!(kebab_case("kebabCase"), "kebab-case");
        assert_eq!(kebab_case("kebab-case"), "kebab-case");
        assert_eq!(kebab_case("Kebab-Case"), "kebab-case");
        assert_eq!(kebab_case("KebabCase"), "kebab-case");
        assert_eq!(kebab_case("Kebab_Case"), "kebab-case");
        assert_eq!(kebab_case("kebab_case"), "kebab-case");
        assert_eq!(kebab_case("kebab case"), "kebab-case");
        assert_eq!(kebab_case("-kebab-case-"), "-kebab-case-");
        assert_eq!(kebab_case("_kebab_case_"), "-kebab-case-");
        assert_eq!(kebab_case(" kebab case "), "-kebab-case-");
        assert_eq!(kebab_case("keBab_case"), "ke-bab-case");
        assert_eq!(kebab_case("keBAB_case"), "ke-b-a-b-case");
        assert_eq!(kebab_case("kebab_2_case"), "kebab-2-case");
        assert_eq!(kebab_case("2kebab_case"), "2kebab-case");
        assert_eq!(kebab_case("kebab2Case"), "kebab2-case");
        assert_eq!(kebab_case("kebab2case"), "kebab2case");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case(""), "");
        assert_eq!(snake_case("snakeCase"), "snake_case");
        assert_eq!(snake_case("snake-case"), "snake_case");
        assert_eq!(snake_case("SnakeCase"), "snake_case");
        assert_eq!(snake_case("Snake Case"), "snake_case");
        assert_eq!(snake_case("-snake-case-"), "_snake_case_");
        assert_eq!(snake_case("snAke-case"), "sn_ake_case");
        assert_eq!(snake_case("snAKE-case"), "sn_a_k_e_case");
        assert_eq!(snake_case("snake-2-case"), "snake_2_case");
        assert_eq!(snake_case("snake2Case"), "snake2_case");
        assert_eq!(snake_case("snake2case"), "snake2case");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case("camelCase"), "camelCase");
        assert_eq!(camel_case("camel-case"), "camelCase");
        assert_eq!(camel_case("Camel-Case"), "camelCase");
        assert_eq!(camel_case("CamelCase"), "camelCase");
        assert_eq!(camel_case("camel_case"), "camelCase");
        assert_eq!(camel_case("camel case"), "camelCase");
        assert_eq!(camel_case("-camel-case-"), "camelCase");
        assert_eq!(camel_case("_camel_case_"), "camelCase");
        assert_eq!(camel_case("caMel-case"), "caMelCase");
        assert_eq!(camel_case("caMEL-case"), "caMELCase");
        assert_eq!(camel_case("camel-2-case"), "camel2Case");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case(""), "");
        assert_eq!(pascal_case("pascalCase"), "PascalCase");
        assert_eq!(pascal_case("pascal-case"), "PascalCase");
        assert_eq!(pascal_case("PascalCase"), "PascalCase");
        assert_eq!(pascal_case("pascal_case"), "PascalCase");
        assert_eq!(pascal_case(" pascal case "), "PascalCase");
        assert_eq!(pascal_case("paScal-case"), "PaScalCase");
        assert_eq!(pascal_case("pasCAL-case"), "PasCALCase");
        assert_eq!(pascal_case("pascal-2-case"), "Pascal2Case");
        assert_eq!(pascal_case("pascal2Case"), "Pascal2Case");
    }

    #[test]
    fn test_digits_do_not_open_boundaries() {
        // Boundary before `C`, none before `2`.
        assert_eq!(kebab_case("camel2Case"), "camel2-case");
        assert_eq!(snake_case("camel2Case"), "camel2_case");
    }
}
