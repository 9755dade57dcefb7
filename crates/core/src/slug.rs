//! URL slug generation for projects and mini-sites.

/// Generate a URL slug from a display name.
///
/// Lowercases ASCII alphanumerics, turns runs of whitespace, hyphens and
/// underscores into a single `-`, and drops every other character
/// outright. Leading and trailing separators are trimmed.
///
/// # Examples
///
/// ```
/// use mirador_core::slug::generate_slug;
///
/// assert_eq!(generate_slug("DAMAC Hills 2"), "damac-hills-2");
/// assert_eq!(generate_slug("Special@#$Characters"), "specialcharacters");
/// ```
pub fn generate_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // Everything else (punctuation, symbols) is dropped without
        // leaving a separator behind.
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name() {
        assert_eq!(generate_slug("DAMAC Hills 2"), "damac-hills-2");
    }

    #[test]
    fn punctuation_is_dropped_not_separated() {
        assert_eq!(generate_slug("Special@#$Characters"), "specialcharacters");
    }

    #[test]
    fn repeated_separators_collapse() {
        assert_eq!(generate_slug("Palm  -  Jumeirah"), "palm-jumeirah");
        assert_eq!(generate_slug("emaar__beachfront"), "emaar-beachfront");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(generate_slug("  Dubai Creek Harbour  "), "dubai-creek-harbour");
        assert_eq!(generate_slug("---Marina---"), "marina");
    }

    #[test]
    fn empty_and_symbol_only_inputs_produce_empty_slug() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("@#$%"), "");
        assert_eq!(generate_slug("   "), "");
    }

    #[test]
    fn is_deterministic() {
        let a = generate_slug("Bay Residences (Tower B)");
        let b = generate_slug("Bay Residences (Tower B)");
        assert_eq!(a, b);
        assert_eq!(a, "bay-residences-tower-b");
    }
}
