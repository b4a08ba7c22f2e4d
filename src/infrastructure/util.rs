// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("slug separator pattern is valid")
});

/// Lowercases, collapses every run of non `[a-z0-9]` characters into one
/// hyphen and trims hyphens from both ends. No transliteration is attempted.
pub fn ascii_slugify(input: &str) -> String {
    let lowercase = input.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowercase, "-");
    replaced.trim_matches('-').to_string()
}

#[derive(Default, Clone)]
pub struct AsciiSlugGenerator;

impl SlugGenerator for AsciiSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        ascii_slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn simple_name() {
        assert_eq!(ascii_slugify("My Model"), "my-model");
    }

    #[test]
    fn runs_of_separators_collapse() {
        assert_eq!(ascii_slugify("Work & Personal @ Home"), "work-personal-home");
        assert_eq!(ascii_slugify("a  --  b"), "a-b");
    }

    #[test]
    fn edges_are_trimmed() {
        assert_eq!(ascii_slugify("  --Hello, World!--  "), "hello-world");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(ascii_slugify("Release 2.0"), "release-2-0");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(ascii_slugify("Café Crème"), "caf-cr-me");
    }

    #[test]
    fn nothing_alphanumeric_yields_empty() {
        assert_eq!(ascii_slugify(""), "");
        assert_eq!(ascii_slugify("   "), "");
        assert_eq!(ascii_slugify("!@#$%^&*()"), "");
        assert_eq!(ascii_slugify("日本語"), "");
    }

    #[test]
    fn output_is_always_well_formed() {
        let inputs = [
            "My Model",
            "  leading and trailing  ",
            "UPPER_snake_Case",
            "dots.and/slashes\\too",
            "tabs\tand\nnewlines",
            "émoji 🎉 party",
            "---",
            "x",
            "Ünïcödé Çhàrs 123",
        ];
        for input in inputs {
            let slug = ascii_slugify(input);
            assert!(is_well_formed(&slug), "{input:?} produced {slug:?}");
            assert_eq!(slug, ascii_slugify(input));
        }
    }
}
