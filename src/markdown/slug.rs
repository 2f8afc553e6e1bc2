// ABOUTME: Heading anchor generation for rendered markdown
// ABOUTME: Turns heading text into unique, URL-friendly id attributes

use std::collections::HashMap;

/// Hands out unique slugs within one document
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, suffixed with `-1`, `-2`, ... on repeats
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

/// Lowercase the text, drop ASCII punctuation other than `-` and `_`, and
/// turn whitespace into `-`.
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_ascii_punctuation() && c != '-' && c != '_' {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("A header"), "a-header");
        assert_eq!(slugify("  What's new? "), "whats-new");
        assert_eq!(slugify("snake_case and-dash"), "snake_case-and-dash");
        assert_eq!(slugify("Über Größe"), "über-größe");
    }

    #[test]
    fn test_repeated_headings_get_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-1");
        assert_eq!(slugger.slug("usage"), "usage-2");
        assert_eq!(slugger.slug("Other"), "other");
    }
}
