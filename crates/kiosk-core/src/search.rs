//! Token-substring search over post metadata, case- and
//! diacritic-insensitive.

use crate::PostSummary;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase the text, decompose accented characters and drop the combining
/// marks, and replace punctuation with spaces so tokenization sees word
/// boundaries.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() || ch == '_' {
            out.extend(ch.to_lowercase());
        } else {
            out.push(' ');
        }
    }
    out
}

/// Non-empty normalized tokens of a raw query.
pub fn tokenize(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn haystack(post: &PostSummary) -> String {
    normalize(&format!(
        "{} {} {} {} {}",
        post.title, post.category, post.short_desc, post.description, post.date
    ))
}

/// A post matches when every query token appears somewhere in its
/// normalized metadata (AND across tokens, substring within the blob).
pub fn matches(post: &PostSummary, tokens: &[String]) -> bool {
    let hay = haystack(post);
    tokens.iter().all(|t| hay.contains(t.as_str()))
}

/// In-memory copy of the full catalog, re-filtered on every keystroke.
pub struct SearchIndex {
    posts: Vec<PostSummary>,
}

impl SearchIndex {
    pub fn new(posts: Vec<PostSummary>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Indices of matching posts in catalog order. A query with no
    /// non-empty tokens clears the result list instead of matching
    /// everything.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        self.posts
            .iter()
            .enumerate()
            .filter(|(_, p)| matches(p, &tokens))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Wrap-around keyboard cursor over the currently rendered result list.
/// `None` means no selection; the cursor resets whenever the overlay opens
/// or the query changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub fn index(&self) -> Option<usize> {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = None;
    }

    pub fn down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.0 = Some(match self.0 {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.0 = Some(match self.0 {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, category: &str, desc: &str) -> PostSummary {
        PostSummary {
            title: title.into(),
            category: category.into(),
            short_desc: String::new(),
            description: desc.into(),
            date: "Nov 2025".into(),
            url: format!("posts/{}.html", title.to_lowercase().replace(' ', "-")),
        }
    }

    fn fixture() -> SearchIndex {
        SearchIndex::new(vec![
            post(
                "NTLM Authentication Deep Dive",
                "Protocols",
                "Abusing relay primitives end to end",
            ),
            post("NTLM Basics", "Protocols", "Challenge/response walkthrough"),
            post("SMTP Relay Hygiene", "Blue Team", "Stopping open relays"),
            post("Operação Silêncio", "Red Team", "Uma análise de evasão"),
        ])
    }

    #[test]
    fn and_semantics_across_fields() {
        let idx = fixture();
        // "ntlm" from the title, "relay" from the description.
        assert_eq!(idx.filter("ntlm relay"), vec![0]);
        // Each token alone matches more.
        assert_eq!(idx.filter("ntlm"), vec![0, 1]);
        assert_eq!(idx.filter("relay"), vec![0, 2]);
    }

    #[test]
    fn case_and_diacritic_insensitive() {
        let idx = fixture();
        let expected = vec![3];
        assert_eq!(idx.filter("ação"), expected);
        assert_eq!(idx.filter("acao"), expected);
        assert_eq!(idx.filter("ACAO"), expected);
        assert_eq!(idx.filter("silencio"), expected);
    }

    #[test]
    fn punctuation_splits_tokens() {
        assert_eq!(tokenize("challenge/response!"), vec!["challenge", "response"]);
        assert_eq!(tokenize("  ,,  "), Vec::<String>::new());
    }

    #[test]
    fn below_minimum_query_clears_results() {
        let idx = fixture();
        assert!(idx.filter("").is_empty());
        assert!(idx.filter("   ").is_empty());
        assert!(idx.filter("?!").is_empty());
    }

    #[test]
    fn results_preserve_catalog_order() {
        let idx = fixture();
        assert_eq!(idx.filter("protocols"), vec![0, 1]);
    }

    #[test]
    fn selection_wraps_both_directions() {
        let mut sel = Selection::default();
        assert_eq!(sel.index(), None);

        sel.down(3);
        assert_eq!(sel.index(), Some(0));
        sel.down(3);
        sel.down(3);
        assert_eq!(sel.index(), Some(2));
        sel.down(3);
        assert_eq!(sel.index(), Some(0));

        sel.reset();
        sel.up(3);
        assert_eq!(sel.index(), Some(2));
        sel.reset();
        sel.down(3);
        sel.up(3);
        assert_eq!(sel.index(), Some(2));
    }

    #[test]
    fn selection_ignores_empty_lists() {
        let mut sel = Selection::default();
        sel.down(0);
        sel.up(0);
        assert_eq!(sel.index(), None);
    }
}
