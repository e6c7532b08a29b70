//! Placeholder substitution
//!
//! `{{ name }}` is replaced by the context value for `name`, HTML-escaped
//! unless it was stored as markup. Unknown names are left exactly as
//! written so an outer render can fill them later.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::mvc::Context;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Replace every known placeholder in `content`
pub fn substitute(content: &str, context: &Context) -> String {
    placeholder_regex()
        .replace_all(content, |caps: &Captures<'_>| {
            context
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), |value| value.render().into_owned())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown() {
        let ctx = Context::new().with("title", "T");
        assert_eq!(
            substitute("<h1>{{ title }}</h1>{{ other }}", &ctx),
            "<h1>T</h1>{{ other }}"
        );
    }

    #[test]
    fn test_unknown_token_is_identity() {
        let ctx = Context::new();
        assert_eq!(substitute("{{ x }}", &ctx), "{{ x }}");
    }

    #[test]
    fn test_whitespace_tolerance() {
        let ctx = Context::new().with("n", 5_i64);
        assert_eq!(substitute("{{n}}|{{   n }}|{{\tn\n}}", &ctx), "5|5|5");
    }

    #[test]
    fn test_non_word_tokens_untouched() {
        let ctx = Context::new().with("a", "A");
        let body = "{{ partials/a }} {{ a.b }} {{ }}";
        assert_eq!(substitute(body, &ctx), body);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let ctx = Context::new().with("a", "{{ b }}").with("b", "B");
        assert_eq!(substitute("{{ a }}", &ctx), "{{ b }}");
    }

    #[test]
    fn test_idempotent_without_tokens() {
        let ctx = Context::new().with("title", "T");
        let once = substitute("<p>{{ title }}</p>", &ctx);
        assert_eq!(substitute(&once, &ctx), once);
    }

    #[test]
    fn test_text_is_escaped_markup_is_not() {
        let ctx = Context::new()
            .with("name", "<script>alert('x')</script>")
            .with_html("items", "<li>a</li>");
        let out = substitute("<p>{{ name }}</p><ul>{{ items }}</ul>", &ctx);
        assert!(out.starts_with("<p>&lt;script&gt;alert("));
        assert!(!out.contains("<script>"));
        assert!(out.ends_with("</p><ul><li>a</li></ul>"));
    }
}
