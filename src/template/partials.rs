//! Partial inclusion
//!
//! `{{ partials/<path> }}` is replaced by the raw content of
//! `<views_root>/<path>.html`. Scanning resumes at the splice point, so
//! directives inside an included partial are expanded by the same loop.
//! Cycles are cut off by a splice limit and a cap on the buffer size.

pub const DIRECTIVE_START: &str = "{{ partials/";
pub const DIRECTIVE_END: &str = " }}";

/// Byte budget floor; small views may still pull in full-size partials
pub const MIN_BYTE_BUDGET: usize = 4096;
/// Expanded output may be at most this many times the budget base
pub const MAX_GROWTH_FACTOR: usize = 256;

/// Expansion stopped before all directives were resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionLimitExceeded {
    /// More than `limit` splices were needed
    Splices { limit: usize },
    /// The buffer grew past `max_bytes`
    Size { max_bytes: usize },
}

/// Marker spliced in place of a partial that could not be loaded
pub fn missing_marker(name: &str) -> String {
    format!("<!-- Partial '{name}.html' not found -->")
}

/// Largest buffer an expansion of `content_len` input bytes may produce
pub const fn byte_budget(content_len: usize) -> usize {
    let base = if content_len > MIN_BYTE_BUDGET {
        content_len
    } else {
        MIN_BYTE_BUDGET
    };
    base.saturating_mul(MAX_GROWTH_FACTOR)
}

/// Expand every partial directive in `content`.
///
/// `load` receives the trimmed partial name (without `.html`) and returns
/// its body, or `None` when it does not exist. A start marker without a
/// closing ` }}` ends expansion and is left in place.
pub fn include_partials<F>(
    mut content: String,
    limit: usize,
    mut load: F,
) -> Result<String, ExpansionLimitExceeded>
where
    F: FnMut(&str) -> Option<String>,
{
    let max_bytes = byte_budget(content.len());
    let mut expansions = 0usize;
    let mut cursor = 0usize;

    while let Some(found) = content[cursor..].find(DIRECTIVE_START) {
        let start = cursor + found;
        let Some(offset) = content[start..].find(DIRECTIVE_END) else {
            break;
        };
        let end = start + offset;

        if expansions >= limit {
            return Err(ExpansionLimitExceeded::Splices { limit });
        }
        expansions += 1;

        let name = content[start + DIRECTIVE_START.len()..end].trim().to_string();
        let replacement = load(&name).unwrap_or_else(|| missing_marker(&name));
        content.replace_range(start..end + DIRECTIVE_END.len(), &replacement);

        if content.len() > max_bytes {
            return Err(ExpansionLimitExceeded::Size { max_bytes });
        }

        // A directive may straddle the splice boundary
        cursor = start.saturating_sub(DIRECTIVE_START.len() - 1);
        while !content.is_char_boundary(cursor) {
            cursor -= 1;
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn loader<'a>(
        files: &'a HashMap<&'static str, &'static str>,
    ) -> impl FnMut(&str) -> Option<String> + 'a {
        move |name: &str| files.get(name).map(|s| (*s).to_string())
    }

    #[test]
    fn test_splices_at_position() {
        let files = HashMap::from([("header", "HI")]);
        let out = include_partials(
            "<body>{{ partials/header }}</body>".to_string(),
            10,
            loader(&files),
        )
        .unwrap();
        assert_eq!(out, "<body>HI</body>");
    }

    #[test]
    fn test_missing_partial_degrades() {
        let files = HashMap::new();
        let out =
            include_partials("a{{ partials/nav }}b".to_string(), 10, loader(&files)).unwrap();
        assert_eq!(out, "a<!-- Partial 'nav.html' not found -->b");
    }

    #[test]
    fn test_nested_partials() {
        let files = HashMap::from([
            ("layout/head", "<head>{{ partials/layout/title }}</head>"),
            ("layout/title", "<title>{{ page_title }}</title>"),
        ]);
        let out = include_partials(
            "{{ partials/layout/head }}<main></main>".to_string(),
            10,
            loader(&files),
        )
        .unwrap();
        assert_eq!(
            out,
            "<head><title>{{ page_title }}</title></head><main></main>"
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let files = HashMap::from([("footer", "F")]);
        let out =
            include_partials("{{ partials/footer   }}".to_string(), 10, loader(&files)).unwrap();
        assert_eq!(out, "F");
    }

    #[test]
    fn test_unclosed_directive_stops() {
        let files = HashMap::from([("x", "X")]);
        let input = "{{ partials/x}} tail".to_string();
        let out = include_partials(input.clone(), 10, loader(&files)).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_self_reference_hits_limit() {
        let files = HashMap::from([("a", "{{ partials/a }}")]);
        let err =
            include_partials("{{ partials/a }}".to_string(), 50, loader(&files)).unwrap_err();
        assert_eq!(err, ExpansionLimitExceeded::Splices { limit: 50 });
    }

    #[test]
    fn test_mutual_reference_hits_limit() {
        let files = HashMap::from([("a", "A{{ partials/b }}"), ("b", "B{{ partials/a }}")]);
        assert!(include_partials("{{ partials/a }}".to_string(), 20, loader(&files)).is_err());
    }

    #[test]
    fn test_exact_limit_is_allowed() {
        let files = HashMap::from([("one", "1")]);
        let out = include_partials(
            "{{ partials/one }}{{ partials/one }}".to_string(),
            2,
            loader(&files),
        )
        .unwrap();
        assert_eq!(out, "11");
    }

    #[test]
    fn test_growing_cycle_hits_size_cap() {
        let big: &'static str =
            Box::leak(format!("{}{{{{ partials/big }}}}", "x".repeat(100_000)).into_boxed_str());
        let files = HashMap::from([("big", big)]);
        let err =
            include_partials("{{ partials/big }}".to_string(), 1000, loader(&files)).unwrap_err();
        assert_eq!(
            err,
            ExpansionLimitExceeded::Size {
                max_bytes: byte_budget("{{ partials/big }}".len())
            }
        );
    }

    #[test]
    fn test_directive_spliced_across_boundary() {
        let files = HashMap::from([("open", "{{ part"), ("x", "X")]);
        let out = include_partials(
            "{{ partials/open }}ials/x }}".to_string(),
            10,
            loader(&files),
        )
        .unwrap();
        assert_eq!(out, "X");
    }

    #[test]
    fn test_byte_budget_floor() {
        assert_eq!(byte_budget(10), MIN_BYTE_BUDGET * MAX_GROWTH_FACTOR);
        assert_eq!(byte_budget(10_000), 10_000 * MAX_GROWTH_FACTOR);
    }
}
