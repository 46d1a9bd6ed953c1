//! Regex-based markup stripping.
//!
//! Not HTML-aware: entities are left encoded and unclosed `<script>`/`<style>` blocks
//! are only reduced to their text by the generic tag pass.
use std::sync::LazyLock;

use regex::Regex;

pub const MAX_EXTRACTED_CHARS: usize = 8000;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Plain text of `html`, at most [`MAX_EXTRACTED_CHARS`] characters.
pub fn extract_text(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let untagged = TAG_RE.replace_all(&without_styles, " ");
    let collapsed = WHITESPACE_RE.replace_all(&untagged, " ");
    truncate_chars(collapsed.trim(), MAX_EXTRACTED_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_styles_and_tags() {
        let html = r#"<html><head>
<title>Acme</title>
<STYLE type="text/css">
  body { color: red; }
</STYLE>
<script src="x.js"></script>
<Script>
  var secret = "<p>not text</p>";
</Script>
</head><body><h1>Acme   Corp</h1>
<p>We build <b>rockets</b>.</p></body></html>"#;
        assert_eq!(extract_text(html), "Acme Acme Corp We build rockets .");
    }

    #[test]
    fn script_removal_is_non_greedy() {
        let html = "<script>a()</script>keep<script>b()</script>";
        assert_eq!(extract_text(html), "keep");
    }

    #[test]
    fn unclosed_script_leaks_its_text_but_not_tags() {
        let html = "<p>hello</p><script>alert(1)";
        assert_eq!(extract_text(html), "hello alert(1)");
    }

    #[test]
    fn entities_are_not_decoded() {
        assert_eq!(extract_text("<p>Fish &amp; Chips</p>"), "Fish &amp; Chips");
    }

    #[test]
    fn output_is_capped_at_8000_chars() {
        let body = "<div>é word</div>".repeat(3000);
        let text = extract_text(&format!("<body>{body}<script>x</script></body>"));
        assert_eq!(text.chars().count(), MAX_EXTRACTED_CHARS);
        assert!(text.starts_with("é word é word"));

        let nested = "<div><span <b>>x<<i>y</i>".repeat(5000);
        assert!(extract_text(&nested).chars().count() <= MAX_EXTRACTED_CHARS);
    }

    #[test]
    fn short_input_is_untouched_by_truncation() {
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(extract_text("   \n\t "), "");
    }
}
