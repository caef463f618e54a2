//! Free-text and filename sanitizing.

use regex::Regex;
use std::sync::OnceLock;

/// Characters that break paths or shell quoting in a filename.
const DANGEROUS_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Script-like markup and its replacement, in the order it is stripped.
const SCRIPT_PATTERNS: &[(&str, &str)] = &[
    // Whole script elements, content included; an unclosed one runs to the end
    (r"(?is)<\s*script\b[^>]*>.*?(?:<\s*/\s*script\s*>|\z)", ""),
    // Stray opening or closing script tags
    (r"(?i)<\s*/?\s*script\b[^>]*>", ""),
    (r"(?i)javascript\s*:", ""),
    // Inline event handlers (onclick=, onerror=, ...) inside a tag
    (r"(?i)(<[^>]*?\s)on[a-z]+\s*=", "${1}"),
];

fn script_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SCRIPT_PATTERNS
            .iter()
            .filter_map(|&(p, rep)| Regex::new(p).ok().map(|re| (re, rep)))
            .collect()
    })
}

/// Strip script markup from `text` and cap it at `max_length` characters.
///
/// Removal repeats until nothing matches. Empty input stays empty.
#[must_use]
pub fn sanitize_text(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Restart from the first pattern after every removal so a script element
    // reassembled by stripping a stray tag is dropped whole, content included.
    let mut cleaned = text.to_string();
    'strip: loop {
        for (re, replacement) in script_patterns() {
            if re.is_match(&cleaned) {
                cleaned = re.replace_all(&cleaned, *replacement).into_owned();
                continue 'strip;
            }
        }
        break;
    }

    match cleaned.char_indices().nth(max_length) {
        Some((cut, _)) => cleaned[..cut].to_string(),
        None => cleaned,
    }
}

/// Remove path-breaking characters from a filename.
///
/// Case, extension and every other character are kept as-is.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !DANGEROUS_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_TEXT_LENGTH;
    use proptest::prelude::*;

    #[test]
    fn clean_text_is_unchanged() {
        let text = "Normal text with some content";
        assert_eq!(sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH), text);
    }

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(sanitize_text("", DEFAULT_MAX_TEXT_LENGTH), "");
    }

    #[test]
    fn removes_script_elements() {
        let result = sanitize_text(
            "Hello <script>alert('xss')</script> world",
            DEFAULT_MAX_TEXT_LENGTH,
        );
        assert!(!result.contains("<script>"));
        assert!(!result.contains("alert"));
        assert_eq!(result, "Hello  world");
    }

    #[test]
    fn removes_multiline_mixed_case_scripts() {
        let text = "a<SCRIPT type=\"text/javascript\">\nsteal();\n</Script >b";
        assert_eq!(sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH), "ab");
    }

    #[test]
    fn removes_reassembled_tags() {
        let text = "<scr<script>x</script>ipt>alert(1)</script>";
        let result = sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH);
        assert!(!result.to_lowercase().contains("<script"));
        assert!(!result.contains("alert"));
    }

    #[test]
    fn removes_handlers_and_js_urls() {
        let text = r#"<img src=x onerror=steal()> <a href="javascript:go()">link</a>"#;
        let result = sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH);
        assert!(!result.contains("onerror="));
        assert!(!result.contains("javascript:"));
        assert!(result.contains("link"));
    }

    #[test]
    fn unclosed_script_drops_everything_after_it() {
        let result = sanitize_text("Hello <script>alert('x') world", DEFAULT_MAX_TEXT_LENGTH);
        assert_eq!(result, "Hello ");
    }

    #[test]
    fn strips_every_handler_in_a_tag() {
        let text = r#"<div onmouseover=a() class="x" onclick =b()>hi</div>"#;
        assert_eq!(
            sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH),
            r#"<div a() class="x" b()>hi</div>"#
        );
    }

    #[test]
    fn keeps_on_words_outside_tags() {
        let text = "Led team of size one=5 engineers";
        assert_eq!(sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH), text);
    }

    #[test]
    fn keeps_words_starting_with_on() {
        let text = "Worked on ontology modeling";
        assert_eq!(sanitize_text(text, DEFAULT_MAX_TEXT_LENGTH), text);
    }

    #[test]
    fn enforces_length_limit() {
        let long_text = "x".repeat(20_000);
        let result = sanitize_text(&long_text, 1000);
        assert_eq!(result.chars().count(), 1000);
    }

    #[test]
    fn length_limit_counts_chars() {
        let result = sanitize_text("ééééé", 3);
        assert_eq!(result, "ééé");
    }

    #[test]
    fn filename_without_dangerous_chars_is_unchanged() {
        assert_eq!(sanitize_filename("normal_file.pdf"), "normal_file.pdf");
        assert_eq!(sanitize_filename("My Resume (v2).PDF"), "My Resume (v2).PDF");
    }

    #[test]
    fn filename_dangerous_chars_removed() {
        let result = sanitize_filename("file<>:\"/\\|?*.pdf");
        assert!(!result.chars().any(|c| "<>:\"/\\|?*".contains(c)));
        assert_eq!(result, "file.pdf");
    }

    #[test]
    fn filename_control_chars_removed() {
        assert_eq!(sanitize_filename("cv\0\n.docx"), "cv.docx");
    }

    proptest! {
        #[test]
        fn sanitize_text_is_idempotent(text in ".{0,200}", max in 0usize..300) {
            let once = sanitize_text(&text, max);
            prop_assert_eq!(sanitize_text(&once, max), once);
        }

        #[test]
        fn sanitize_text_idempotent_on_markup(
            parts in proptest::collection::vec(
                prop_oneof![
                    Just("<script>".to_string()),
                    Just("</script>".to_string()),
                    Just("<scr".to_string()),
                    Just("ipt>".to_string()),
                    Just(" onclick=".to_string()),
                    Just("javascript:".to_string()),
                    "[a-z ]{0,6}",
                ],
                0..12,
            )
        ) {
            let text = parts.concat();
            let once = sanitize_text(&text, DEFAULT_MAX_TEXT_LENGTH);
            prop_assert_eq!(sanitize_text(&once, DEFAULT_MAX_TEXT_LENGTH), once.clone());
            prop_assert!(!once.to_lowercase().contains("<script>"));
        }

        #[test]
        fn sanitize_filename_never_keeps_dangerous_chars(name in ".{0,64}") {
            let cleaned = sanitize_filename(&name);
            prop_assert!(!cleaned.chars().any(|c| DANGEROUS_FILENAME_CHARS.contains(&c)));
        }
    }
}
