use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_MARKERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:#{1,6}[ \t]+)+").unwrap());
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Strip markdown decoration from generated text before segmentation.
///
/// Runs the substitution pass until the text stops changing. Every pass that
/// changes the text makes it strictly shorter, so this terminates, and the
/// result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let text = HEADER_MARKERS_RE.replace_all(text, "");
    let text = BOLD_RE.replace_all(&text, "${1}");
    let text = ITALIC_RE.replace_all(&text, "${1}");
    let text = CODE_FENCE_RE.replace_all(&text, "");
    let text = INLINE_CODE_RE.replace_all(&text, "${1}");
    text.trim().to_string()
}
