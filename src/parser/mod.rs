//! Segmentation of generated recipe text into typed sections.
//!
//! Parsing is a pure function of the whole text. Streaming callers re-parse
//! the full buffer after every chunk; truncated input simply yields fewer
//! (or shorter) sections.

mod builder;
mod normalize;
mod rules;

pub use builder::SectionBuilder;
pub use normalize::normalize;
pub use rules::{
    classify_line, strip_list_marker, HeaderRule, LineClass, LineContext, HEADER_RULES,
};

use log::trace;

use crate::model::{Section, SectionKind};

/// Title returned when the text contains no lines at all.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Parse generated text into an ordered list of sections.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let first_line_len = normalized
        .lines()
        .next()
        .map(|l| l.trim().chars().count())
        .unwrap_or(0);

    let builder = normalized
        .split('\n')
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .fold(SectionBuilder::new(), |builder, (index, line)| {
            let ctx = LineContext {
                index,
                first_line_len,
            };
            builder.step(line, classify_line(line, ctx))
        });

    trace!(
        "open section at end of text: {:?}",
        builder.current().map(|s| s.kind)
    );
    let sections = builder.finish();
    trace!("parsed {} sections", sections.len());
    sections
}

/// Human-readable recipe name: the first title section, or [`UNTITLED_RECIPE`].
pub fn extract_title(text: &str) -> String {
    parse_sections(text)
        .into_iter()
        .find(|s| s.kind == SectionKind::Title)
        .map(|s| s.heading)
        .unwrap_or_else(|| UNTITLED_RECIPE.to_string())
}
