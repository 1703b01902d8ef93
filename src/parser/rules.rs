use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::SectionKind;

/// Lines at or above this length never collapse a second line into the title.
pub const TITLE_BANNER_MAX_LEN: usize = 50;

/// Unmarked lines longer than this are prose descriptions rather than labels.
pub const DESCRIPTION_MIN_LEN: usize = 50;

const TIME_KEYWORDS: &[&str] = &["time", "cook", "prep"];

static LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[•\-*]|[0-9]+\.)\s+").unwrap());

/// A keyword rule that turns a short line into a section header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    pub kind: SectionKind,
    pub keywords: &'static [&'static str],
    /// Exclusive upper bound on line length, so that ordinary sentences
    /// mentioning a keyword stay prose.
    pub max_len: usize,
}

impl HeaderRule {
    /// `lowered` must already be lowercase; `len` is the line length in chars.
    pub fn matches(&self, lowered: &str, len: usize) -> bool {
        len < self.max_len && self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Header rules in precedence order; the first match wins.
pub const HEADER_RULES: &[HeaderRule] = &[
    HeaderRule {
        kind: SectionKind::Nutrition,
        keywords: &["nutrition", "calorie", "macronutrient", "health benefit"],
        max_len: 80,
    },
    HeaderRule {
        kind: SectionKind::Ingredients,
        keywords: &["ingredients"],
        max_len: 40,
    },
    HeaderRule {
        kind: SectionKind::Instructions,
        keywords: &["instruction", "method", "steps", "preparation"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Health,
        keywords: &["health", "benefit", "therapeutic"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Techniques,
        keywords: &["technique", "chef", "advanced"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Substitutions,
        keywords: &["substitut", "alternative"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Pairing,
        keywords: &["pairing", "wine", "beverage"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Storage,
        keywords: &["storage", "meal prep", "scaling"],
        max_len: 50,
    },
    HeaderRule {
        kind: SectionKind::Tips,
        keywords: &["tip"],
        max_len: 40,
    },
    HeaderRule {
        kind: SectionKind::Difficulty,
        keywords: &["difficulty", "skill level", "complexity", "skill requirement"],
        max_len: 80,
    },
];

/// Where a line sits in the text being parsed.
#[derive(Debug, Clone, Copy)]
pub struct LineContext {
    /// Position in the normalized line sequence, blank lines included.
    pub index: usize,
    /// Length of the line at index 0.
    pub first_line_len: usize,
}

/// What a single line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Title,
    Header(SectionKind),
    Time,
    /// List entry with its marker stripped.
    ListItem(&'a str),
    Description,
    Text,
}

/// Classify one trimmed, non-empty line.
pub fn classify_line<'a>(line: &'a str, ctx: LineContext) -> LineClass<'a> {
    let len = line.chars().count();

    if ctx.index == 0 || (ctx.index == 1 && ctx.first_line_len < TITLE_BANNER_MAX_LEN) {
        return LineClass::Title;
    }

    let lowered = line.to_lowercase();

    if let Some(rule) = HEADER_RULES.iter().find(|r| r.matches(&lowered, len)) {
        return LineClass::Header(rule.kind);
    }

    if TIME_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return LineClass::Time;
    }

    if let Some(item) = strip_list_marker(line) {
        return LineClass::ListItem(item);
    }

    if len > DESCRIPTION_MIN_LEN {
        LineClass::Description
    } else {
        LineClass::Text
    }
}

/// Content after a leading bullet (`•`, `-`, `*`) or `1.` style marker.
pub fn strip_list_marker(line: &str) -> Option<&str> {
    LIST_MARKER_RE.find(line).map(|m| &line[m.end()..])
}
