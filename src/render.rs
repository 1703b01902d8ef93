//! Presentation of parsed sections as recipe cards.
//!
//! Renderers key everything off [`SectionKind`]. They accept any subset of
//! kinds in any order and sections with no items. While a stream is still
//! running (`complete == false`) output stays plain; once complete, cards
//! get their kind markers and default headings.

use html_escape::encode_text;

use crate::model::{Section, SectionKind};

fn marker(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Title => "🍽",
        SectionKind::Ingredients => "🧺",
        SectionKind::Instructions => "👩‍🍳",
        SectionKind::Nutrition => "📊",
        SectionKind::Health => "💚",
        SectionKind::Techniques => "🔪",
        SectionKind::Substitutions => "🔄",
        SectionKind::Pairing => "🍷",
        SectionKind::Storage => "📦",
        SectionKind::Tips => "💡",
        SectionKind::Difficulty => "🎯",
        SectionKind::Time => "⏱",
        SectionKind::Description | SectionKind::Text => "",
    }
}

/// Render sections for a terminal.
pub fn render_text(sections: &[Section], complete: bool) -> String {
    let mut out = String::new();

    for section in sections {
        match section.kind {
            SectionKind::Title if complete => {
                let line = format!("{} {}", marker(section.kind), section.display_heading());
                out.push_str(&line);
                out.push('\n');
                out.push_str(&"=".repeat(line.chars().count()));
                out.push_str("\n\n");
            }
            SectionKind::Time if complete => {
                out.push_str(&format!("{} {}\n\n", marker(section.kind), section.heading));
            }
            SectionKind::Title
            | SectionKind::Time
            | SectionKind::Description
            | SectionKind::Text => {
                out.push_str(&section.heading);
                out.push_str("\n\n");
            }
            kind => {
                let heading = section.display_heading();
                if complete {
                    out.push_str(&format!("{} {}\n", marker(kind), heading));
                    out.push_str(&"-".repeat(heading.chars().count() + 3));
                    out.push('\n');
                } else {
                    out.push_str(heading);
                    out.push('\n');
                }
                for (i, item) in section.items.iter().enumerate() {
                    if kind == SectionKind::Instructions {
                        out.push_str(&format!("{}. {}\n", i + 1, item));
                    } else {
                        out.push_str(&format!("- {}\n", item));
                    }
                }
                out.push('\n');
            }
        }
    }

    out.trim_end().to_string()
}

/// Render sections as an HTML fragment of cards.
pub fn render_html(sections: &[Section], complete: bool) -> String {
    let state = if complete { "final" } else { "streaming" };
    let mut out = format!("<article class=\"recipe recipe--{}\">\n", state);

    for section in sections {
        let kind = section.kind.as_str();
        match section.kind {
            SectionKind::Title => out.push_str(&format!(
                "<h1 class=\"recipe-title\">{}</h1>\n",
                encode_text(section.display_heading())
            )),
            SectionKind::Description | SectionKind::Text | SectionKind::Time => {
                out.push_str(&format!(
                    "<p class=\"recipe-{}\">{}</p>\n",
                    kind,
                    encode_text(&section.heading)
                ))
            }
            _ => {
                let list_tag = if section.kind == SectionKind::Instructions {
                    "ol"
                } else {
                    "ul"
                };
                out.push_str(&format!("<section class=\"card card--{}\">\n", kind));
                let heading = if complete {
                    format!("{} {}", marker(section.kind), section.display_heading())
                } else {
                    section.display_heading().to_string()
                };
                out.push_str(&format!("<h2>{}</h2>\n", encode_text(&heading)));
                if !section.items.is_empty() {
                    out.push_str(&format!("<{}>\n", list_tag));
                    for item in &section.items {
                        out.push_str(&format!("<li>{}</li>\n", encode_text(item)));
                    }
                    out.push_str(&format!("</{}>\n", list_tag));
                }
                out.push_str("</section>\n");
            }
        }
    }

    out.push_str("</article>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sections;

    const RECIPE: &str = "Spicy Garlic Noodles\n\nIngredients\n- noodles\n- garlic\n\nInstructions\n1. Boil noodles\n2. Stir fry garlic";

    #[test]
    fn test_streaming_text_is_plain() {
        let out = render_text(&parse_sections(RECIPE), false);
        assert_eq!(
            out,
            "Spicy Garlic Noodles\n\nIngredients\n- noodles\n- garlic\n\nInstructions\n1. Boil noodles\n2. Stir fry garlic"
        );
    }

    #[test]
    fn test_complete_text_is_decorated() {
        let out = render_text(&parse_sections(RECIPE), true);
        assert!(out.starts_with("🍽 Spicy Garlic Noodles\n===="));
        assert!(out.contains("🧺 Ingredients\n"));
        assert!(out.contains("1. Boil noodles"));
    }

    #[test]
    fn test_empty_heading_uses_default() {
        let sections = vec![Section::new(SectionKind::Tips, "")];
        assert_eq!(render_text(&sections, false), "Chef's Final Notes");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(render_text(&[], true), "");
        assert_eq!(
            render_html(&[], false),
            "<article class=\"recipe recipe--streaming\">\n</article>\n"
        );
    }

    #[test]
    fn test_html_escapes_content() {
        let sections = parse_sections("Mac & Cheese\n\nIngredients\n- <b>cheddar</b>");
        let html = render_html(&sections, true);
        assert!(html.contains("<h1 class=\"recipe-title\">Mac &amp; Cheese</h1>"));
        assert!(html.contains("<li>&lt;b&gt;cheddar&lt;/b&gt;</li>"));
        assert!(html.contains("<section class=\"card card--ingredients\">"));
        assert!(html.contains("recipe--final"));
    }

    #[test]
    fn test_html_header_without_items() {
        let sections = vec![Section::new(SectionKind::Pairing, "Wine Pairing")];
        let html = render_html(&sections, false);
        assert!(html.contains("<h2>Wine Pairing</h2>"));
        assert!(!html.contains("<ul>"));
    }
}
