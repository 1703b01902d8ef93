use recipe_stream::parser::strip_list_marker;
use recipe_stream::{
    accumulate, normalize, parse_sections, ReplaySource, Section, SectionKind, Snapshot,
};

const RECIPE: &str = "# Spicy Garlic Noodles

A quick weeknight bowl of chewy noodles tossed in a fiery garlic and chilli oil.

**Total Time:** 20 minutes

## Ingredients
- 200g wheat noodles
- 4 cloves garlic, minced
- 2 tbsp crème fraîche
- 1 tbsp soy sauce

## Instructions
1. Boil the noodles until just tender.
2. Fry the garlic in chilli oil over low heat.
3. Stir in the crème fraîche and soy sauce.

## Nutrition Facts
- 480 kcal per serving

## Wine Pairing
- A chilled off-dry Riesling 🍷

## Storage & Meal Prep
- Keeps in the fridge for two days.";

/// Every prefix of `text` that ends on a character boundary.
fn prefixes(text: &str) -> impl Iterator<Item = &str> {
    (0..=text.len())
        .filter(move |&i| text.is_char_boundary(i))
        .map(move |i| &text[..i])
}

#[test]
fn test_every_prefix_has_at_most_one_title() {
    for prefix in prefixes(RECIPE) {
        let titles = parse_sections(prefix)
            .iter()
            .filter(|s| s.kind == SectionKind::Title)
            .count();
        assert!(titles <= 1, "{} titles for prefix {:?}", titles, prefix);
    }
}

#[test]
fn test_normalize_is_idempotent_on_every_prefix() {
    for prefix in prefixes(RECIPE) {
        let once = normalize(prefix);
        assert_eq!(normalize(&once), once, "prefix {:?}", prefix);
    }
}

#[test]
fn test_complete_lines_only_ever_grow() {
    let full = parse_sections(RECIPE);

    for (i, _) in RECIPE.match_indices('\n') {
        let partial = parse_sections(&RECIPE[..i]);
        assert!(partial.len() <= full.len());

        if let Some((last, settled)) = partial.split_last() {
            assert_eq!(settled, &full[..settled.len()]);

            let growing = &full[settled.len()];
            assert_eq!(last.kind, growing.kind);
            assert_eq!(last.heading, growing.heading);
            assert!(growing.items.starts_with(&last.items));
        }
    }
}

/// Banner lines collapse into one title, and keyword lines win over list markers.
const EDGE_RECIPES: &[&str] = &[
    "Tacos\nIngredients\n- beef",
    "Title\n\nTips\n- tip one\nPrep Time: 10\n- still tips",
    "Chef's Special\nSpicy Garlic Noodles\n\nIngredients\n- noodles\n- 1/2 cup white wine\n- garlic",
];

/// How many places in the parse hold `line`.
fn placements(sections: &[Section], line: &str) -> usize {
    let content = strip_list_marker(line).unwrap_or(line);
    sections
        .iter()
        .map(|s| {
            // a collapsed title holds its banner lines joined by a space
            let in_heading = s.heading == line
                || s.heading == content
                || (s.kind == SectionKind::Title
                    && (s.heading.starts_with(&format!("{} ", line))
                        || s.heading.ends_with(&format!(" {}", line))));
            usize::from(in_heading) + s.items.iter().filter(|item| *item == content).count()
        })
        .sum()
}

fn assert_every_line_placed_once(text: &str) {
    let sections = parse_sections(text);
    for line in normalize(text).lines().map(str::trim).filter(|l| !l.is_empty()) {
        assert_eq!(
            placements(&sections, line),
            1,
            "line {:?} of {:?} in {:?}",
            line,
            text,
            sections
        );
    }
}

#[test]
fn test_every_line_is_placed_exactly_once() {
    assert_every_line_placed_once(RECIPE);
    for text in EDGE_RECIPES {
        assert_every_line_placed_once(text);
    }
}

#[test]
fn test_banner_lines_join_into_title() {
    let sections = parse_sections(EDGE_RECIPES[2]);
    let titles: Vec<_> = sections
        .iter()
        .filter(|s| s.kind == SectionKind::Title)
        .collect();

    assert_eq!(titles.len(), 1);
    assert!(titles[0].heading.contains("Chef's Special"));
    assert!(titles[0].heading.contains("Spicy Garlic Noodles"));
}

#[test]
fn test_section_order_follows_text() {
    let kinds: Vec<_> = parse_sections(RECIPE).iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Title,
            SectionKind::Description,
            SectionKind::Time,
            SectionKind::Ingredients,
            SectionKind::Instructions,
            SectionKind::Nutrition,
            SectionKind::Pairing,
            SectionKind::Storage,
        ]
    );
}

#[tokio::test]
async fn test_chunk_size_does_not_change_the_result() {
    let expected = parse_sections(RECIPE);

    for chunk_bytes in [1, 2, 3, 7, 64, 4096] {
        let mut source = ReplaySource::from_text(RECIPE, chunk_bytes);
        let mut snapshots: Vec<Snapshot> = Vec::new();
        let outcome = accumulate(&mut source, |s| snapshots.push(s.clone())).await;

        assert!(outcome.is_complete());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.snapshot.text, RECIPE);
        assert_eq!(outcome.snapshot.sections(), expected);

        let chunks = RECIPE.len().div_ceil(chunk_bytes);
        assert_eq!(snapshots.len(), chunks + 1, "chunk size {}", chunk_bytes);

        // split characters are held back, never replaced
        for snapshot in &snapshots {
            assert!(RECIPE.starts_with(&snapshot.text));
            assert!(!snapshot.text.contains(char::REPLACEMENT_CHARACTER));
        }
        assert!(snapshots[..snapshots.len() - 1].iter().all(|s| !s.complete));
        assert!(snapshots[snapshots.len() - 1].complete);
    }
}

#[tokio::test]
async fn test_title_settles_early() {
    let mut source = ReplaySource::from_text(RECIPE, 16);
    let mut titles = Vec::new();
    accumulate(&mut source, |s| titles.push(s.title())).await;

    let settled = titles
        .iter()
        .position(|t| t == "Spicy Garlic Noodles")
        .unwrap();
    assert!(titles[settled..].iter().all(|t| t == "Spicy Garlic Noodles"));
    assert!(settled < 3);
}
