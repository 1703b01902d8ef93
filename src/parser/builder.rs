use crate::model::{Section, SectionKind};
use crate::parser::rules::LineClass;

/// Accumulator threaded through the fold over classified lines.
///
/// `current` indexes the most recently opened header section, the only one
/// that list items may attach to. Standalone sections never change it.
#[derive(Debug, Default)]
pub struct SectionBuilder {
    sections: Vec<Section>,
    current: Option<usize>,
    title: Option<usize>,
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one classified line and return the updated builder.
    pub fn step(mut self, line: &str, class: LineClass<'_>) -> Self {
        match class {
            LineClass::Title => match self.title {
                Some(idx) => {
                    let title = &mut self.sections[idx].heading;
                    title.push(' ');
                    title.push_str(line);
                }
                None => {
                    self.title = Some(self.sections.len());
                    self.sections.push(Section::new(SectionKind::Title, line));
                }
            },
            LineClass::Header(kind) => {
                self.current = Some(self.sections.len());
                self.sections.push(Section::new(kind, line));
            }
            LineClass::Time => self.sections.push(Section::new(SectionKind::Time, line)),
            LineClass::Description => self
                .sections
                .push(Section::new(SectionKind::Description, line)),
            LineClass::Text => self.sections.push(Section::new(SectionKind::Text, line)),
            LineClass::ListItem(item) => match self.current {
                Some(idx) if self.sections[idx].kind.is_list_bearing() => {
                    self.sections[idx].items.push(item.to_string());
                }
                _ => self.sections.push(Section::new(SectionKind::Text, item)),
            },
        }
        self
    }

    /// The section list items would currently attach to, if any.
    pub fn current(&self) -> Option<&Section> {
        self.current.map(|idx| &self.sections[idx])
    }

    pub fn finish(self) -> Vec<Section> {
        self.sections
    }
}
