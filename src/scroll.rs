/// Height of the fixed navigation bar, in CSS pixels. A section is in focus
/// while it spans this line.
pub const FOCUS_LINE_PX: f64 = 100.0;

/// Viewport-relative vertical extent of a section, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn spans(&self, line: f64) -> bool {
        self.top <= line && self.bottom >= line
    }
}

/// Tracks which section is active for nav highlighting.
///
/// Sections are checked in page order and the first one spanning the focus line
/// wins, even if a later one covers more of the viewport. When nothing spans the
/// line (above the first section, or a section not mounted yet) the previous
/// answer is kept.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    sections: Vec<String>,
    focus_line: f64,
    active: String,
}

impl ScrollTracker {
    pub fn new(sections: Vec<String>) -> Self {
        Self::with_focus_line(sections, FOCUS_LINE_PX)
    }

    pub fn with_focus_line(sections: Vec<String>, focus_line: f64) -> Self {
        let active = sections
            .first()
            .cloned()
            .unwrap_or_else(|| "home".to_string());
        Self {
            sections,
            focus_line,
            active,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Re-evaluates the active section. `rect_of` returns `None` for sections
    /// that are not in the document. Returns the new id when it changed.
    pub fn update<F>(&mut self, mut rect_of: F) -> Option<&str>
    where
        F: FnMut(&str) -> Option<SectionRect>,
    {
        let line = self.focus_line;
        let found = self
            .sections
            .iter()
            .find(|id| rect_of(id.as_str()).is_some_and(|r| r.spans(line)))?;
        if *found == self.active {
            return None;
        }
        self.active = found.clone();
        Some(&self.active)
    }
}
