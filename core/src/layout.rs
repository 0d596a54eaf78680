//! Template geometry: named anchors and the row-offset tracker.
//!
//! Anchors are zero-based row indexes into the *pristine* template
//! (template row 3 is index 2). Once rows have been inserted, a
//! pristine anchor is only meaningful after translation through the
//! [`LayoutContext`]; callers must resolve anchors freshly after every
//! structural mutation and never cache a resolved row across one.
//!
//! A style-clone source that sits *above* a planned insertion point
//! must be resolved *before* that insertion: the global offset moves
//! with the insert, but rows above the insertion point do not.

/// A named row position authored against the pristine template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor(pub u32);

/// Cumulative rows inserted so far in one composition run.
///
/// Mutated exactly once per structural insertion and monotonically
/// non-decreasing; passed explicitly so no component reads hidden
/// shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutContext {
    offset: u32,
}

impl LayoutContext {
    pub fn new() -> LayoutContext {
        LayoutContext::default()
    }

    /// Translate a pristine-template anchor to its current physical row.
    pub fn resolve(&self, anchor: Anchor) -> u32 {
        anchor.0 + self.offset
    }

    /// Record `count` freshly inserted rows.
    pub fn advance(&mut self, count: u32) {
        self.offset += count;
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Label/value column layout, constant across all template blocks:
/// columns A/C carry labels or date/name fields, columns B/D values.
pub mod columns {
    pub const LABEL: u32 = 0;
    pub const VALUE: u32 = 1;
    pub const SECOND_LABEL: u32 = 2;
    pub const SECOND_VALUE: u32 = 3;
    /// Width of the template's authored region (columns A..F).
    pub const TEMPLATE_WIDTH: u32 = 6;
}

/// Pristine-template row anchors (zero-based; the comment gives the
/// one-based row the template author sees).
pub mod anchors {
    use super::Anchor;

    /// Name / supplier line (template row 3).
    pub const IDENTITY: Anchor = Anchor(2);

    /// Personal info block (template rows 5-12).
    pub const ID_NUMBER: Anchor = Anchor(4);
    pub const BIRTH_DATE: Anchor = Anchor(6);
    pub const PHONE: Anchor = Anchor(7);
    pub const FIRST_WORK_DATE: Anchor = Anchor(8);
    pub const FIRST_IT_WORK_DATE: Anchor = Anchor(9);
    pub const HIGHEST_EDUCATION: Anchor = Anchor(10);
    pub const CONTRACT_LEVEL: Anchor = Anchor(11);

    /// Bachelor education block data rows (template rows 14-20).
    pub const BACHELOR_BLOCK: Anchor = Anchor(13);
    /// Advanced-degree block title row (template rows 22-29).
    pub const ADVANCED_BLOCK: Anchor = Anchor(21);

    /// Work history section title (template row 31), column labels
    /// (row 32), and data rows (rows 33+, two authored examples).
    pub const WORK_HEADER: Anchor = Anchor(30);
    pub const WORK_LABELS: Anchor = Anchor(31);
    pub const WORK_DATA: Anchor = Anchor(32);

    /// Project history data rows (template rows 38+, two authored
    /// examples; the section title sits at row 36, labels at row 37).
    pub const PROJECT_DATA: Anchor = Anchor(37);

    /// Skills block values (template rows 42-44, below the row-41 title).
    pub const LANGUAGES: Anchor = Anchor(41);
    pub const SKILLS: Anchor = Anchor(42);
    pub const CERTIFICATIONS: Anchor = Anchor(43);
}

/// Example rows authored in the template for each repeating section.
pub const SECTION_EXAMPLE_ROWS: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_resolve_through_offset() {
        let mut ctx = LayoutContext::new();
        assert_eq!(ctx.resolve(anchors::WORK_HEADER), 30);

        ctx.advance(9);
        assert_eq!(ctx.resolve(anchors::WORK_HEADER), 39);
        assert_eq!(ctx.resolve(anchors::PROJECT_DATA), 46);
        assert_eq!(ctx.offset(), 9);

        ctx.advance(3);
        assert_eq!(ctx.offset(), 12);
    }
}
