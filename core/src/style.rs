//! Cell style bundles.
//!
//! A [`Style`] is a plain value: cloning one yields a fully independent
//! copy, so a style copied from one cell to another can be mutated
//! without touching the source. Colors are 24-bit RGB (`0xRRGGBB`).

/// Fill color used to flag cells whose source data was absent.
pub const HIGHLIGHT_FILL: u32 = 0xFFFF00;
/// Font color used to flag cells whose source data was absent.
pub const HIGHLIGHT_FONT: u32 = 0xFF0000;

/// The visual attributes of a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub bold: bool,
    pub font_color: Option<u32>,
    pub fill_color: Option<u32>,
    /// Thin border on all four edges.
    pub boxed: bool,
    pub centered: bool,
    pub num_format: Option<String>,
}

impl Style {
    /// Layer the needs-attention highlight onto this style, keeping
    /// borders, alignment, and number format intact.
    pub fn apply_highlight(&mut self) {
        self.fill_color = Some(HIGHLIGHT_FILL);
        self.font_color = Some(HIGHLIGHT_FONT);
        self.bold = true;
    }

    /// Whether this style carries the needs-attention highlight.
    pub fn is_highlighted(&self) -> bool {
        self.fill_color == Some(HIGHLIGHT_FILL) && self.font_color == Some(HIGHLIGHT_FONT)
    }
}
