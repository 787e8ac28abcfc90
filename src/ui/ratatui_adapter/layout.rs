//! Pane geometry derived from the terminal size
//!
//! Everything here is a pure function of width and height. The session
//! recomputes geometry at start and on every resize event, never otherwise.

/// Narrowest list pane before falling back to a half-width split
pub const MIN_LIST_WIDTH: u16 = 20;

/// Detail header: rule, title, up to three description lines, rule
pub const HEADER_HEIGHT: u16 = 6;

/// Footer box: borders, three metadata lines, two legend lines, query, notice
pub const FOOTER_HEIGHT: u16 = 9;

/// Height of the single-line title field
pub const TITLE_HEIGHT: u16 = 1;
/// Height of the description field
pub const DESCRIPTION_HEIGHT: u16 = 3;
/// Height of the keywords field
pub const KEYWORDS_HEIGHT: u16 = 3;
/// Editor rows not available to fields: four labels, eight border rows,
/// status line, legend and two spacer rows
pub const EDIT_OVERHEAD: u16 = 16;
/// The code field never shrinks below this
pub const MIN_CODE_HEIGHT: u16 = 3;

/// Browsing layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub list_width: u16,
    pub detail_width: u16,
    /// Rows inside the list pane's borders
    pub list_rows: u16,
    /// Rows between the detail header and the footer
    pub preview_height: u16,
}

impl Geometry {
    /// Split a `width` x `height` terminal into list and detail panes
    ///
    /// The list gets `list_percent` of the width; below [`MIN_LIST_WIDTH`]
    /// columns the screen is split in half instead.
    #[must_use]
    pub fn compute(width: u16, height: u16, list_percent: u16) -> Self {
        let percent = u32::from(list_percent.min(100));
        let mut list_width = u16::try_from(u32::from(width) * percent / 100).unwrap_or(width);
        if list_width < MIN_LIST_WIDTH {
            list_width = width / 2;
        }

        Self {
            width,
            height,
            list_width,
            detail_width: width - list_width,
            list_rows: height.saturating_sub(2),
            preview_height: height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT),
        }
    }

    /// Columns available to a code line in the detail pane
    #[must_use]
    pub const fn preview_width(&self) -> u16 {
        self.detail_width.saturating_sub(2)
    }
}

/// Editor layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditGeometry {
    pub width: u16,
    pub height: u16,
    /// Outer width of each bordered field
    pub inner_width: u16,
    pub code_height: u16,
}

impl EditGeometry {
    /// Fixed-height fields are subtracted from the terminal height and the
    /// code field takes the rest, but never less than [`MIN_CODE_HEIGHT`].
    #[must_use]
    pub fn compute(width: u16, height: u16) -> Self {
        let mut inner_width = width.saturating_sub(4);
        if inner_width < 20 {
            inner_width = width;
        }

        let fixed = TITLE_HEIGHT + DESCRIPTION_HEIGHT + KEYWORDS_HEIGHT + EDIT_OVERHEAD;
        let code_height = height.saturating_sub(fixed).max(MIN_CODE_HEIGHT);

        Self {
            width,
            height,
            inner_width,
            code_height,
        }
    }

    /// Columns inside a field's borders
    #[must_use]
    pub const fn text_width(&self) -> u16 {
        self.inner_width.saturating_sub(2)
    }

    /// Left margin that centres the fields
    #[must_use]
    pub const fn margin(&self) -> u16 {
        (self.width - self.inner_width) / 2
    }

    /// Content heights of title, description, keywords and code
    #[must_use]
    pub const fn field_heights(&self) -> [u16; 4] {
        [TITLE_HEIGHT, DESCRIPTION_HEIGHT, KEYWORDS_HEIGHT, self.code_height]
    }
}
