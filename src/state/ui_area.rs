//! UI area positioning for mouse event handling
//!
//! Rows are absolute screen positions. Every view shares the same frame:
//!
//! ```text
//! Row 0-2:  Header bar with view tabs (3 rows with borders)
//! Row 3+:   View content
//! Bottom:   Status bar (1 row)
//! ```

/// Height of the header bar (with borders: top + content + bottom)
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiArea {
    /// Header bar itself (rows 0-2)
    Header,
    /// View content, directly below the header
    Content,
}

impl UiArea {
    /// Check if a mouse row falls inside this area of a terminal `height` rows tall
    #[inline]
    pub fn contains_row(self, mouse_row: u16, height: u16) -> bool {
        match self {
            UiArea::Header => mouse_row < HEADER_HEIGHT,
            UiArea::Content => {
                mouse_row >= HEADER_HEIGHT && mouse_row < height.saturating_sub(STATUS_BAR_HEIGHT)
            }
        }
    }
}
