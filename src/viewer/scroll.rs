//! Scroll position bookkeeping for the report viewer.

/// Scroll offset over a fixed number of lines in a viewport.
///
/// The offset always stays within `[0, max(0, total_lines - viewport_height)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    total_lines: usize,
    viewport_height: usize,
}

impl ScrollState {
    pub fn new(total_lines: usize, viewport_height: usize) -> Self {
        Self {
            offset: 0,
            total_lines,
            viewport_height,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    /// Update the viewport (e.g. after a resize) and re-clamp the offset
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.scroll_to(self.offset);
    }

    /// Jump to an absolute offset, clamped
    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn line_up(&mut self) {
        self.scroll_to(self.offset.saturating_sub(1));
    }

    pub fn line_down(&mut self) {
        self.scroll_to(self.offset.saturating_add(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_to(self.offset.saturating_sub(self.page_size()));
    }

    pub fn page_down(&mut self) {
        self.scroll_to(self.offset.saturating_add(self.page_size()));
    }

    pub fn top(&mut self) {
        self.offset = 0;
    }

    pub fn bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Index range of the lines currently visible
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.viewport_height).min(self.total_lines);
        self.offset..end
    }

    fn page_size(&self) -> usize {
        self.viewport_height.max(1)
    }
}
