//! Generic scrollable + filterable list view state.
//!
//! "Cursor" here is the row the keyboard is on; it is distinct from the
//! controller's playback selection, which is tracked by key.  Items keep
//! the order they were set in — this list never sorts.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub filtered_indices: Vec<usize>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub filter: String,
    filter_fn: Box<dyn Fn(&T, &str) -> bool + Send + Sync>,
}

impl<T> ScrollableList<T> {
    pub fn new(filter_fn: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            filter: String::new(),
            filter_fn: Box::new(filter_fn),
        }
    }

    /// Replace the items wholesale, keeping the current filter applied.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild_filter();
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        let old_idx = self.filtered_indices.get(self.cursor).copied();
        self.rebuild_filter();
        // Try to keep the cursor on the same item after the filter change.
        if let Some(prev) = old_idx {
            self.cursor = self
                .filtered_indices
                .iter()
                .position(|&i| i == prev)
                .unwrap_or(0);
        }
        self.scroll_offset = 0;
    }

    fn rebuild_filter(&mut self) {
        if self.filter.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
        } else {
            self.filtered_indices = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| (self.filter_fn)(item, &self.filter))
                .map(|(i, _)| i)
                .collect();
        }
        if self.cursor >= self.filtered_indices.len() {
            self.cursor = self.filtered_indices.len().saturating_sub(1);
        }
    }

    pub fn cursor_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    pub fn cursor_down(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.cursor = (self.cursor + n).min(self.filtered_indices.len() - 1);
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.filtered_indices.len().saturating_sub(1);
    }

    pub fn cursor_item(&self) -> Option<&T> {
        let idx = self.filtered_indices.get(self.cursor)?;
        self.items.get(*idx)
    }

    /// `(original_index, &item)` pairs visible in `height` rows.
    /// Call `ensure_visible` first to settle `scroll_offset`.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.filtered_indices.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.filtered_indices.len());
        self.filtered_indices[self.scroll_offset..end]
            .iter()
            .map(|&i| (i, &self.items[i]))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor.saturating_sub(height - 1);
        }
    }

    /// Move the cursor to the row under a click. Returns true if it moved
    /// onto a real row.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.filtered_indices.len() {
            self.cursor = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }
}
