//! Navigation through the scanned file list.
//!
//! Two states: empty (no files, nothing to show) and positioned on a valid
//! index. Manual navigation clamps at both ends; only the autoplay path
//! wraps from the last image back to the first — a continuous slideshow
//! versus deliberate browsing.

/// Current position within the scanned file-name list.
#[derive(Debug, Default)]
pub struct Navigation {
    files: Vec<String>,
    index: usize,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file list and reset to the first entry.
    ///
    /// Called whenever the folder or the extension set changes; never
    /// called for pure navigation, scale, flip, or rotation changes.
    pub fn rebuild(&mut self, files: Vec<String>) {
        self.files = files;
        self.index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Current index, or `None` when the list is empty.
    pub fn index(&self) -> Option<usize> {
        if self.files.is_empty() {
            None
        } else {
            Some(self.index)
        }
    }

    /// File name at the current position.
    pub fn current(&self) -> Option<&str> {
        self.files.get(self.index).map(String::as_str)
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        !self.files.is_empty() && self.index == self.files.len() - 1
    }

    /// Move by `delta`, clamped to `[0, len - 1]`. No-op when empty.
    pub fn advance(&mut self, delta: i64) {
        if self.files.is_empty() {
            return;
        }
        let last = (self.files.len() - 1) as i64;
        self.index = (self.index as i64 + delta).clamp(0, last) as usize;
    }

    /// Autoplay step: one forward, wrapping from the last index to 0.
    pub fn advance_wrapping(&mut self) {
        if self.files.is_empty() {
            return;
        }
        if self.index >= self.files.len() - 1 {
            self.index = 0;
        } else {
            self.index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(n: usize) -> Navigation {
        let mut nav = Navigation::new();
        nav.rebuild((0..n).map(|i| format!("img{i}.png")).collect());
        nav
    }

    #[test]
    fn test_empty_list_has_no_position() {
        let mut nav = Navigation::new();
        assert!(nav.is_empty());
        assert_eq!(nav.index(), None);
        assert_eq!(nav.current(), None);
        nav.advance(5);
        nav.advance_wrapping();
        assert_eq!(nav.index(), None);
    }

    #[test]
    fn test_rebuild_resets_to_first() {
        let mut nav = nav(5);
        nav.advance(3);
        nav.rebuild(vec!["only.jpg".into()]);
        assert_eq!(nav.index(), Some(0));
        assert_eq!(nav.current(), Some("only.jpg"));
    }

    #[test]
    fn test_advance_clamps_at_both_ends() {
        let mut nav = nav(4);
        nav.advance(100);
        assert_eq!(nav.index(), Some(3));
        nav.advance(-100);
        assert_eq!(nav.index(), Some(0));
        nav.advance(-1);
        assert_eq!(nav.index(), Some(0));
    }

    #[test]
    fn test_advance_zero_is_idempotent() {
        let mut nav = nav(4);
        nav.advance(2);
        nav.advance(0);
        nav.advance(0);
        assert_eq!(nav.index(), Some(2));
    }

    #[test]
    fn test_wrapping_advance_wraps_only_at_end() {
        let mut nav = nav(3);
        nav.advance_wrapping();
        assert_eq!(nav.index(), Some(1));
        nav.advance_wrapping();
        assert_eq!(nav.index(), Some(2));
        nav.advance_wrapping();
        assert_eq!(nav.index(), Some(0));
    }

    #[test]
    fn test_boundary_flags_drive_buttons() {
        let mut nav = nav(2);
        assert!(nav.at_start());
        assert!(!nav.at_end());
        nav.advance(1);
        assert!(!nav.at_start());
        assert!(nav.at_end());

        let single = self::nav(1);
        assert!(single.at_start() && single.at_end());
    }
}
