/// Open detail pane: the fetched text plus scroll position, remembering
/// which key it belongs to so commands can default to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPane {
    pub key: String,
    pub text: String,
    scroll: u16,
}

impl DetailPane {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            scroll: 0,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self, step: u16) {
        self.scroll = self.scroll.saturating_sub(step);
    }

    /// Scrolling stops at the last line rather than running off into
    /// blank space.
    pub fn scroll_down(&mut self, step: u16) {
        let last = u16::try_from(self.text.lines().count().saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(step).min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_clamps_at_both_ends() {
        let mut pane = DetailPane::new("7", "one\ntwo\nthree");
        pane.scroll_up(5);
        assert_eq!(pane.scroll(), 0);
        pane.scroll_down(1);
        assert_eq!(pane.scroll(), 1);
        pane.scroll_down(100);
        assert_eq!(pane.scroll(), 2);
    }

    #[test]
    fn empty_text_never_scrolls() {
        let mut pane = DetailPane::new("7", "");
        pane.scroll_down(3);
        assert_eq!(pane.scroll(), 0);
    }

    #[test]
    fn very_long_text_does_not_shrink_the_scroll_range() {
        // more lines than u16 can count; the clamp must saturate, not wrap
        let mut pane = DetailPane::new("7", "x\n".repeat(70_000));
        pane.scroll_down(u16::MAX);
        assert_eq!(pane.scroll(), u16::MAX);
    }
}
