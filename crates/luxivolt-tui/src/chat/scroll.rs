//! Scroll position of the message list.
//!
//! Measured in lines from the bottom, so following the newest message is
//! simply offset zero.

/// Lines moved per wheel tick or arrow key.
pub const SCROLL_STEP: usize = 3;

/// Lines moved per page key.
pub const PAGE_STEP: usize = 10;

/// Scroll state with follow mode.
#[derive(Debug, Clone)]
pub struct ChatScroll {
    offset_from_bottom: usize,
    follow: bool,
    /// Message count at the last sync, to spot new messages.
    seen_messages: usize,
}

impl Default for ChatScroll {
    fn default() -> Self {
        Self {
            offset_from_bottom: 0,
            follow: true,
            seen_messages: 0,
        }
    }
}

impl ChatScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_from_bottom(&self) -> usize {
        self.offset_from_bottom
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Scroll towards older messages. Disables follow mode.
    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(amount);
    }

    /// Scroll towards newer messages. Reaching the bottom re-enables follow.
    pub fn scroll_down(&mut self, amount: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(amount);
        if self.offset_from_bottom == 0 {
            self.follow = true;
        }
    }

    /// Jump to the newest message and follow it.
    pub fn jump_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
        self.follow = true;
    }

    /// Note the current message count; any growth jumps to the bottom.
    pub fn sync(&mut self, message_count: usize) {
        if message_count > self.seen_messages {
            self.jump_to_bottom();
        }
        self.seen_messages = message_count;
    }

    /// Top line to show for `total` lines in a viewport of `height` lines.
    ///
    /// Also clamps the stored offset, so scrolling past the top does not
    /// accumulate.
    pub fn top_line(&mut self, total: usize, height: usize) -> usize {
        let max_offset = total.saturating_sub(height);
        self.offset_from_bottom = self.offset_from_bottom.min(max_offset);
        max_offset - self.offset_from_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_following_at_bottom() {
        let scroll = ChatScroll::new();
        assert!(scroll.is_following());
        assert_eq!(scroll.offset_from_bottom(), 0);
    }

    #[test]
    fn test_scroll_up_disables_follow() {
        let mut scroll = ChatScroll::new();
        scroll.scroll_up(SCROLL_STEP);
        assert!(!scroll.is_following());
        assert_eq!(scroll.offset_from_bottom(), 3);
    }

    #[test]
    fn test_scroll_back_down_re_enables_follow() {
        let mut scroll = ChatScroll::new();
        scroll.scroll_up(5);
        scroll.scroll_down(2);
        assert!(!scroll.is_following());
        scroll.scroll_down(10);
        assert!(scroll.is_following());
        assert_eq!(scroll.offset_from_bottom(), 0);
    }

    #[test]
    fn test_new_message_jumps_to_bottom() {
        let mut scroll = ChatScroll::new();
        scroll.sync(1);
        scroll.scroll_up(PAGE_STEP);

        scroll.sync(1);
        assert!(!scroll.is_following());

        scroll.sync(2);
        assert!(scroll.is_following());
        assert_eq!(scroll.offset_from_bottom(), 0);
    }

    #[test]
    fn test_top_line_clamps() {
        let mut scroll = ChatScroll::new();
        assert_eq!(scroll.top_line(30, 10), 20);

        scroll.scroll_up(5);
        assert_eq!(scroll.top_line(30, 10), 15);

        scroll.scroll_up(100);
        assert_eq!(scroll.top_line(30, 10), 0);
        assert_eq!(scroll.offset_from_bottom(), 20);
    }

    #[test]
    fn test_top_line_short_content() {
        let mut scroll = ChatScroll::new();
        scroll.scroll_up(4);
        assert_eq!(scroll.top_line(5, 10), 0);
        assert_eq!(scroll.offset_from_bottom(), 0);
    }
}
