//! Cooperative typewriter progression over a finished output string.
//!
//! The owning view calls `tick` once per frame; dropping the value (or
//! calling `finish`) is how supersession stops the effect. No timers live
//! here.

#[derive(Debug, Clone)]
pub struct Reveal {
    text: String,
    // byte offset, always on a char boundary
    shown: usize,
}

impl Reveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown: 0,
        }
    }

    /// Advance by one character and return the visible prefix, or None once
    /// the full text is shown.
    pub fn tick(&mut self) -> Option<&str> {
        let rest = &self.text[self.shown..];
        let step = rest.chars().next()?.len_utf8();
        self.shown += step;
        Some(&self.text[..self.shown])
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.shown]
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.text.len()
    }

    /// Jump straight to the full text.
    pub fn finish(&mut self) {
        self.shown = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_char_per_tick() {
        let mut reveal = Reveal::new("abc");
        assert_eq!(reveal.tick(), Some("a"));
        assert_eq!(reveal.tick(), Some("ab"));
        assert_eq!(reveal.tick(), Some("abc"));
        assert_eq!(reveal.tick(), None);
        assert!(reveal.is_done());
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut reveal = Reveal::new("ставить");
        let mut last = String::new();
        while let Some(prefix) = reveal.tick() {
            last = prefix.to_string();
        }
        assert_eq!(last, "ставить");
    }

    #[test]
    fn finish_jumps_to_the_end() {
        let mut reveal = Reveal::new("long output");
        reveal.tick();
        reveal.finish();
        assert!(reveal.is_done());
        assert_eq!(reveal.visible(), "long output");
        assert_eq!(reveal.tick(), None);
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut reveal = Reveal::new("");
        assert!(reveal.is_done());
        assert_eq!(reveal.tick(), None);
    }
}
