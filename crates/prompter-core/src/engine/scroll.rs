//! Looping scroll offset
//!
//! The offset grows with time while playing and wraps back to zero once it
//! passes the measured content height. The wrap is abrupt on purpose: the
//! presentation layer stacks two copies of the text, so when the offset
//! reaches the height of one copy the second copy sits exactly where the
//! first one started and the restart is invisible. Rendering a single copy
//! breaks that illusion.

/// Scroll offset plus the content height it wraps at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollEngine {
    /// Current vertical displacement in layout points, never negative
    offset: f64,
    /// Latest measured height of one text copy; 0 means "not measured yet"
    content_height: f64,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Advance by `speed * delta_seconds` when `playing`, then wrap if needed
    pub fn tick(&mut self, delta_seconds: f64, speed: f64, playing: bool) {
        if playing && delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.offset += speed * delta_seconds;
        }
        self.wrap();
    }

    /// Record the height reported by the presentation layer
    pub fn on_content_height_measured(&mut self, height: f64) {
        self.content_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.wrap();
    }

    /// Start over from the first line
    pub fn on_text_changed(&mut self) {
        self.offset = 0.0;
    }

    /// Place the offset directly; negative values become zero
    #[cfg(test)]
    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.wrap();
    }

    fn wrap(&mut self) {
        if self.content_height > 0.0 && self.offset > self.content_height {
            self.offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_by_speed_times_delta() {
        let mut engine = ScrollEngine::new();
        engine.on_content_height_measured(1000.0);
        engine.tick(0.5, 10.0, true);
        assert_eq!(engine.offset(), 5.0);
        engine.tick(0.25, 40.0, true);
        assert_eq!(engine.offset(), 15.0);
    }

    #[test]
    fn test_tick_is_inert_when_paused() {
        let mut engine = ScrollEngine::new();
        engine.set_offset(42.0);
        for _ in 0..100 {
            engine.tick(1.0, 40.0, false);
        }
        assert_eq!(engine.offset(), 42.0);
    }

    #[test]
    fn test_unmeasured_content_never_wraps() {
        let mut engine = ScrollEngine::new();
        engine.tick(100.0, 40.0, true);
        assert_eq!(engine.offset(), 4000.0);
    }

    #[test]
    fn test_wraps_past_content_height() {
        let mut engine = ScrollEngine::new();
        engine.on_content_height_measured(100.0);
        engine.set_offset(95.0);
        engine.tick(1.0, 10.0, true);
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_offset_equal_to_height_does_not_wrap() {
        let mut engine = ScrollEngine::new();
        engine.on_content_height_measured(100.0);
        engine.set_offset(90.0);
        engine.tick(1.0, 10.0, true);
        assert_eq!(engine.offset(), 100.0);
    }

    #[test]
    fn test_shrinking_content_wraps_immediately() {
        let mut engine = ScrollEngine::new();
        engine.on_content_height_measured(500.0);
        engine.set_offset(300.0);
        engine.on_content_height_measured(200.0);
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_text_change_resets() {
        let mut engine = ScrollEngine::new();
        engine.set_offset(50.0);
        engine.on_text_changed();
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_malformed_deltas_are_ignored() {
        let mut engine = ScrollEngine::new();
        engine.tick(-1.0, 10.0, true);
        engine.tick(f64::NAN, 10.0, true);
        engine.tick(f64::INFINITY, 10.0, true);
        assert_eq!(engine.offset(), 0.0);
    }
}
