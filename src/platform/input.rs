//! Press recognition
//!
//! Turns raw pointer down/up timestamps into [`Gesture`]s. A press held for
//! at least the long-press threshold becomes a long-press, anything shorter is
//! a tap. Hosts poll every tick so a long-press fires while the finger is
//! still down.

use crate::sim::Gesture;

#[derive(Debug, Clone, Copy)]
struct ActivePress {
    started_ms: f64,
    long_fired: bool,
}

/// Single-pointer press tracker
#[derive(Debug, Clone)]
pub struct PressTracker {
    long_press_ms: f64,
    active: Option<ActivePress>,
}

impl PressTracker {
    pub fn new(long_press_ms: u32) -> Self {
        Self {
            long_press_ms: long_press_ms as f64,
            active: None,
        }
    }

    /// Pointer went down; a second press restarts tracking
    pub fn press(&mut self, now_ms: f64) {
        self.active = Some(ActivePress {
            started_ms: now_ms,
            long_fired: false,
        });
    }

    /// Report a long-press once the active press has been held long enough
    pub fn poll(&mut self, now_ms: f64) -> Option<Gesture> {
        let press = self.active.as_mut()?;
        if !press.long_fired && now_ms - press.started_ms >= self.long_press_ms {
            press.long_fired = true;
            return Some(Gesture::LongPress);
        }
        None
    }

    /// Pointer went up
    pub fn release(&mut self, now_ms: f64) -> Option<Gesture> {
        let press = self.active.take()?;
        if press.long_fired {
            None
        } else if now_ms - press.started_ms >= self.long_press_ms {
            Some(Gesture::LongPress)
        } else {
            Some(Gesture::Tap)
        }
    }

    /// Pointer cancelled by the platform; no gesture
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_is_tap() {
        let mut t = PressTracker::new(500);
        t.press(1000.0);
        assert_eq!(t.poll(1200.0), None);
        assert_eq!(t.release(1300.0), Some(Gesture::Tap));
        assert_eq!(t.release(1400.0), None);
    }

    #[test]
    fn test_long_press_fires_while_held() {
        let mut t = PressTracker::new(500);
        t.press(0.0);
        assert_eq!(t.poll(499.0), None);
        assert_eq!(t.poll(500.0), Some(Gesture::LongPress));
        assert_eq!(t.poll(900.0), None);
        assert_eq!(t.release(1500.0), None);
    }

    #[test]
    fn test_long_press_reported_on_release_without_poll() {
        let mut t = PressTracker::new(500);
        t.press(0.0);
        assert_eq!(t.release(800.0), Some(Gesture::LongPress));
    }

    #[test]
    fn test_release_without_press() {
        let mut t = PressTracker::new(500);
        assert_eq!(t.release(10.0), None);
        assert_eq!(t.poll(10.0), None);
    }

    #[test]
    fn test_cancel_drops_press() {
        let mut t = PressTracker::new(500);
        t.press(0.0);
        t.cancel();
        assert_eq!(t.poll(600.0), None);
        assert_eq!(t.release(700.0), None);
    }

    #[test]
    fn test_repress_restarts_timer() {
        let mut t = PressTracker::new(500);
        t.press(0.0);
        t.press(400.0);
        assert_eq!(t.poll(600.0), None);
        assert_eq!(t.release(700.0), Some(Gesture::Tap));
    }
}
