//! Input bridge
//!
//! Device event handlers stay thin: they only set a hold flag or latch a
//! one-shot activation. The host polls a [`TickInput`] at the start of
//! each tick; one-shots clear on poll, the hold flag is level-triggered.
//! The simulation never touches device APIs.

use crate::sim::TickInput;

/// Latched device intent between ticks
///
/// Writes are last-write-wins, which matches a physical button hold:
/// whatever the state is when the tick polls is what the tick sees.
#[derive(Debug, Clone, Default)]
pub struct InputBridge {
    hold: bool,
    activate: bool,
    activate_demo: bool,
    pause: bool,
}

impl InputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level state of the action control (key / pointer / touch down)
    pub fn set_hold(&mut self, active: bool) {
        self.hold = active;
    }

    /// Primary activation: start, restart, or dismiss the current fact card
    pub fn activate(&mut self) {
        self.activate = true;
    }

    /// The demo-mode activation target on the start screen
    pub fn activate_demo(&mut self) {
        self.activate_demo = true;
    }

    pub fn toggle_pause(&mut self) {
        self.pause = true;
    }

    /// Consume latched events into the next tick's input
    pub fn poll(&mut self) -> TickInput {
        let input = TickInput {
            hold: self.hold,
            activate: self.activate,
            activate_demo: self.activate_demo,
            pause: self.pause,
        };
        self.activate = false;
        self.activate_demo = false;
        self.pause = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shots_clear_on_poll() {
        let mut bridge = InputBridge::new();
        bridge.activate();
        bridge.toggle_pause();

        let first = bridge.poll();
        assert!(first.activate);
        assert!(first.pause);
        assert!(!first.activate_demo);

        let second = bridge.poll();
        assert!(!second.activate);
        assert!(!second.pause);
    }

    #[test]
    fn test_hold_is_level_triggered() {
        let mut bridge = InputBridge::new();
        bridge.set_hold(true);
        assert!(bridge.poll().hold);
        assert!(bridge.poll().hold);

        bridge.set_hold(false);
        assert!(!bridge.poll().hold);
    }

    #[test]
    fn test_last_write_wins() {
        let mut bridge = InputBridge::new();
        bridge.set_hold(true);
        bridge.set_hold(false);
        bridge.set_hold(true);
        assert!(bridge.poll().hold);
    }
}
