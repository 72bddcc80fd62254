/// Number of timer units a player gets to make a move.
pub const TURN_TIME_LIMIT: u32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(u32),
    Expired,
}

/// Countdown for the active turn.
///
/// The timer never schedules anything itself: whatever drives the game (an
/// event-loop interval in production, a test calling it directly) invokes
/// `tick` once per timer unit and reacts to the returned event. Expiry
/// disarms the timer, so it can fire at most once per arm.
#[derive(Clone, Debug, Default)]
pub struct TurnTimer {
    remaining: u32,
    armed: bool,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh countdown for the next turn.
    pub fn arm(&mut self) {
        self.remaining = TURN_TIME_LIMIT;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance the countdown by one unit.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.armed {
            return None;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.armed = false;
            Some(TimerEvent::Expired)
        } else {
            Some(TimerEvent::Tick(self.remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_timer_ignores_ticks() {
        let mut timer = TurnTimer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_countdown_sequence() {
        let mut timer = TurnTimer::new();
        timer.arm();
        assert_eq!(timer.remaining(), TURN_TIME_LIMIT);
        assert_eq!(timer.tick(), Some(TimerEvent::Tick(TURN_TIME_LIMIT - 1)));
        assert_eq!(timer.tick(), Some(TimerEvent::Tick(TURN_TIME_LIMIT - 2)));
        assert_eq!(timer.remaining(), TURN_TIME_LIMIT - 2);
    }

    #[test]
    fn test_expiry_fires_exactly_once() {
        let mut timer = TurnTimer::new();
        timer.arm();
        for expected in (1..TURN_TIME_LIMIT).rev() {
            assert_eq!(timer.tick(), Some(TimerEvent::Tick(expected)));
        }
        assert_eq!(timer.tick(), Some(TimerEvent::Expired));
        assert!(!timer.is_armed());
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_cancel_stops_countdown() {
        let mut timer = TurnTimer::new();
        timer.arm();
        timer.tick();
        timer.cancel();
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_rearm_restores_full_countdown() {
        let mut timer = TurnTimer::new();
        timer.arm();
        timer.tick();
        timer.tick();
        timer.arm();
        assert_eq!(timer.remaining(), TURN_TIME_LIMIT);
        assert_eq!(timer.tick(), Some(TimerEvent::Tick(TURN_TIME_LIMIT - 1)));
    }
}
