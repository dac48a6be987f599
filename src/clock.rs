use chrono::{DateTime, Duration, Local, Timelike};
use std::time::Instant;

/// A point on the accelerated in-game clock.
pub(crate) type GameInstant = DateTime<Local>;

/// Maps wall-clock elapsed time onto an accelerated game clock. With the
/// default factor of 60, one real second is one game minute, so a full day
/// plays out in 24 real minutes.
pub(crate) struct GameClock {
    origin_game: GameInstant,
    origin_real: Instant,
    acceleration: f64,
}

impl GameClock {
    pub(crate) fn new(acceleration: f64) -> Self {
        Self::anchored(Local::now(), acceleration)
    }

    /// Anchor the game clock at an arbitrary origin instant.
    pub(crate) fn anchored(origin: GameInstant, acceleration: f64) -> Self {
        Self {
            origin_game: origin,
            origin_real: Instant::now(),
            acceleration,
        }
    }

    pub(crate) fn now(&self) -> GameInstant {
        let real_secs = self.origin_real.elapsed().as_secs_f64();
        let game_ms = real_secs * self.acceleration * 1000.0;
        self.origin_game + Duration::milliseconds(game_ms as i64)
    }

    /// Game minutes elapsed since `instant`. `None` means "never happened",
    /// which reads as infinitely long ago so any threshold check passes.
    pub(crate) fn minutes_since(&self, instant: Option<GameInstant>) -> f64 {
        match instant {
            Some(t) => (self.now() - t).num_milliseconds() as f64 / 60_000.0,
            None => f64::INFINITY,
        }
    }

    pub(crate) fn hour(&self) -> u32 {
        self.now().hour()
    }

    /// 12-hour clock face, e.g. "09:41 PM".
    pub(crate) fn clock_face(&self) -> String {
        self.now().format("%I:%M %p").to_string()
    }

    /// Rebase both origins to the present. Session (re)start only.
    pub(crate) fn reset(&mut self) {
        self.origin_game = Local::now();
        self.origin_real = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> GameInstant {
        Local
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn never_happened_is_infinitely_long_ago() {
        let clock = GameClock::new(60.0);
        assert_eq!(clock.minutes_since(None), f64::INFINITY);
    }

    #[test]
    fn minutes_since_tracks_game_time() {
        let clock = GameClock::new(60.0);
        let two_hours_ago = clock.now() - Duration::minutes(120);
        let mins = clock.minutes_since(Some(two_hours_ago));
        assert!((mins - 120.0).abs() < 0.5, "got {mins}");
    }

    #[test]
    fn now_is_monotonic() {
        let clock = GameClock::new(60.0);
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn anchored_clock_reports_its_origin_hour() {
        let clock = GameClock::anchored(at(22, 0), 60.0);
        assert_eq!(clock.hour(), 22);
    }

    #[test]
    fn clock_face_is_twelve_hour() {
        let clock = GameClock::anchored(at(22, 5), 60.0);
        assert_eq!(clock.clock_face(), "10:05 PM");
    }

    #[test]
    fn reset_rebases_to_the_present() {
        let mut clock = GameClock::anchored(at(3, 0), 3600.0);
        clock.reset();
        let drift = (clock.now() - Local::now()).num_seconds().abs();
        assert!(drift < 2, "origin should be roughly now, drifted {drift}s");
    }
}
