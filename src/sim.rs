use crate::clock::GameClock;
use crate::events::{Category, EventCatalog};
use crate::model::{RngState, Subject, Tuning};

impl Subject {
    /// One simulation step. Dead subjects are inert; everything else is
    /// anchored to game time, so the tick rate only affects smoothness.
    pub(crate) fn tick(
        &mut self,
        clock: &GameClock,
        tuning: &Tuning,
        catalog: &EventCatalog,
        rng: &mut RngState,
    ) {
        if !self.alive {
            return;
        }

        self.vitals.hunger = match self.last_fed {
            Some(_) => {
                let mins = clock.minutes_since(self.last_fed) as f32;
                (100.0 - mins / tuning.satiety_span_minutes).clamp(0.0, 100.0)
            }
            None => (self.vitals.hunger - tuning.hunger_drain).max(0.0),
        };

        self.vitals.thirst = match self.last_drink {
            Some(_) => {
                let mins = clock.minutes_since(self.last_drink) as f32;
                (100.0 - mins / tuning.satiety_span_minutes).clamp(0.0, 100.0)
            }
            None => (self.vitals.thirst - tuning.thirst_drain).max(0.0),
        };

        if !self.sleeping {
            self.vitals.energy = (self.vitals.energy - tuning.energy_drain).max(0.0);
        } else {
            self.vitals.energy = (self.vitals.energy + tuning.sleep_recovery).min(100.0);
            // Fresh duration draw every tick the threshold is checked.
            let due = rng.range_i64(tuning.sleep_min_minutes, tuning.sleep_max_minutes) as f64;
            if clock.minutes_since(self.last_sleep) >= due {
                self.wake_up(catalog);
            }
        }

        if !self.sleeping {
            self.mischief_cooldown = (self.mischief_cooldown - 1.0).max(0.0);
            let due = rng.range_i64(tuning.mischief_min_minutes, tuning.mischief_max_minutes) as f64;
            if clock.minutes_since(Some(self.mischief_anchor)) >= due
                && self.mischief_cooldown <= 0.0
            {
                let line = catalog.pick(Category::Mischief, rng).to_string();
                self.make_bad_decision(&line, clock);
                self.mischief_cooldown = tuning.mischief_cooldown_ticks;
            }

            if rng.roll(tuning.reward_chance) {
                let line = catalog.pick(Category::Reward, rng).to_string();
                self.give_reward(&line, clock);
            }
        }

        if self.vitals.hunger <= 0.0 || self.vitals.thirst <= 0.0 || self.vitals.energy <= 0.0 {
            self.alive = false;
        }
    }

    pub(crate) fn feed(&mut self, kind: &str, clock: &GameClock) {
        if !self.alive {
            return;
        }
        self.last_fed = Some(clock.now());
        self.vitals.hunger = 100.0;
        self.vitals.happiness = (self.vitals.happiness + 10.0).min(100.0);
        self.messages.push_back(format!("enjoyed {kind}"));
    }

    pub(crate) fn give_drink(&mut self, size: &str, clock: &GameClock) {
        if !self.alive {
            return;
        }
        self.last_drink = Some(clock.now());
        self.vitals.thirst = 100.0;
        self.vitals.happiness = (self.vitals.happiness + 15.0).min(100.0);
        self.messages.push_back(format!("enjoyed {size} drink"));
    }

    pub(crate) fn sleep(&mut self, clock: &GameClock) {
        if !self.alive || self.sleeping {
            return;
        }
        self.sleeping = true;
        self.last_sleep = Some(clock.now());
        self.messages.push_back("went to sleep".to_string());
    }

    pub(crate) fn wake_up(&mut self, catalog: &EventCatalog) {
        if !self.alive || !self.sleeping {
            return;
        }
        self.sleeping = false;
        self.vitals.energy = 100.0;
        self.messages.push_back(catalog.wake_line.clone());
    }

    pub(crate) fn make_bad_decision(&mut self, decision: &str, clock: &GameClock) {
        if !self.alive {
            return;
        }
        let now = clock.now();
        self.last_mischief = Some(now);
        self.mischief_anchor = now;
        self.vitals.happiness = (self.vitals.happiness - 20.0).max(0.0);
        self.messages
            .push_back(format!("made a bad decision: {decision}"));
    }

    pub(crate) fn give_reward(&mut self, reward: &str, clock: &GameClock) {
        if !self.alive {
            return;
        }
        self.last_reward = Some(clock.now());
        self.vitals.happiness = (self.vitals.happiness + 25.0).min(100.0);
        self.messages.push_back(format!("got a reward: {reward}"));
    }

    pub(crate) fn scold(&mut self) {
        if !self.alive {
            return;
        }
        self.vitals.happiness = (self.vitals.happiness - 15.0).max(0.0);
        self.messages.push_back("has been scolded".to_string());
    }

    pub(crate) fn play(&mut self, activity: &str) {
        if !self.alive {
            return;
        }
        self.vitals.happiness = (self.vitals.happiness + 20.0).min(100.0);
        self.messages.push_back(format!("had fun {activity}"));
    }

    /// Bedtime window: late evening and not already asleep.
    pub(crate) fn should_sleep(&self, clock: &GameClock, tuning: &Tuning) -> bool {
        let hour = clock.hour();
        (tuning.sleep_window_start..=tuning.sleep_window_end).contains(&hour) && !self.sleeping
    }

    /// The scold gate: a mischief event landed recently enough to call out.
    pub(crate) fn recently_misbehaved(&self, clock: &GameClock, tuning: &Tuning) -> bool {
        clock.minutes_since(self.last_mischief) < tuning.scold_window_minutes
    }

    pub(crate) fn pop_message(&mut self) -> Option<String> {
        self.messages.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::GameInstant;
    use chrono::{Duration, TimeZone};

    fn fixture() -> (GameClock, Tuning, EventCatalog, RngState) {
        let mut tuning = Tuning::default();
        // Ambient chance events off so assertions see only what they poke.
        tuning.reward_chance = 0.0;
        (
            GameClock::new(60.0),
            tuning,
            EventCatalog::default(),
            RngState::new(7),
        )
    }

    fn at(hour: u32, minute: u32) -> GameInstant {
        chrono::Local
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .single()
            .expect("valid local time")
    }

    fn vitals_in_range(s: &Subject) -> bool {
        [
            s.vitals.hunger,
            s.vitals.thirst,
            s.vitals.energy,
            s.vitals.happiness,
        ]
        .iter()
        .all(|v| (0.0..=100.0).contains(v))
    }

    #[test]
    fn feeding_fills_hunger_and_queues_one_message() {
        let (clock, _, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        subject.feed("hamburger", &clock);
        assert_eq!(subject.vitals.hunger, 100.0);
        assert_eq!(subject.vitals.happiness, 100.0); // capped
        assert_eq!(subject.messages.len(), 1);
        assert_eq!(subject.pop_message().as_deref(), Some("enjoyed hamburger"));
        assert_eq!(subject.pop_message(), None);
    }

    #[test]
    fn drink_message_names_the_size() {
        let (clock, _, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        subject.vitals.happiness = 50.0;
        subject.give_drink("extra large", &clock);
        assert_eq!(subject.vitals.thirst, 100.0);
        assert_eq!(subject.vitals.happiness, 65.0);
        assert_eq!(
            subject.pop_message().as_deref(),
            Some("enjoyed extra large drink")
        );
    }

    #[test]
    fn hunger_is_anchored_to_the_last_meal() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.last_fed = Some(clock.now() - Duration::minutes(120));
        subject.last_drink = Some(clock.now());
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert!(
            (subject.vitals.hunger - 98.0).abs() < 0.1,
            "got {}",
            subject.vitals.hunger
        );
    }

    #[test]
    fn never_fed_drains_slowly() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert!((subject.vitals.hunger - 99.95).abs() < 1e-3);
        assert!((subject.vitals.thirst - 99.95).abs() < 1e-3);
        assert!((subject.vitals.energy - 99.98).abs() < 1e-3);
        assert!(subject.alive);
    }

    #[test]
    fn sleeping_recovers_energy() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.last_fed = Some(clock.now());
        subject.last_drink = Some(clock.now());
        subject.sleep(&clock);
        subject.vitals.energy = 50.0;
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert!(subject.sleeping);
        assert!((subject.vitals.energy - 50.5).abs() < 1e-3);
    }

    #[test]
    fn sleep_is_idempotent() {
        let (clock, _, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        subject.sleep(&clock);
        let stamped = subject.last_sleep;
        subject.sleep(&clock);
        assert_eq!(subject.last_sleep, stamped);
        assert_eq!(subject.messages.len(), 1);
    }

    #[test]
    fn oversleeping_wakes_with_full_energy() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.last_fed = Some(clock.now());
        subject.last_drink = Some(clock.now());
        subject.sleeping = true;
        // Longer than any possible duration draw.
        subject.last_sleep = Some(clock.now() - Duration::minutes(600));
        subject.vitals.energy = 40.0;
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert!(!subject.sleeping);
        assert_eq!(subject.vitals.energy, 100.0);
        assert!(subject
            .messages
            .iter()
            .any(|m| m == &catalog.wake_line));
    }

    #[test]
    fn overdue_mischief_fires_and_arms_the_cooldown() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.last_fed = Some(clock.now());
        subject.last_drink = Some(clock.now());
        // Past the maximum interval draw, so the trigger is certain.
        subject.mischief_anchor = clock.now() - Duration::minutes(300);
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert_eq!(subject.vitals.happiness, 80.0);
        assert_eq!(subject.mischief_cooldown, tuning.mischief_cooldown_ticks);
        assert!(subject.last_mischief.is_some());
        assert!(subject
            .messages
            .iter()
            .any(|m| m.starts_with("made a bad decision: ")));

        // Cooldown suppresses an immediate repeat.
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert_eq!(subject.vitals.happiness, 80.0);
        assert!(subject.mischief_cooldown < tuning.mischief_cooldown_ticks);
    }

    #[test]
    fn certain_reward_chance_pays_out() {
        let (clock, mut tuning, catalog, mut rng) = fixture();
        tuning.reward_chance = 1.0;
        let mut subject = Subject::new(&clock);
        subject.last_fed = Some(clock.now());
        subject.last_drink = Some(clock.now());
        subject.vitals.happiness = 40.0;
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert_eq!(subject.vitals.happiness, 65.0);
        assert!(subject.last_reward.is_some());
        assert!(subject
            .messages
            .iter()
            .any(|m| m.starts_with("got a reward: ")));
    }

    #[test]
    fn starving_out_is_fatal_and_final() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        subject.last_drink = Some(clock.now());
        subject.vitals.hunger = 0.03; // one drain step from the floor
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert!(!subject.alive);
        assert_eq!(subject.vitals.hunger, 0.0);

        let frozen = subject.vitals;
        subject.tick(&clock, &tuning, &catalog, &mut rng);
        assert_eq!(subject.vitals, frozen);

        subject.feed("hamburger", &clock);
        subject.give_drink("large", &clock);
        subject.play("anything");
        subject.scold();
        assert_eq!(subject.vitals, frozen);
        assert!(subject.messages.is_empty());
        assert!(!subject.alive);
    }

    #[test]
    fn vitals_stay_clamped_under_arbitrary_sequences() {
        let (clock, tuning, catalog, mut rng) = fixture();
        let mut subject = Subject::new(&clock);
        for i in 0..200 {
            match i % 7 {
                0 => subject.feed("nachos", &clock),
                1 => subject.scold(),
                2 => subject.play("prank calling another GM"),
                3 => subject.make_bad_decision("trading a key player", &clock),
                4 => subject.give_reward("dancer", &clock),
                5 => subject.give_drink("large", &clock),
                _ => subject.tick(&clock, &tuning, &catalog, &mut rng),
            }
            assert!(vitals_in_range(&subject), "iteration {i}");
        }
    }

    #[test]
    fn repeated_scolding_floors_at_zero() {
        let (clock, _, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        for _ in 0..10 {
            subject.scold();
        }
        assert_eq!(subject.vitals.happiness, 0.0);
    }

    #[test]
    fn bedtime_window_is_late_evening_only() {
        let tuning = Tuning::default();
        let evening = GameClock::anchored(at(22, 0), 60.0);
        let noon = GameClock::anchored(at(12, 0), 60.0);

        let subject = Subject::new(&evening);
        assert!(subject.should_sleep(&evening, &tuning));
        assert!(!subject.should_sleep(&noon, &tuning));

        let mut asleep = Subject::new(&evening);
        asleep.sleep(&evening);
        assert!(!asleep.should_sleep(&evening, &tuning));
    }

    #[test]
    fn scold_gate_tracks_recent_mischief_only() {
        let (clock, tuning, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        assert!(!subject.recently_misbehaved(&clock, &tuning));

        subject.last_mischief = Some(clock.now() - Duration::minutes(5));
        assert!(subject.recently_misbehaved(&clock, &tuning));

        subject.last_mischief = Some(clock.now() - Duration::minutes(40));
        assert!(!subject.recently_misbehaved(&clock, &tuning));
    }

    #[test]
    fn messages_drain_in_insertion_order() {
        let (clock, _, _, _) = fixture();
        let mut subject = Subject::new(&clock);
        subject.feed("hamburger", &clock);
        subject.play("prank calling another GM");
        assert_eq!(subject.pop_message().as_deref(), Some("enjoyed hamburger"));
        assert_eq!(
            subject.pop_message().as_deref(),
            Some("had fun prank calling another GM")
        );
        assert_eq!(subject.pop_message(), None);
    }
}
