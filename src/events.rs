use crate::model::RngState;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Category {
    Food,
    Drink,
    Mischief,
    Activity,
    Reward,
}

/// Flavor content, one list per event category plus the canned lines the
/// simulation and frontend quote verbatim. Loaded once at startup; an
/// external content file may replace the whole table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EventCatalog {
    pub(crate) food: Vec<String>,
    pub(crate) drinks: Vec<String>,
    pub(crate) mischief: Vec<String>,
    pub(crate) activities: Vec<String>,
    pub(crate) rewards: Vec<String>,
    pub(crate) wake_line: String,
    pub(crate) game_over_line: String,
    pub(crate) bedtime_hint: String,
}

impl Default for EventCatalog {
    fn default() -> Self {
        let s = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        Self {
            food: s(&["hamburger", "hot dog", "nachos"]),
            drinks: s(&["large", "extra large"]),
            mischief: s(&[
                "trading a key player",
                "drafting a worthless prospect",
                "promising a championship",
                "overpaying an old player",
            ]),
            activities: s(&[
                "prank calling another GM",
                "begging a hall-of-fame quarterback to coach",
                "asking a celebrity coach to return",
            ]),
            rewards: s(&["dancer", "glass of whiskey"]),
            wake_line: "I have soiled myself, but if you tell anyone, \
                        I'll never take us to the championship again."
                .to_string(),
            game_over_line: "has passed away. There will be no championship."
                .to_string(),
            bedtime_hint: "looks tired. Maybe it's time for bed?".to_string(),
        }
    }
}

impl EventCatalog {
    pub(crate) fn options(&self, category: Category) -> &[String] {
        match category {
            Category::Food => &self.food,
            Category::Drink => &self.drinks,
            Category::Mischief => &self.mischief,
            Category::Activity => &self.activities,
            Category::Reward => &self.rewards,
        }
    }

    /// Uniform draw from a category. Validation guarantees every category
    /// is non-empty before the simulation starts.
    pub(crate) fn pick(&self, category: Category, rng: &mut RngState) -> &str {
        let options = self.options(category);
        let i = rng.range_i64(0, options.len() as i64 - 1) as usize;
        &options[i]
    }

    pub(crate) fn validate(&self) -> Result<()> {
        const CATEGORIES: [(Category, &str); 5] = [
            (Category::Food, "food"),
            (Category::Drink, "drinks"),
            (Category::Mischief, "mischief"),
            (Category::Activity, "activities"),
            (Category::Reward, "rewards"),
        ];
        for (category, name) in CATEGORIES {
            let options = self.options(category);
            if options.is_empty() {
                bail!("flavor category '{name}' has no options");
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                bail!("flavor category '{name}' contains an empty option");
            }
        }
        if self.wake_line.trim().is_empty() || self.game_over_line.trim().is_empty() {
            bail!("wake and game-over lines must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_validates() {
        EventCatalog::default().validate().expect("defaults are valid");
    }

    #[test]
    fn pick_returns_a_listed_option() {
        let catalog = EventCatalog::default();
        let mut rng = RngState::new(3);
        for category in [
            Category::Food,
            Category::Drink,
            Category::Mischief,
            Category::Activity,
            Category::Reward,
        ] {
            for _ in 0..20 {
                let line = catalog.pick(category, &mut rng).to_string();
                assert!(catalog.options(category).contains(&line));
            }
        }
    }

    #[test]
    fn pick_is_deterministic_per_seed() {
        let catalog = EventCatalog::default();
        let mut a = RngState::new(11);
        let mut b = RngState::new(11);
        for _ in 0..20 {
            assert_eq!(
                catalog.pick(Category::Reward, &mut a),
                catalog.pick(Category::Reward, &mut b)
            );
        }
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut catalog = EventCatalog::default();
        catalog.rewards.clear();
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut catalog = EventCatalog::default();
        catalog.food.push("   ".to_string());
        assert!(catalog.validate().is_err());
    }
}
