use crate::clock::GameClock;
use crate::events::{Category, EventCatalog};
use crate::menu::{EntryAction, Hit, MenuCatalog, MenuId, MenuLayout, Navigator};
use crate::model::{RngState, Subject, Tuning};

/// Route a click through the navigator and apply whatever it resolved to.
/// Gated descents that fail their guard, and clicks on nothing, are ignored
/// without a trace.
pub(crate) fn handle_click(
    pos: (u16, u16),
    nav: &mut Navigator,
    subject: &mut Subject,
    clock: &GameClock,
    tuning: &Tuning,
    catalog: &EventCatalog,
    menus: &MenuCatalog,
    layout: &MenuLayout,
    rng: &mut RngState,
) {
    if !subject.alive {
        return;
    }
    let Some(hit) = nav.resolve_click(pos, layout, menus) else {
        return;
    };
    apply(hit, nav, subject, clock, tuning, catalog, rng);
}

/// One resolved entry, one state change. Terminal actions send navigation
/// home; gated opens check their guard first.
pub(crate) fn apply(
    hit: Hit,
    nav: &mut Navigator,
    subject: &mut Subject,
    clock: &GameClock,
    tuning: &Tuning,
    catalog: &EventCatalog,
    rng: &mut RngState,
) {
    let bonus = bonus_chance(hit.menu, tuning);
    match hit.action {
        // The navigator already descended for plain submenu entries.
        EntryAction::Open { .. } => {}
        EntryAction::OpenCare => {
            if subject.should_sleep(clock, tuning) {
                nav.descend(MenuId::SleepTime);
            } else {
                nav.descend(MenuId::Care);
            }
        }
        EntryAction::OpenPlay => {
            if !subject.sleeping {
                nav.descend(MenuId::Play);
            }
        }
        EntryAction::OpenScold => {
            if subject.recently_misbehaved(clock, tuning) {
                nav.descend(MenuId::BadDecision);
            }
        }
        EntryAction::Feed { kind } => {
            subject.feed(&kind, clock);
            maybe_bonus(bonus, subject, clock, catalog, rng);
            nav.go_home();
        }
        EntryAction::Pour { size } => {
            subject.give_drink(&size, clock);
            maybe_bonus(bonus, subject, clock, catalog, rng);
            nav.go_home();
        }
        EntryAction::Play { activity } => {
            subject.play(&activity);
            maybe_bonus(bonus, subject, clock, catalog, rng);
            nav.go_home();
        }
        EntryAction::Sleep => {
            subject.sleep(clock);
            nav.go_home();
        }
        EntryAction::Scold => {
            subject.scold();
            nav.go_home();
        }
        EntryAction::Dismiss => {
            nav.go_home();
        }
    }
}

/// Bonus-reward odds are a property of the menu the click landed in, not of
/// the individual entry.
fn bonus_chance(menu: MenuId, tuning: &Tuning) -> f32 {
    match menu {
        MenuId::Food => tuning.food_bonus_chance,
        MenuId::Whiskey => tuning.whiskey_bonus_chance,
        MenuId::Play => tuning.play_bonus_chance,
        _ => 0.0,
    }
}

fn maybe_bonus(
    chance: f32,
    subject: &mut Subject,
    clock: &GameClock,
    catalog: &EventCatalog,
    rng: &mut RngState,
) {
    if rng.roll(chance) {
        let line = catalog.pick(Category::Reward, rng).to_string();
        subject.give_reward(&line, clock);
    }
}
