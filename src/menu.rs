use crate::events::EventCatalog;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) const MAX_ENTRIES: usize = 3;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MenuId {
    Main,
    Care,
    Food,
    Whiskey,
    Play,
    SleepTime,
    BadDecision,
}

impl MenuId {
    pub(crate) const ALL: [MenuId; 7] = [
        MenuId::Main,
        MenuId::Care,
        MenuId::Food,
        MenuId::Whiskey,
        MenuId::Play,
        MenuId::SleepTime,
        MenuId::BadDecision,
    ];
}

/// What clicking an entry means. Plain `Open` descents are resolved by the
/// navigator itself; the gated opens and all terminal actions are the
/// controller's business.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum EntryAction {
    Open { target: MenuId },
    OpenCare,
    OpenPlay,
    OpenScold,
    Feed { kind: String },
    Pour { size: String },
    Play { activity: String },
    Sleep,
    Scold,
    Dismiss,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct MenuEntry {
    pub(crate) label: String,
    pub(crate) description: String,
    pub(crate) action: EntryAction,
}

fn entry(label: &str, description: &str, action: EntryAction) -> MenuEntry {
    MenuEntry {
        label: label.to_string(),
        description: description.to_string(),
        action,
    }
}

/// Static menu structure: every menu shows at most three buttons, each with
/// a one-line description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct MenuCatalog {
    pub(crate) menus: BTreeMap<MenuId, Vec<MenuEntry>>,
}

impl Default for MenuCatalog {
    fn default() -> Self {
        let mut menus = BTreeMap::new();
        menus.insert(
            MenuId::Main,
            vec![
                entry("Care", "Take care of his needs", EntryAction::OpenCare),
                entry("Play", "Play together", EntryAction::OpenPlay),
                entry(
                    "Scold",
                    "Scold him for bad decisions",
                    EntryAction::OpenScold,
                ),
            ],
        );
        menus.insert(
            MenuId::Care,
            vec![
                entry(
                    "Food",
                    "Feed him when he's hungry",
                    EntryAction::Open {
                        target: MenuId::Food,
                    },
                ),
                entry(
                    "Whiskey",
                    "Pour a drink when he's thirsty",
                    EntryAction::Open {
                        target: MenuId::Whiskey,
                    },
                ),
                entry("Sleep", "Put him to bed (9PM-11PM)", EntryAction::Sleep),
            ],
        );
        menus.insert(
            MenuId::Food,
            vec![
                entry(
                    "Hamburger",
                    "Serve a hamburger",
                    EntryAction::Feed {
                        kind: "hamburger".to_string(),
                    },
                ),
                entry(
                    "Hot Dog",
                    "Serve a hot dog",
                    EntryAction::Feed {
                        kind: "hot dog".to_string(),
                    },
                ),
                entry(
                    "Nachos",
                    "Serve some nachos",
                    EntryAction::Feed {
                        kind: "nachos".to_string(),
                    },
                ),
            ],
        );
        menus.insert(
            MenuId::Whiskey,
            vec![
                entry(
                    "Large Whiskey",
                    "Pour a large whiskey",
                    EntryAction::Pour {
                        size: "large".to_string(),
                    },
                ),
                entry(
                    "Extra Large Whiskey",
                    "Pour an extra large whiskey",
                    EntryAction::Pour {
                        size: "extra large".to_string(),
                    },
                ),
            ],
        );
        menus.insert(
            MenuId::Play,
            vec![
                entry(
                    "Prank GM Call",
                    "Prank call another GM",
                    EntryAction::Play {
                        activity: "prank calling another GM".to_string(),
                    },
                ),
                entry(
                    "Beg A Legend",
                    "Beg a hall-of-fame quarterback to coach",
                    EntryAction::Play {
                        activity: "begging a hall-of-fame quarterback to coach".to_string(),
                    },
                ),
                entry(
                    "Ask The Coach",
                    "Ask a celebrity coach to return",
                    EntryAction::Play {
                        activity: "asking a celebrity coach to return".to_string(),
                    },
                ),
            ],
        );
        menus.insert(
            MenuId::SleepTime,
            vec![
                entry("Sleep Now", "Put him to bed", EntryAction::Sleep),
                entry("Stay Up", "Keep him awake a bit longer", EntryAction::Dismiss),
                entry("Cancel", "Go back to the main menu", EntryAction::Dismiss),
            ],
        );
        menus.insert(
            MenuId::BadDecision,
            vec![
                entry("Scold", "Scold him for his bad decision", EntryAction::Scold),
                entry("Ignore", "Let it slide this time", EntryAction::Dismiss),
                entry("Cancel", "Go back to the main menu", EntryAction::Dismiss),
            ],
        );
        Self { menus }
    }
}

impl MenuCatalog {
    pub(crate) fn entries(&self, id: MenuId) -> &[MenuEntry] {
        self.menus.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Startup validation. Any violation is fatal before the terminal is
    /// touched.
    pub(crate) fn validate(&self, flavor: &EventCatalog) -> Result<()> {
        for id in MenuId::ALL {
            let entries = match self.menus.get(&id) {
                Some(e) => e,
                None => bail!("menu {id:?} is missing from the catalog"),
            };
            if entries.is_empty() {
                bail!("menu {id:?} has no entries");
            }
            if entries.len() > MAX_ENTRIES {
                bail!(
                    "menu {id:?} has {} entries; at most {MAX_ENTRIES} fit on screen",
                    entries.len()
                );
            }
            for e in entries {
                if e.label.trim().is_empty() {
                    bail!("menu {id:?} has an entry with an empty label");
                }
                if e.description.trim().is_empty() {
                    bail!("menu entry '{}' has no description", e.label);
                }
                match &e.action {
                    EntryAction::Feed { kind } if !flavor.food.contains(kind) => {
                        bail!("menu entry '{}' serves unknown food '{kind}'", e.label)
                    }
                    EntryAction::Pour { size } if !flavor.drinks.contains(size) => {
                        bail!("menu entry '{}' pours unknown size '{size}'", e.label)
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) w: u16,
    pub(crate) h: u16,
}

impl Rect {
    pub(crate) fn contains(&self, px: u16, py: u16) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub(crate) fn center(&self) -> (u16, u16) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Where the clickable things live on a frame of the given size. Pure
/// geometry; the renderer draws the same rectangles the navigator hit-tests.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MenuLayout {
    pub(crate) slots: [Rect; 3],
    pub(crate) back: Rect,
}

impl MenuLayout {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let bw = (cols / 4).max(12);
        let bh = 5u16;
        let y = rows.saturating_sub(bh + 1);
        let gap = cols.saturating_sub(3 * bw) / 4;
        let slot = |i: u16| Rect {
            x: gap + i * (bw + gap),
            y,
            w: bw,
            h: bh,
        };
        Self {
            slots: [slot(0), slot(1), slot(2)],
            back: Rect {
                x: 1,
                y: 1,
                w: 8,
                h: 3,
            },
        }
    }
}

/// A resolved click: the menu the clicked entry lived in plus its action.
#[derive(Clone, Debug)]
pub(crate) struct Hit {
    pub(crate) menu: MenuId,
    pub(crate) action: EntryAction,
}

/// Stack-based menu navigation. Descending pushes the current menu; back
/// pops; popping an empty stack lands on the main menu.
pub(crate) struct Navigator {
    pub(crate) current: MenuId,
    stack: Vec<MenuId>,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        Self {
            current: MenuId::Main,
            stack: Vec::new(),
        }
    }

    pub(crate) fn has_back(&self) -> bool {
        !self.stack.is_empty()
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn descend(&mut self, target: MenuId) {
        self.stack.push(self.current);
        self.current = target;
    }

    pub(crate) fn back(&mut self) {
        self.current = self.stack.pop().unwrap_or(MenuId::Main);
    }

    pub(crate) fn go_home(&mut self) {
        self.stack.clear();
        self.current = MenuId::Main;
    }

    /// Hit-test a click: the back affordance wins when visible, then the
    /// entry slots left to right. Plain submenu entries descend here; every
    /// other hit is returned untouched for the controller. A miss changes
    /// nothing.
    pub(crate) fn resolve_click(
        &mut self,
        pos: (u16, u16),
        layout: &MenuLayout,
        menus: &MenuCatalog,
    ) -> Option<Hit> {
        let (px, py) = pos;
        if self.has_back() && layout.back.contains(px, py) {
            self.back();
            return None;
        }
        let entries = menus.entries(self.current);
        for (slot, e) in layout.slots.iter().zip(entries.iter()) {
            if slot.contains(px, py) {
                let menu = self.current;
                if let EntryAction::Open { target } = &e.action {
                    self.descend(*target);
                }
                return Some(Hit {
                    menu,
                    action: e.action.clone(),
                });
            }
        }
        None
    }
}
