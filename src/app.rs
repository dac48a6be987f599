use crate::clock::GameClock;
use crate::config::{
    load_content, load_settings, project_paths, save_settings_atomic, Content, Paths, Settings,
};
use crate::controller;
use crate::input::{collect_input_nonblocking, UiEvent};
use crate::menu::{MenuLayout, Navigator, Rect};
use crate::model::{RngState, Subject, Tuning};
use crate::render::{draw_box, draw_text, ui_frame, Cell, Terminal};
use crossterm::style::Color;
use std::time::{Duration, Instant};

pub(crate) struct App {
    paths: Paths,
    settings: Settings,
    tuning: Tuning,
    content: Content,
    clock: GameClock,
    subject: Subject,
    nav: Navigator,
    rng: RngState,
    term: Terminal,
    current_message: String,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths()?;
        let settings = load_settings(&paths.settings_path);
        // Content problems must surface before the alternate screen opens.
        let content = load_content(&paths.content_path)?;
        let tuning = Tuning::default();

        let clock = GameClock::new(settings.acceleration);
        let subject = Subject::new(&clock);
        let rng = RngState::new(settings.seed);

        let term = Terminal::begin()?;

        Ok(Self {
            paths,
            settings,
            tuning,
            content,
            clock,
            subject,
            nav: Navigator::new(),
            rng,
            term,
            current_message: String::new(),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let sim_step = Duration::from_millis(self.tuning.tick_step_ms.max(1));

        let mut last_frame = Instant::now();
        let mut sim_accum = Duration::ZERO;

        while !self.should_quit {
            self.term.resize_if_needed()?;
            let layout = MenuLayout::new(self.term.cols, self.term.rows);

            for ev in collect_input_nonblocking(frame_dt)? {
                match ev {
                    UiEvent::Quit => self.should_quit = true,
                    UiEvent::Back => self.nav.back(),
                    UiEvent::NewGame => {
                        if !self.subject.alive {
                            self.restart();
                        }
                    }
                    UiEvent::Click(x, y) => controller::handle_click(
                        (x, y),
                        &mut self.nav,
                        &mut self.subject,
                        &self.clock,
                        &self.tuning,
                        &self.content.flavor,
                        &self.content.menus,
                        &layout,
                        &mut self.rng,
                    ),
                }
            }

            let now = Instant::now();
            sim_accum = sim_accum.saturating_add(now.saturating_duration_since(last_frame));
            last_frame = now;
            while sim_accum >= sim_step {
                self.subject
                    .tick(&self.clock, &self.tuning, &self.content.flavor, &mut self.rng);
                sim_accum = sim_accum.saturating_sub(sim_step);
            }

            // Sticky message line: keep showing the last one until the next
            // arrives.
            if let Some(msg) = self.subject.pop_message() {
                self.current_message = msg;
            }

            self.render_frame(&layout)?;
            spin_sleep(frame_dt, Instant::now());
        }

        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn restart(&mut self) {
        self.clock.reset();
        self.subject = Subject::new(&self.clock);
        self.nav.go_home();
        self.current_message.clear();
    }

    fn render_frame(&mut self, layout: &MenuLayout) -> anyhow::Result<()> {
        let status = if self.subject.should_sleep(&self.clock, &self.tuning) {
            format!(
                "Time: {}   {} {}",
                self.clock.clock_face(),
                self.settings.pet_name,
                self.content.flavor.bedtime_hint
            )
        } else {
            format!("Time: {}", self.clock.clock_face())
        };

        self.term.cur.clear(Color::Black);
        ui_frame(
            &mut self.term.cur,
            &self.settings,
            &status,
            &self.current_message,
            &self.subject.vitals,
            self.subject.sleeping,
            &self.nav,
            &self.content.menus,
            layout,
        );

        if !self.subject.alive {
            let line = format!("{} {}", self.settings.pet_name, self.content.flavor.game_over_line);
            self.draw_center_box("GAME OVER", &format!("{line}\n\nN new round | Q quit"));
        }

        self.term.present()?;
        Ok(())
    }

    fn draw_center_box(&mut self, title: &str, body: &str) {
        let (w, h) = (self.term.cols, self.term.rows);
        let bw = w.saturating_sub(4).min(64);
        let bh = h.saturating_sub(4).min(12);
        if bw < 8 || bh < 5 {
            return;
        }
        let rect = Rect {
            x: (w - bw) / 2,
            y: (h - bh) / 2,
            w: bw,
            h: bh,
        };

        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                self.term.cur.set(x, y, Cell::default());
            }
        }
        draw_box(&mut self.term.cur, rect, Color::White, Color::Black);
        draw_text(
            &mut self.term.cur,
            rect.x + 2,
            rect.y + 1,
            title,
            Color::Red,
            Color::Black,
        );
        let mut yy = rect.y + 3;
        for line in body.lines() {
            if yy >= rect.y + rect.h - 1 {
                break;
            }
            draw_text(&mut self.term.cur, rect.x + 2, yy, line, Color::White, Color::Black);
            yy += 1;
        }
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    app.run()
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
