use crate::config::Settings;
use crate::menu::{MenuCatalog, MenuLayout, Navigator, Rect};
use crate::model::Vitals;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
        }
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        std::mem::swap(&mut self.prev, &mut self.cur);
        Ok(())
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, text: &str, fg: Color, bg: Color) {
    for (i, ch) in text.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

pub(crate) fn draw_box(buf: &mut CellBuffer, rect: Rect, fg: Color, bg: Color) {
    if rect.w < 2 || rect.h < 2 {
        return;
    }
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w - 1, rect.y + rect.h - 1);
    for x in x0..=x1 {
        buf.set(x, y0, Cell { ch: '─', fg, bg });
        buf.set(x, y1, Cell { ch: '─', fg, bg });
    }
    for y in y0..=y1 {
        buf.set(x0, y, Cell { ch: '│', fg, bg });
        buf.set(x1, y, Cell { ch: '│', fg, bg });
    }
    buf.set(x0, y0, Cell { ch: '┌', fg, bg });
    buf.set(x1, y0, Cell { ch: '┐', fg, bg });
    buf.set(x0, y1, Cell { ch: '└', fg, bg });
    buf.set(x1, y1, Cell { ch: '┘', fg, bg });
}

/// Bar color by how healthy the value is.
pub(crate) fn vital_color(value: f32, enable_color: bool) -> Color {
    if !enable_color {
        return Color::White;
    }
    if value > 70.0 {
        Color::Green
    } else if value > 30.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub(crate) fn draw_bar(buf: &mut CellBuffer, x: u16, y: u16, width: u16, value: f32, fg: Color) {
    let bg = Color::Black;
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f32).round() as u16;
    buf.set(x, y, Cell { ch: '[', fg: Color::White, bg });
    for i in 0..width {
        let ch = if i < filled { '█' } else { '·' };
        buf.set(x + 1 + i, y, Cell { ch, fg, bg });
    }
    buf.set(x + 1 + width, y, Cell { ch: ']', fg: Color::White, bg });
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// Compose one frame of game UI: status, sticky message, vitals bars, the
/// current menu's buttons, and the back affordance when a submenu is open.
#[allow(clippy::too_many_arguments)]
pub(crate) fn ui_frame(
    buf: &mut CellBuffer,
    settings: &Settings,
    status: &str,
    message: &str,
    vitals: &Vitals,
    sleeping: bool,
    nav: &Navigator,
    menus: &MenuCatalog,
    layout: &MenuLayout,
) {
    let bg = Color::Black;
    let fg = Color::White;

    draw_text(buf, 11, 2, status, fg, bg);
    if !message.is_empty() {
        draw_text(buf, 2, 5, message, Color::Cyan, bg);
    }

    let rows = [
        ("Hunger", vitals.hunger),
        ("Thirst", vitals.thirst),
        ("Energy", vitals.energy),
        ("Happiness", vitals.happiness),
    ];
    for (i, (name, value)) in rows.iter().enumerate() {
        let y = 7 + i as u16;
        draw_text(buf, 2, y, &format!("{name:<10}{value:3.0}%"), fg, bg);
        let color = vital_color(*value, settings.enable_color);
        draw_bar(buf, 18, y, 24, *value, color);
    }

    if sleeping {
        draw_text(buf, 2, 12, "Zzz…", Color::Blue, bg);
    }

    for (slot, entry) in layout.slots.iter().zip(menus.entries(nav.current)) {
        draw_box(buf, *slot, fg, bg);
        let inner = slot.w.saturating_sub(4) as usize;
        draw_text(
            buf,
            slot.x + 2,
            slot.y + 1,
            &truncated(&entry.label, inner),
            Color::Green,
            bg,
        );
        draw_text(
            buf,
            slot.x + 2,
            slot.y + 3,
            &truncated(&entry.description, inner),
            Color::Grey,
            bg,
        );
    }

    if nav.has_back() {
        draw_box(buf, layout.back, Color::Grey, bg);
        draw_text(buf, layout.back.x + 2, layout.back.y + 1, "Back", fg, bg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut buf = CellBuffer::new(10, 4);
        buf.set(20, 20, Cell { ch: 'x', fg: Color::Red, bg: Color::Black });
        assert!(buf.cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn text_clips_at_the_right_edge() {
        let mut buf = CellBuffer::new(8, 2);
        draw_text(&mut buf, 5, 0, "hello", Color::White, Color::Black);
        let i = buf.idx(7, 0);
        assert_eq!(buf.cells[i].ch, 'l');
        assert_eq!(buf.cells[buf.idx(0, 1)].ch, ' ');
    }

    #[test]
    fn vital_colors_follow_thresholds() {
        assert_eq!(vital_color(90.0, true), Color::Green);
        assert_eq!(vital_color(50.0, true), Color::Yellow);
        assert_eq!(vital_color(10.0, true), Color::Red);
        assert_eq!(vital_color(10.0, false), Color::White);
    }

    #[test]
    fn truncation_keeps_short_labels_whole() {
        assert_eq!(truncated("Care", 10), "Care");
        assert_eq!(truncated("Extra Large Whiskey", 10), "Extra Lar…");
    }
}
