use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub(crate) enum UiEvent {
    /// Left click at terminal cell coordinates.
    Click(u16, u16),
    Back,
    /// Only honored on the game-over screen.
    NewGame,
    Quit,
}

/// Drain pending terminal events without blocking the frame.
pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<UiEvent>> {
    let mut out = Vec::new();

    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(k) => {
                if k.kind != KeyEventKind::Press && k.kind != KeyEventKind::Repeat {
                    continue;
                }
                if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
                    out.push(UiEvent::Quit);
                    continue;
                }
                match k.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => out.push(UiEvent::Quit),
                    KeyCode::Char('n') | KeyCode::Char('N') => out.push(UiEvent::NewGame),
                    KeyCode::Esc => out.push(UiEvent::Back),
                    _ => {}
                }
            }
            Event::Mouse(m) => {
                if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                    out.push(UiEvent::Click(m.column, m.row));
                }
            }
            _ => {}
        }
        if out.len() >= 32 {
            break;
        }
    }
    Ok(out)
}
