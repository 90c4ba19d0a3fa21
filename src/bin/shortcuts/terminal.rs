// Shortcuts Terminal Listener
// Feeds live crossterm key events into an event bus

use std::io::{self, Write};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};

use shortcuts_core::{EventAction, EventBus, ModifierSet, RawKeyEvent, SHIFT_KEYS};

/// Host key identifier for a crossterm key code
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Esc => "Escape",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::F(n) => return Some(format!("F{}", n)),
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

/// Translate one terminal key event into the raw events a browser would emit.
///
/// Presses become a down event, followed by a press event for printable
/// characters typed without ctrl, alt or meta. Releases become an up event
/// and are only reported when the terminal supports keyboard enhancement.
pub fn translate(key: &KeyEvent) -> Vec<RawKeyEvent> {
    let Some(name) = key_name(key.code) else {
        return Vec::new();
    };

    let held = key.modifiers;
    let modifiers = ModifierSet::from_flags(
        held.contains(KeyModifiers::SHIFT)
            || key.code == KeyCode::BackTab
            || matches!(key.code, KeyCode::Char(c) if implies_shift(c)),
        held.contains(KeyModifiers::CONTROL),
        held.contains(KeyModifiers::ALT),
        held.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    );

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            let printable = matches!(key.code, KeyCode::Char(_))
                && !held.intersects(
                    KeyModifiers::CONTROL
                        | KeyModifiers::ALT
                        | KeyModifiers::SUPER
                        | KeyModifiers::META,
                );

            let mut events =
                vec![RawKeyEvent::new(EventAction::Down, name.clone()).with_modifiers(modifiers)];
            if printable {
                events.push(RawKeyEvent::new(EventAction::Press, name).with_modifiers(modifiers));
            }
            events
        }
        KeyEventKind::Release => {
            vec![RawKeyEvent::new(EventAction::Up, name).with_modifiers(modifiers)]
        }
    }
}

/// True if typing `c` on a US layout needs shift.
///
/// Terminals report SHIFT for uppercase letters at most, never for
/// shifted punctuation such as `@`.
fn implies_shift(c: char) -> bool {
    let mut buf = [0u8; 4];
    let ch: &str = c.encode_utf8(&mut buf);
    c.is_uppercase() || SHIFT_KEYS.iter().any(|&(shifted, _)| shifted == ch)
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Read keys in raw mode and dispatch them on `bus` until Ctrl+C
pub fn listen(bus: &EventBus) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    log::debug!("Keyboard enhancement: {}", enhanced);

    write!(stdout, "Listening for shortcuts. Press Ctrl+C to exit.\r\n")?;
    stdout.flush()?;

    let run_result = loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => break Err(err),
        };
        let Event::Key(key) = event else {
            continue;
        };

        if is_interrupt(&key) {
            break Ok(());
        }

        for raw in translate(&key) {
            bus.dispatch(&raw);
        }
    };

    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;

    run_result
}
