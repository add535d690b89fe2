use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, PartialEq)]
pub(crate) enum KeyOutcome {
    Continue,
    Quit,
}

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    // An alert blocks everything until it is acknowledged.
    if app.view().alert.is_some() {
        app.controller.dismiss_alert();
        return KeyOutcome::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
        KeyCode::Esc if app.focus == Focus::Reflection => {
            app.focus = Focus::Editor;
            return KeyOutcome::Continue;
        }
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::F(5) => {
            app.controller.run();
            return KeyOutcome::Continue;
        }
        KeyCode::F(6) => {
            app.controller.help();
            return KeyOutcome::Continue;
        }
        KeyCode::F(7) => {
            if app.view().reflection_visible {
                app.on_reflection_edit();
                app.controller.reflect();
            }
            return KeyOutcome::Continue;
        }
        KeyCode::F(8) => {
            app.controller.toggle_theme();
            return KeyOutcome::Continue;
        }
        KeyCode::F(9) => {
            app.controller.show_next_note();
            return KeyOutcome::Continue;
        }
        KeyCode::F(2) => {
            app.toggle_focus();
            return KeyOutcome::Continue;
        }
        KeyCode::Char('r') if ctrl => {
            app.controller.reset_editor();
            app.editor_scroll = 0;
            app.editor_hscroll = 0;
            return KeyOutcome::Continue;
        }
        _ => {}
    }

    match app.focus {
        Focus::Editor => handle_editor_key(app, key),
        Focus::Reflection => {
            if app.reflection.input(key) {
                app.on_reflection_edit();
            }
        }
    }
    KeyOutcome::Continue
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let editor = app.controller.editor_mut();

    match key.code {
        // Tab indents instead of moving focus.
        KeyCode::Tab => editor.insert_tab(),
        KeyCode::Char('a') if ctrl => editor.select_all(),
        KeyCode::Char(c) if !ctrl && !alt => editor.insert_char(c),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(shift),
        KeyCode::Right => editor.move_right(shift),
        KeyCode::Up => editor.move_up(shift),
        KeyCode::Down => editor.move_down(shift),
        KeyCode::Home => editor.move_home(shift),
        KeyCode::End => editor.move_end(shift),
        other => debug!(key = ?other, "unhandled editor key"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tempfile::{TempDir, tempdir};

    // Nothing here dispatches a request, so the backend is never contacted.
    fn app() -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let app = App::new(
            "http://127.0.0.1:9".to_string(),
            dir.path().join("config.json"),
        )
        .unwrap();
        (dir, app)
    }

    fn press(app: &mut App, code: KeyCode) -> KeyOutcome {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn open_alert_swallows_the_next_key() {
        let (_dir, mut app) = app();
        app.controller.editor_mut().set_text("");
        assert!(app.controller.reflect().is_none());
        assert!(app.view().alert.is_some());

        assert_eq!(press(&mut app, KeyCode::Char('x')), KeyOutcome::Continue);
        assert!(app.view().alert.is_none());
        assert_eq!(app.view().editor.text(), "");

        assert!(app.controller.reflect().is_none());
        assert_eq!(press(&mut app, KeyCode::Esc), KeyOutcome::Continue);
        assert!(app.view().alert.is_none());
    }

    #[test]
    fn submit_is_ignored_while_reflection_is_hidden() {
        let (_dir, mut app) = app();
        assert!(!app.view().reflection_visible);

        assert_eq!(press(&mut app, KeyCode::F(7)), KeyOutcome::Continue);
        assert!(app.view().alert.is_none());
        assert!(!app.view().reflection_feedback_visible);
    }

    #[test]
    fn tab_indents_the_editor_and_keeps_focus() {
        let (_dir, mut app) = app();
        app.controller.editor_mut().set_text("return");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view().editor.text(), "    return");
        assert_eq!(app.view().editor.caret(), 4);
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn focus_stays_on_editor_while_reflection_is_hidden() {
        let (_dir, mut app) = app();

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn esc_leaves_reflection_before_quitting() {
        let (_dir, mut app) = app();
        app.focus = Focus::Reflection;

        assert_eq!(press(&mut app, KeyCode::Esc), KeyOutcome::Continue);
        assert_eq!(app.focus, Focus::Editor);
        assert_eq!(press(&mut app, KeyCode::Esc), KeyOutcome::Quit);
    }

    #[test]
    fn ctrl_r_restores_snippet() {
        let (_dir, mut app) = app();
        app.controller.editor_mut().set_text("x");
        app.editor_scroll = 3;
        app.editor_hscroll = 7;

        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(
            app.view().editor.text(),
            tutor_pad::editor::DEFAULT_SNIPPET
        );
        assert_eq!(app.editor_scroll, 0);
        assert_eq!(app.editor_hscroll, 0);
    }
}
