//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state. Handlers only edit local form values or submit
//! commands to the wizard task.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveView, App, InputMode};
use super::event::Event;
use super::form::Item;
use super::widgets::Notification;
use crate::services::WizardCommand;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Key(_) | Event::Resize(_, _) => Ok(()),
        Event::Tick => {
            app.on_tick(Instant::now());
            Ok(())
        }
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return Ok(());
        }
        KeyCode::Tab => {
            app.switch_view(app.active_view.next());
            return Ok(());
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.switch_view(ActiveView::ALL[index]);
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Explorer => handle_explorer_key(app, key),
        view => handle_form_key(app, view, key),
    }
}

/// Handle keys on the pages with forms
fn handle_form_key(app: &mut App, view: ActiveView, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Enter | KeyCode::Char('e') => match app.selected_item() {
            Some(Item::Field(field)) => app.begin_edit(field),
            Some(Item::Action(action)) if key.code == KeyCode::Enter => {
                if app.is_busy() {
                    app.notice = Some(Notification::info("A transaction is already in progress"));
                    return Ok(());
                }
                app.trigger(action);
            }
            _ => {}
        },

        KeyCode::Char('h') | KeyCode::Left if view == ActiveView::Wizard => app.step_back(),
        KeyCode::Char('l') | KeyCode::Right if view == ActiveView::Wizard => app.step_forward(),

        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('i') => app.submit(WizardCommand::FetchContractInfo),
        KeyCode::Char('X') if view == ActiveView::Wizard => {
            app.submit(WizardCommand::Reset);
            app.values = Default::default();
            app.selected_index = 0;
        }

        _ => {}
    }

    Ok(())
}

/// Handle keys in the block explorer
fn handle_explorer_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let page = app.explorer_state.page;
    match key.code {
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('n') => app.load_blocks(page + 1),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('p') if page > 0 => {
            app.load_blocks(page - 1)
        }
        KeyCode::Char('r') => app.load_blocks(page),
        KeyCode::Home | KeyCode::Char('g') => app.load_blocks(0),
        _ => {}
    }
    Ok(())
}

/// Handle keys while editing a field
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Tab => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.editor.clear(),
        KeyCode::Char(c) => app.editor.insert(c),
        KeyCode::Backspace => app.editor.backspace(),
        KeyCode::Delete => app.editor.delete(),
        KeyCode::Left => app.editor.move_left(),
        KeyCode::Right => app.editor.move_right(),
        KeyCode::Home => app.editor.move_start(),
        KeyCode::End => app.editor.move_end(),
        _ => {}
    }
    Ok(())
}
