use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Live),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Upcoming),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Recent),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Series),
        (_, Char('5'), _) => guard.update_tab(MenuItem::News),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),
        (MenuItem::Detail, KeyCode::Esc | KeyCode::Backspace, _) => guard.close_detail(),

        // Lists and detail scrolling
        (_, Char('j') | KeyCode::Down, _) => guard.move_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.move_up(),
        (_, KeyCode::Enter, _) => request = guard.select(),

        // Reload: the open match on the detail pane, everything elsewhere
        (MenuItem::Detail, Char('r'), _) => request = guard.reload_detail(),
        (_, Char('r'), _) => request = Some(NetworkRequest::LoadDashboard),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
