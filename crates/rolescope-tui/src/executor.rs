//! Background execution of fetch requests.
//!
//! The reducer returns [`FetchRequest`] values; each one runs on its own
//! thread and reports back over the single-consumer channel the event loop
//! drains. Completions therefore arrive as discrete messages, processed one
//! at a time — workers never touch application state.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use rolescope_core::source::execute;
use rolescope_core::{AppMsg, FetchRequest, RoleSource};

/// Execute one fetch on a background thread, delivering the completion to
/// `tx`.
pub fn spawn_fetch(source: Arc<dyn RoleSource>, request: FetchRequest, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let msg = execute(source.as_ref(), request);
        // A closed receiver just means the app is shutting down.
        let _ = tx.send(msg);
    });
}
