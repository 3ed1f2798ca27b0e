//! Messages processed by the reducer, and the outcome type view state
//! machines return to their caller.

use crate::error::SourceError;
use crate::identity::CallerIdentity;
use crate::input::InputEvent;
use crate::role::Role;
use crate::source::FetchRequest;

/// A discrete message for the top-level reducer.
///
/// Messages are processed strictly one at a time in arrival order: input
/// events from the terminal, and completions of asynchronous fetches executed
/// by the host runtime. `Send` so completions can cross the channel from
/// worker threads.
#[derive(Debug)]
pub enum AppMsg {
    /// A key press or terminal resize.
    Input(InputEvent),
    /// The startup role-collection load finished.
    RolesLoaded(Result<Vec<Role>, SourceError>),
    /// The startup caller-identity load finished.
    IdentityLoaded(Result<CallerIdentity, SourceError>),
    /// A full-role-detail fetch finished.
    RoleDetailLoaded {
        /// Generation the request was issued under; stale completions are
        /// discarded at apply-time.
        generation: u64,
        result: Result<Role, SourceError>,
    },
    /// A policy-document fetch finished.
    PolicyDocumentLoaded {
        /// Generation the request was issued under.
        generation: u64,
        /// Display name of the requested policy.
        name: String,
        result: Result<String, SourceError>,
    },
}

/// What a view state machine did with an input event.
#[derive(Debug)]
pub enum Outcome {
    /// The event was handled; no follow-up work.
    Consumed,
    /// The event was not handled; the caller may act on it.
    Ignored,
    /// The application should terminate.
    Quit,
    /// The event triggered an asynchronous fetch for the host to execute.
    Fetch(FetchRequest),
}
