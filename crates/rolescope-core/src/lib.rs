//! Navigation and search state machine for the rolescope role dashboard.
//!
//! This crate holds everything with real invariants: the nested view stack
//! (list → detail → policy document), the incremental filter and in-document
//! search engines, scroll-window management, and the coordination that keeps
//! the UI responsive while remote lookups are in flight. Rendering lives in
//! the `rolescope-tui` crate; the remote data backend lives behind the
//! [`RoleSource`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  rolescope-tui (frontend binary)                │
//! │  ratatui rendering, fetch executor, bootstrap   │
//! ├─────────────────────────────────────────────────┤
//! │  rolescope-core (this crate)                    │
//! │  ├─ app: top-level reducer (Loading/List/Error) │
//! │  ├─ list: role list view state machine          │
//! │  ├─ detail: role detail view state machine      │
//! │  ├─ filter / search / scroll: pure engines      │
//! │  └─ source: RoleSource trait + mock impl        │
//! ├─────────────────────────────────────────────────┤
//! │  remote backend (out of scope, behind the trait)│
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The reducer processes exactly one message at a time. Asynchronous work is
//! reified as [`FetchRequest`] values returned from [`App::handle`]; the host
//! runtime executes them out-of-band and feeds the completion back in as an
//! [`AppMsg`].

#![forbid(unsafe_code)]

pub mod app;
pub mod detail;
pub mod document;
pub mod error;
pub mod filter;
pub mod identity;
pub mod input;
pub mod list;
pub mod logging;
pub mod msg;
pub mod role;
pub mod scroll;
pub mod search;
pub mod source;

/// Maximum length accepted for filter and search queries, in bytes.
///
/// Longer input is silently ignored rather than truncated mid-character.
pub const MAX_QUERY_LEN: usize = 100;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use app::{App, AppState};
pub use detail::{DetailState, DetailView, DocumentView, Tab};
pub use error::SourceError;
pub use identity::CallerIdentity;
pub use input::{InputEvent, KeyAction, Keymap};
pub use list::{ListState, ListView};
pub use msg::{AppMsg, Outcome};
pub use role::{ManagedPolicyRef, PolicyRef, Role, Tag};
pub use search::SearchMatch;
pub use source::{FetchRequest, MockRoleSource, PolicyTarget, RoleSource};
