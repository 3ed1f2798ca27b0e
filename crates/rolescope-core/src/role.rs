//! Role data model: identity, trust policy, and attached permissions.

use time::OffsetDateTime;
use time::macros::format_description;

/// A key/value tag attached to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Reference to a reusable, independently-addressable permission document
/// attached to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedPolicyRef {
    /// Human-readable policy name.
    pub name: String,
    /// Address used to fetch the policy document.
    pub arn: String,
}

/// An access-control role with its trust policy and attached permissions.
///
/// Immutable once loaded. The list view owns the authoritative collection;
/// the detail view shares a single entry by reference (`Rc<Role>`) and never
/// mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub name: String,
    pub arn: String,
    pub create_date: OffsetDateTime,
    /// Most recent use, when the backend has recorded one.
    pub last_used: Option<OffsetDateTime>,
    pub description: String,
    /// Upper bound on session duration, in seconds.
    pub max_session_duration: i32,
    pub path: String,
    pub role_id: String,
    pub tags: Vec<Tag>,
    /// Pretty-printed trust-policy document.
    pub trust_policy: String,
    pub managed_policies: Vec<ManagedPolicyRef>,
    /// Inline policies are addressed by name only.
    pub inline_policies: Vec<String>,
}

/// One entry of the flattened policy sequence `managed ++ inline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRef<'a> {
    Managed(&'a ManagedPolicyRef),
    Inline(&'a str),
}

impl Role {
    /// Total number of attached policies (managed + inline).
    #[must_use]
    pub fn policy_count(&self) -> usize {
        self.managed_policies.len() + self.inline_policies.len()
    }

    /// Resolve a flattened policy index.
    ///
    /// Indices `[0, managed)` map to managed policies in order; indices
    /// `[managed, managed + inline)` map to inline policies in order.
    #[must_use]
    pub fn policy_at(&self, index: usize) -> Option<PolicyRef<'_>> {
        if index < self.managed_policies.len() {
            self.managed_policies.get(index).map(PolicyRef::Managed)
        } else {
            self.inline_policies
                .get(index - self.managed_policies.len())
                .map(|name| PolicyRef::Inline(name))
        }
    }
}

/// Format a timestamp as `YYYY-MM-DD` for list columns.
#[must_use]
pub fn format_date(ts: OffsetDateTime) -> String {
    let description = format_description!("[year]-[month]-[day]");
    ts.format(&description).unwrap_or_else(|_| "-".to_string())
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` for the overview tab.
#[must_use]
pub fn format_datetime(ts: OffsetDateTime) -> String {
    let description = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    ts.format(&description).unwrap_or_else(|_| "-".to_string())
}
