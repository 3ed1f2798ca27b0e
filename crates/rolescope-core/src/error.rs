//! Unified error type for the remote data-source seam.

/// Failure modes reported by a [`crate::RoleSource`] implementation.
///
/// Every variant carries enough context to render a useful message. Callers
/// degrade rather than abort: a failed role-collection load is the only error
/// that parks the application on a terminal error screen; detail, policy, and
/// identity failures are absorbed at the view that requested them.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The role collection could not be listed.
    #[error("failed to list roles: {reason}")]
    ListRoles {
        /// Why the listing failed.
        reason: String,
    },

    /// Full detail for a single role could not be loaded.
    #[error("failed to load role {name}: {reason}. Re-select the role to retry.")]
    RoleDetail {
        /// The role that was requested.
        name: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// A policy document could not be fetched.
    #[error("failed to load policy {name}: {reason}. Re-select the policy to retry.")]
    PolicyDocument {
        /// Name of the policy that was requested.
        name: String,
        /// Why the fetch failed.
        reason: String,
    },

    /// The caller identity could not be resolved. Non-fatal; identity
    /// display is simply disabled.
    #[error("failed to resolve caller identity: {reason}")]
    CallerIdentity {
        /// Why resolution failed.
        reason: String,
    },

    /// No remote session could be established at startup.
    #[error("no remote session available: {reason}")]
    SessionUnavailable {
        /// Why the session could not be established.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_object() {
        let err = SourceError::RoleDetail {
            name: "prod-admin".to_string(),
            reason: "role not found".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("prod-admin"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn list_failure_carries_reason() {
        let err = SourceError::ListRoles {
            reason: "access denied".to_string(),
        };
        assert!(err.to_string().contains("access denied"));
    }
}
