//! Caller identity and the display-name derivation from its ARN.

/// The principal the running session is authenticated as.
///
/// Loaded once at startup and shared by reference with the list and detail
/// views. Absence (a failed lookup) only disables identity display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub user_id: String,
    pub arn: String,
    /// Human-readable name derived from the ARN.
    pub display_name: String,
}

impl CallerIdentity {
    /// Build an identity, deriving the display name from the ARN.
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        user_id: impl Into<String>,
        arn: impl Into<String>,
    ) -> Self {
        let account = account.into();
        let user_id = user_id.into();
        let arn = arn.into();
        let display_name = display_name_from_arn(&arn, &user_id);
        Self {
            account,
            user_id,
            arn,
            display_name,
        }
    }
}

/// Derive a display name from an identity ARN.
///
/// Everything after the first `/` when the ARN contains one
/// (`...:assumed-role/RoleName/Session` → `RoleName/Session`); otherwise the
/// 6th colon-delimited segment when present; otherwise the principal id.
#[must_use]
pub fn display_name_from_arn(arn: &str, user_id: &str) -> String {
    let slash_parts: Vec<&str> = arn.split('/').collect();
    if slash_parts.len() > 1 {
        return slash_parts[1..].join("/");
    }
    let colon_parts: Vec<&str> = arn.split(':').collect();
    if colon_parts.len() > 5 {
        colon_parts[5].to_string()
    } else {
        user_id.to_string()
    }
}
