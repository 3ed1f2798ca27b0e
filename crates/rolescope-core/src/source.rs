//! Data source trait, reified fetch requests, and the mock implementation.
//!
//! The [`RoleSource`] trait decouples the state machine from the concrete
//! remote backend. Views never call a source directly; they return a
//! [`FetchRequest`] and the host runtime executes it out-of-band, feeding the
//! completion back in as an [`AppMsg`]. [`MockRoleSource`] provides synthetic
//! data for development (`--demo`) and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::datetime;

use crate::document::format_json;
use crate::error::SourceError;
use crate::identity::CallerIdentity;
use crate::logging::TARGET;
use crate::msg::AppMsg;
use crate::role::{ManagedPolicyRef, Role, Tag};

// ─── Data Source Trait ──────────────────────────────────────────────────────

/// Remote backend operations the dashboard depends on.
///
/// Implementations run on background threads, so they must be `Send + Sync`.
/// Each call maps to one fetch; timeouts and retries are the implementation's
/// concern.
pub trait RoleSource: Send + Sync {
    /// List the role collection (summary fields only).
    fn list_roles(&self) -> Result<Vec<Role>, SourceError>;

    /// Load full detail for one role: tags, attached and inline policy
    /// lists, trust policy.
    fn role_detail(&self, name: &str) -> Result<Role, SourceError>;

    /// Fetch a managed policy document by its address.
    fn managed_policy_document(&self, arn: &str) -> Result<String, SourceError>;

    /// Fetch an inline policy document embedded in a role.
    fn inline_policy_document(
        &self,
        role_name: &str,
        policy_name: &str,
    ) -> Result<String, SourceError>;

    /// Resolve the principal the session is authenticated as.
    fn caller_identity(&self) -> Result<CallerIdentity, SourceError>;
}

// ─── Fetch Requests ─────────────────────────────────────────────────────────

/// Which policy document to fetch: managed policies are addressed by ARN,
/// inline policies by role + policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyTarget {
    Managed { name: String, arn: String },
    Inline { role_name: String, policy_name: String },
}

impl PolicyTarget {
    /// Display name of the targeted policy.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Managed { name, .. } => name,
            Self::Inline { policy_name, .. } => policy_name,
        }
    }
}

/// An asynchronous request issued by the reducer for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Load the role collection (startup).
    RoleList,
    /// Resolve the caller identity (startup).
    CallerIdentity,
    /// Load full detail for one role.
    RoleDetail { name: String, generation: u64 },
    /// Load one policy document.
    PolicyDocument {
        target: PolicyTarget,
        generation: u64,
    },
}

static GENERATION: AtomicU64 = AtomicU64::new(1);

/// Hand out the next fetch generation.
///
/// Completions carry the generation their request was issued under; a view
/// compares it against its own current generation at apply-time and discards
/// results that arrived for a superseded request.
#[must_use]
pub fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Execute one fetch request against a source, producing the completion
/// message.
///
/// The host runtime calls this on a background thread; tests call it inline
/// for deterministic sequencing.
#[must_use]
pub fn execute(source: &dyn RoleSource, request: FetchRequest) -> AppMsg {
    match request {
        FetchRequest::RoleList => AppMsg::RolesLoaded(source.list_roles()),
        FetchRequest::CallerIdentity => AppMsg::IdentityLoaded(source.caller_identity()),
        FetchRequest::RoleDetail { name, generation } => {
            tracing::debug!(target: TARGET, role = %name, generation, "fetching role detail");
            AppMsg::RoleDetailLoaded {
                generation,
                result: source.role_detail(&name),
            }
        }
        FetchRequest::PolicyDocument { target, generation } => {
            let name = target.display_name().to_string();
            tracing::debug!(target: TARGET, policy = %name, generation, "fetching policy document");
            let result = match &target {
                PolicyTarget::Managed { arn, .. } => source.managed_policy_document(arn),
                PolicyTarget::Inline {
                    role_name,
                    policy_name,
                } => source.inline_policy_document(role_name, policy_name),
            };
            AppMsg::PolicyDocumentLoaded {
                generation,
                name,
                result,
            }
        }
    }
}

// ─── Mock Data Source ───────────────────────────────────────────────────────

/// Synthetic data source for development and testing.
///
/// `sample()` carries a small fleet of roles with trust policies, tags, and
/// both managed and inline policies, so every screen can be exercised without
/// a remote session. The failure toggles let tests drive each error path.
pub struct MockRoleSource {
    roles: Vec<Role>,
    identity: Option<CallerIdentity>,
    managed_documents: HashMap<String, String>,
    inline_documents: HashMap<(String, String), String>,
    fail_listing: bool,
    fail_detail: bool,
    fail_policies: bool,
}

impl MockRoleSource {
    /// Create a mock with sample data.
    #[must_use]
    pub fn sample() -> Self {
        let trust_policy = format_json(
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"Service":"ec2.amazonaws.com"},"Action":"sts:AssumeRole"}]}"#,
        );

        let roles = vec![
            Role {
                name: "prod-admin".to_string(),
                arn: "arn:aws:iam::123456789012:role/prod-admin".to_string(),
                create_date: datetime!(2022-03-14 09:26:53 UTC),
                last_used: Some(datetime!(2024-11-02 17:05:11 UTC)),
                description: "Production administrator".to_string(),
                max_session_duration: 3600,
                path: "/".to_string(),
                role_id: "AROAPRODADMIN0000001".to_string(),
                tags: vec![
                    Tag {
                        key: "team".to_string(),
                        value: "platform".to_string(),
                    },
                    Tag {
                        key: "env".to_string(),
                        value: "prod".to_string(),
                    },
                ],
                trust_policy: trust_policy.clone(),
                managed_policies: vec![
                    ManagedPolicyRef {
                        name: "AdministratorAccess".to_string(),
                        arn: "arn:aws:iam::aws:policy/AdministratorAccess".to_string(),
                    },
                    ManagedPolicyRef {
                        name: "SecurityAudit".to_string(),
                        arn: "arn:aws:iam::aws:policy/SecurityAudit".to_string(),
                    },
                ],
                inline_policies: vec!["deny-billing".to_string()],
            },
            Role {
                name: "dev-reader".to_string(),
                arn: "arn:aws:iam::123456789012:role/dev-reader".to_string(),
                create_date: datetime!(2023-01-20 14:11:40 UTC),
                last_used: None,
                description: "Developer read access".to_string(),
                max_session_duration: 7200,
                path: "/developers/".to_string(),
                role_id: "AROADEVREADER0000001".to_string(),
                tags: vec![Tag {
                    key: "team".to_string(),
                    value: "apps".to_string(),
                }],
                trust_policy: trust_policy.clone(),
                managed_policies: vec![ManagedPolicyRef {
                    name: "ReadOnlyAccess".to_string(),
                    arn: "arn:aws:iam::aws:policy/ReadOnlyAccess".to_string(),
                }],
                inline_policies: Vec::new(),
            },
            Role {
                name: "prod-reader".to_string(),
                arn: "arn:aws:iam::123456789012:role/prod-reader".to_string(),
                create_date: datetime!(2023-05-02 08:00:19 UTC),
                last_used: Some(datetime!(2024-10-30 06:41:00 UTC)),
                description: "Production read access".to_string(),
                max_session_duration: 3600,
                path: "/".to_string(),
                role_id: "AROAPRODREADER000001".to_string(),
                tags: Vec::new(),
                trust_policy: trust_policy.clone(),
                managed_policies: Vec::new(),
                inline_policies: vec!["read-metrics".to_string(), "read-logs".to_string()],
            },
            Role {
                name: "ci-deployer".to_string(),
                arn: "arn:aws:iam::123456789012:role/ci-deployer".to_string(),
                create_date: datetime!(2023-09-18 16:45:02 UTC),
                last_used: Some(datetime!(2024-11-01 23:59:58 UTC)),
                description: "Continuous-integration deployment".to_string(),
                max_session_duration: 1800,
                path: "/automation/".to_string(),
                role_id: "AROACIDEPLOYER000001".to_string(),
                tags: vec![Tag {
                    key: "managed-by".to_string(),
                    value: "terraform".to_string(),
                }],
                trust_policy,
                managed_policies: vec![ManagedPolicyRef {
                    name: "PowerUserAccess".to_string(),
                    arn: "arn:aws:iam::aws:policy/PowerUserAccess".to_string(),
                }],
                inline_policies: vec!["artifact-upload".to_string()],
            },
        ];

        let mut managed_documents = HashMap::new();
        managed_documents.insert(
            "arn:aws:iam::aws:policy/AdministratorAccess".to_string(),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"*","Resource":"*"}]}"#.to_string(),
        );
        managed_documents.insert(
            "arn:aws:iam::aws:policy/SecurityAudit".to_string(),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":["iam:Get*","iam:List*"],"Resource":"*"}]}"#.to_string(),
        );
        managed_documents.insert(
            "arn:aws:iam::aws:policy/ReadOnlyAccess".to_string(),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":["s3:Get*","s3:List*"],"Resource":"*"}]}"#.to_string(),
        );
        managed_documents.insert(
            "arn:aws:iam::aws:policy/PowerUserAccess".to_string(),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","NotAction":["iam:*"],"Resource":"*"}]}"#.to_string(),
        );

        let mut inline_documents = HashMap::new();
        inline_documents.insert(
            ("prod-admin".to_string(), "deny-billing".to_string()),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Deny","Action":"aws-portal:*","Resource":"*"}]}"#.to_string(),
        );
        inline_documents.insert(
            ("prod-reader".to_string(), "read-metrics".to_string()),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"cloudwatch:Get*","Resource":"*"}]}"#.to_string(),
        );
        inline_documents.insert(
            ("prod-reader".to_string(), "read-logs".to_string()),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"logs:Get*","Resource":"*"}]}"#.to_string(),
        );
        inline_documents.insert(
            ("ci-deployer".to_string(), "artifact-upload".to_string()),
            r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"s3:PutObject","Resource":"arn:aws:s3:::artifacts/*"}]}"#.to_string(),
        );

        Self {
            roles,
            identity: Some(CallerIdentity::new(
                "123456789012",
                "AIDAEXAMPLEUSER00001",
                "arn:aws:iam::123456789012:user/operator",
            )),
            managed_documents,
            inline_documents,
            fail_listing: false,
            fail_detail: false,
            fail_policies: false,
        }
    }

    /// Create an empty mock (no roles, no identity).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            roles: Vec::new(),
            identity: None,
            managed_documents: HashMap::new(),
            inline_documents: HashMap::new(),
            fail_listing: false,
            fail_detail: false,
            fail_policies: false,
        }
    }

    /// Make `list_roles` fail.
    #[must_use]
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make `role_detail` fail.
    #[must_use]
    pub fn with_failing_detail(mut self) -> Self {
        self.fail_detail = true;
        self
    }

    /// Make both policy-document lookups fail.
    #[must_use]
    pub fn with_failing_policies(mut self) -> Self {
        self.fail_policies = true;
        self
    }

    /// Drop the caller identity (resolution will fail).
    #[must_use]
    pub fn without_identity(mut self) -> Self {
        self.identity = None;
        self
    }

    /// Strip detail-only fields, as the listing endpoint does.
    fn summary(role: &Role) -> Role {
        Role {
            tags: Vec::new(),
            managed_policies: Vec::new(),
            inline_policies: Vec::new(),
            ..role.clone()
        }
    }
}

impl RoleSource for MockRoleSource {
    fn list_roles(&self) -> Result<Vec<Role>, SourceError> {
        if self.fail_listing {
            return Err(SourceError::ListRoles {
                reason: "injected listing failure".to_string(),
            });
        }
        Ok(self.roles.iter().map(Self::summary).collect())
    }

    fn role_detail(&self, name: &str) -> Result<Role, SourceError> {
        if self.fail_detail {
            return Err(SourceError::RoleDetail {
                name: name.to_string(),
                reason: "injected detail failure".to_string(),
            });
        }
        self.roles
            .iter()
            .find(|role| role.name == name)
            .cloned()
            .ok_or_else(|| SourceError::RoleDetail {
                name: name.to_string(),
                reason: "role not found".to_string(),
            })
    }

    fn managed_policy_document(&self, arn: &str) -> Result<String, SourceError> {
        if self.fail_policies {
            return Err(SourceError::PolicyDocument {
                name: arn.to_string(),
                reason: "injected policy failure".to_string(),
            });
        }
        self.managed_documents
            .get(arn)
            .cloned()
            .ok_or_else(|| SourceError::PolicyDocument {
                name: arn.to_string(),
                reason: "policy not found".to_string(),
            })
    }

    fn inline_policy_document(
        &self,
        role_name: &str,
        policy_name: &str,
    ) -> Result<String, SourceError> {
        if self.fail_policies {
            return Err(SourceError::PolicyDocument {
                name: policy_name.to_string(),
                reason: "injected policy failure".to_string(),
            });
        }
        self.inline_documents
            .get(&(role_name.to_string(), policy_name.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::PolicyDocument {
                name: policy_name.to_string(),
                reason: "policy not found".to_string(),
            })
    }

    fn caller_identity(&self) -> Result<CallerIdentity, SourceError> {
        self.identity
            .clone()
            .ok_or_else(|| SourceError::CallerIdentity {
                reason: "no identity configured".to_string(),
            })
    }
}
