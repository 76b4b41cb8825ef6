/// Outcome of a permission query or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// Not yet decided; the user must be prompted
    Prompt,
}

/// Host-side gate in front of camera access.
///
/// The controller checks `query_state` before every session open and falls
/// back to `request`, which suspends across the platform's permission
/// dialog. Denials are reported to the caller, never retried internally.
#[async_trait::async_trait]
pub trait PermissionGate: Send + Sync {
    /// Current permission state, without prompting the user.
    fn query_state(&self) -> PermissionState;

    /// Prompt the user; resolves once they answer.
    async fn request(&self) -> PermissionState;
}
