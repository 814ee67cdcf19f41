use crate::bom_structure::policies::PolicyViolation;
use crate::ports::outbound::MutationResponse;

/// Result of one edit attempt in an editor session
///
/// None of these are process errors: every variant has already been
/// reported through the notifier when it is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The backend accepted the change and the BOM was reloaded
    Applied(MutationResponse),
    /// Refused before dispatch by a lock or business rule
    Blocked(PolicyViolation),
    /// The backend answered `success: false`
    Rejected(String),
    /// The call failed (network, HTTP status, malformed answer)
    Failed(String),
    /// Another backend call is still pending
    Busy,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied(_))
    }
}
