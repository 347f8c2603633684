//! Store failure classification.
//!
//! The backend reports failures as opaque message text, so the outcome
//! is decided by case-insensitive substring match. The whole strategy
//! lives in this one function: if the backend ever grows structured
//! error codes, only this translation changes.

use crate::infrastructure::ports::StoreFailure;

/// Terminal classification of a rejected vote insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRejection {
    /// Caller is authenticated but the write policy said no.
    Forbidden(String),
    /// A vote for this (profile, caption) pair already exists.
    Duplicate,
    /// Anything else; the raw failure travels for diagnostics.
    Other(StoreFailure),
}

/// Classify a store failure. Policy rejection is checked before the
/// uniqueness conflict: a message naming both is a policy problem.
pub fn classify_store_failure(failure: StoreFailure) -> StoreRejection {
    let message = failure.message.to_lowercase();

    if message.contains("row-level security")
        || message.contains("violates row-level security")
        || message.contains("permission denied")
    {
        return StoreRejection::Forbidden(failure.message);
    }

    if message.contains("duplicate key") {
        return StoreRejection::Duplicate;
    }

    StoreRejection::Other(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(message: &str) -> StoreFailure {
        StoreFailure::message_only(message)
    }

    #[test]
    fn rls_violation_is_forbidden() {
        let rejection = classify_store_failure(failure(
            "new row violates row-level security policy for table \"caption_votes\"",
        ));
        assert!(matches!(rejection, StoreRejection::Forbidden(_)));
    }

    #[test]
    fn permission_denied_is_forbidden_regardless_of_case() {
        let rejection = classify_store_failure(failure("ERROR: Permission Denied for table"));
        assert!(matches!(rejection, StoreRejection::Forbidden(_)));
    }

    #[test]
    fn duplicate_key_is_a_conflict() {
        let rejection = classify_store_failure(failure(
            "duplicate key value violates unique constraint \"caption_votes_pkey\"",
        ));
        assert_eq!(rejection, StoreRejection::Duplicate);
    }

    #[test]
    fn policy_rejection_outranks_duplicate_key() {
        // Both patterns present: the policy check runs first.
        let rejection = classify_store_failure(failure(
            "permission denied; also duplicate key value violates unique constraint",
        ));
        assert!(matches!(rejection, StoreRejection::Forbidden(_)));
    }

    #[test]
    fn unknown_failures_pass_through_with_detail() {
        let original = StoreFailure {
            message: "connection reset by peer".to_string(),
            code: Some("08006".to_string()),
            details: None,
        };
        match classify_store_failure(original.clone()) {
            StoreRejection::Other(f) => assert_eq!(f, original),
            other => panic!("expected Other, got {other:?}"),
        }
    }
}
