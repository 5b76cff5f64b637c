//! Status transitions
//!
//! Every status update is classified before it is written: the requested
//! label is canonicalised, and the update is checked for being the package's
//! first ever move into processing. That flag decides which emails go out.

use crate::domain::packages::{errors::ValidationError, timeline::Timeline};

const PROCESSING: &str = "processing";

/// Which notification set a status update triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationClass {
    /// First move into processing: sender confirmation plus receiver notice.
    FirstProcessing,
    /// Anything else: receiver status update only.
    RoutineUpdate,
}

impl NotificationClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstProcessing => "first_processing",
            Self::RoutineUpdate => "routine_update",
        }
    }
}

/// Outcome of evaluating a requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Lower-cased label stored as the package's current status.
    pub canonical_status: String,
    pub first_processing: bool,
    pub class: NotificationClass,
}

/// Evaluate a requested status label against the package's current status
/// and full history.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyStatus`] when the label is empty or only
/// whitespace.
pub fn evaluate(
    current_status: &str,
    history: &Timeline,
    requested: &str,
) -> Result<Transition, ValidationError> {
    let canonical_status = canonicalise(requested)?;

    let first_processing = canonical_status == PROCESSING
        && current_status.to_lowercase() != PROCESSING
        && !history.has_status_containing(PROCESSING);

    let class = if first_processing {
        NotificationClass::FirstProcessing
    } else {
        NotificationClass::RoutineUpdate
    };

    Ok(Transition {
        canonical_status,
        first_processing,
        class,
    })
}

/// Lower-case a requested label, rejecting blank ones.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyStatus`] when the label is blank.
pub fn canonicalise(requested: &str) -> Result<String, ValidationError> {
    if requested.trim().is_empty() {
        return Err(ValidationError::EmptyStatus);
    }

    Ok(requested.to_lowercase())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::packages::records::{PackageUuid, TimelineEventRecord, TimelineEventUuid};

    use super::*;

    fn history(statuses: &[&str]) -> Timeline {
        let package_uuid = PackageUuid::new();

        Timeline::from_events(
            statuses
                .iter()
                .zip(1_i64..)
                .map(|(status, sequence)| TimelineEventRecord {
                    uuid: TimelineEventUuid::new(),
                    package_uuid,
                    sequence,
                    status: (*status).to_string(),
                    location: String::new(),
                    description: String::new(),
                    occurred_at: Timestamp::UNIX_EPOCH,
                })
                .collect(),
        )
    }

    #[test]
    fn first_move_into_processing_is_flagged() -> TestResult {
        let transition = evaluate("pending", &history(&["Package Created"]), "Processing")?;

        assert_eq!(transition.canonical_status, "processing");
        assert!(transition.first_processing, "first processing expected");
        assert_eq!(transition.class, NotificationClass::FirstProcessing);

        Ok(())
    }

    #[test]
    fn upper_case_label_behaves_like_lower_case() -> TestResult {
        let transition = evaluate("pending", &history(&["Package Created"]), "PROCESSING")?;

        assert_eq!(transition.canonical_status, "processing");
        assert_eq!(transition.class, NotificationClass::FirstProcessing);

        Ok(())
    }

    #[test]
    fn returning_to_processing_is_routine() -> TestResult {
        let events = history(&["Package Created", "Processing", "In Transit"]);

        let transition = evaluate("in transit", &events, "processing")?;

        assert!(!transition.first_processing, "processing already in history");
        assert_eq!(transition.class, NotificationClass::RoutineUpdate);

        Ok(())
    }

    #[test]
    fn repeating_processing_is_routine() -> TestResult {
        let transition = evaluate("Processing", &history(&["Package Created"]), "processing")?;

        assert_eq!(transition.class, NotificationClass::RoutineUpdate);

        Ok(())
    }

    #[test]
    fn any_history_label_containing_processing_counts() -> TestResult {
        let events = history(&["Package Created", "Pre-processing check"]);

        let transition = evaluate("pending", &events, "processing")?;

        assert_eq!(transition.class, NotificationClass::RoutineUpdate);

        Ok(())
    }

    #[test]
    fn labels_merely_containing_processing_are_routine() -> TestResult {
        let transition = evaluate("pending", &history(&[]), "processing delayed")?;

        assert_eq!(transition.canonical_status, "processing delayed");
        assert_eq!(transition.class, NotificationClass::RoutineUpdate);

        Ok(())
    }

    #[test]
    fn other_statuses_are_routine_and_lower_cased() -> TestResult {
        let transition = evaluate("processing", &history(&["Processing"]), "Out For Delivery")?;

        assert_eq!(transition.canonical_status, "out for delivery");
        assert!(!transition.first_processing, "not a processing update");
        assert_eq!(transition.class, NotificationClass::RoutineUpdate);

        Ok(())
    }

    #[test]
    fn blank_labels_are_rejected() {
        for requested in ["", "   ", "\t\n"] {
            assert_eq!(
                evaluate("pending", &history(&[]), requested),
                Err(ValidationError::EmptyStatus),
                "expected {requested:?} to be rejected"
            );
        }
    }
}
