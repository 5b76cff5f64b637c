//! Package Timeline

use crate::domain::packages::records::TimelineEventRecord;

/// A package's events in display order: ascending by timestamp, ties broken
/// by insertion sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    events: Vec<TimelineEventRecord>,
}

impl Timeline {
    /// Build a timeline from events in any order.
    #[must_use]
    pub fn from_events(mut events: Vec<TimelineEventRecord>) -> Self {
        events.sort_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        Self { events }
    }

    #[must_use]
    pub fn events(&self) -> &[TimelineEventRecord] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recent event.
    #[must_use]
    pub fn latest(&self) -> Option<&TimelineEventRecord> {
        self.events.last()
    }

    /// Whether any event's status label contains `needle`, ignoring case.
    #[must_use]
    pub fn has_status_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();

        self.events
            .iter()
            .any(|event| event.status.to_lowercase().contains(&needle))
    }

    #[must_use]
    pub fn into_events(self) -> Vec<TimelineEventRecord> {
        self.events
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEventRecord;
    type IntoIter = std::slice::Iter<'a, TimelineEventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::packages::records::{PackageUuid, TimelineEventUuid};

    use super::*;

    fn event(sequence: i64, status: &str, at: &str) -> Result<TimelineEventRecord, jiff::Error> {
        Ok(TimelineEventRecord {
            uuid: TimelineEventUuid::new(),
            package_uuid: PackageUuid::new(),
            sequence,
            status: status.to_string(),
            location: String::new(),
            description: String::new(),
            occurred_at: at.parse::<Timestamp>()?,
        })
    }

    #[test]
    fn events_are_ordered_by_timestamp_then_sequence() -> TestResult {
        let timeline = Timeline::from_events(vec![
            event(3, "Delivered", "2026-03-02T10:00:00Z")?,
            event(2, "In Transit", "2026-03-01T10:00:00Z")?,
            event(1, "Package Created", "2026-03-01T10:00:00Z")?,
        ]);

        let sequences: Vec<i64> = timeline.events().iter().map(|e| e.sequence).collect();

        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(timeline.latest().map(|e| e.status.as_str()), Some("Delivered"));

        Ok(())
    }

    #[test]
    fn status_search_ignores_case_and_matches_substrings() -> TestResult {
        let timeline = Timeline::from_events(vec![
            event(1, "Package Created", "2026-03-01T10:00:00Z")?,
            event(2, "Re-Processing at hub", "2026-03-01T11:00:00Z")?,
        ]);

        assert!(timeline.has_status_containing("processing"), "substring match expected");
        assert!(timeline.has_status_containing("PROCESSING"), "needle case ignored");
        assert!(!timeline.has_status_containing("delivered"), "no delivered event");

        Ok(())
    }

    #[test]
    fn empty_timeline_has_no_latest_event() {
        let timeline = Timeline::default();

        assert!(timeline.is_empty(), "default timeline is empty");
        assert_eq!(timeline.len(), 0);
        assert!(timeline.latest().is_none(), "no latest event");
    }
}
