//! Package Status

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Status assigned to every newly created package.
pub const INITIAL_STATUS: &str = "pending";

/// Closed classification of the free-text status labels staff type in.
///
/// Labels themselves stay free text in storage; this is only a reading of
/// them for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageStatus {
    Pending,
    Created,
    Processing,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    Unrecognized,
}

const EXCEPTION_WORDS: [&str; 8] = [
    "exception",
    "failed",
    "returned",
    "held",
    "delayed",
    "lost",
    "undelivered",
    "undeliverable",
];
const TRANSIT_WORDS: [&str; 4] = ["transit", "shipping", "shipped", "delivery"];
const NEGATIONS: [&str; 3] = ["not", "never", "no"];

impl PackageStatus {
    /// Classify a free-text label by its whole words, ignoring case and
    /// punctuation.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let words: Vec<&str> = label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        if words.is_empty() {
            return Self::Unrecognized;
        }

        let has = |wanted: &str| words.iter().any(|word| *word == wanted);

        // A negated "delivered" is a failed delivery, not a delivery.
        let negated_delivery = words.windows(2).any(|pair| match pair {
            [negation, "delivered"] => NEGATIONS.iter().any(|word| word == negation),
            _ => false,
        });

        if has("delivered") && !negated_delivery {
            return Self::Delivered;
        }

        if negated_delivery || EXCEPTION_WORDS.iter().any(|&word| has(word)) {
            return Self::Exception;
        }

        if words
            .windows(3)
            .any(|phrase| phrase == ["out", "for", "delivery"])
        {
            return Self::OutForDelivery;
        }

        if TRANSIT_WORDS.iter().any(|&word| has(word)) {
            return Self::InTransit;
        }

        if has("processing") {
            return Self::Processing;
        }

        if has("created") {
            return Self::Created;
        }

        if has("pending") {
            return Self::Pending;
        }

        Self::Unrecognized
    }

    /// The reporting stage this status rolls up into.
    #[must_use]
    pub const fn stage(self) -> StatusStage {
        match self {
            Self::Pending | Self::Created | Self::Processing => StatusStage::Pending,
            Self::InTransit | Self::OutForDelivery => StatusStage::InTransit,
            Self::Delivered => StatusStage::Delivered,
            Self::Exception => StatusStage::Exception,
            Self::Unrecognized => StatusStage::Unrecognized,
        }
    }
}

impl Display for PackageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Created => "created",
            Self::Processing => "processing",
            Self::InTransit => "in transit",
            Self::OutForDelivery => "out for delivery",
            Self::Delivered => "delivered",
            Self::Exception => "exception",
            Self::Unrecognized => "unrecognized",
        })
    }
}

/// Coarse reporting bucket for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusStage {
    Pending,
    InTransit,
    Delivered,
    Exception,
    Unrecognized,
}

impl StatusStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Exception => "exception",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Package counts per [`StatusStage`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: u64,
    pub pending: u64,
    pub in_transit: u64,
    pub delivered: u64,
    pub exception: u64,
    pub unrecognized: u64,
}

impl StatusSummary {
    /// Tally stored status labels.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().fold(Self::default(), |mut summary, label| {
            summary.record(PackageStatus::from_label(label).stage());
            summary
        })
    }

    fn record(&mut self, stage: StatusStage) {
        self.total += 1;

        let bucket = match stage {
            StatusStage::Pending => &mut self.pending,
            StatusStage::InTransit => &mut self.in_transit,
            StatusStage::Delivered => &mut self.delivered,
            StatusStage::Exception => &mut self.exception,
            StatusStage::Unrecognized => &mut self.unrecognized,
        };

        *bucket += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_classified_case_insensitively() {
        let cases = [
            ("pending", PackageStatus::Pending),
            ("Package Created", PackageStatus::Created),
            ("PROCESSING", PackageStatus::Processing),
            ("In Transit", PackageStatus::InTransit),
            ("Shipped", PackageStatus::InTransit),
            ("shipping to hub", PackageStatus::InTransit),
            ("Out for Delivery", PackageStatus::OutForDelivery),
            ("Delivered", PackageStatus::Delivered),
            ("Delivery failed", PackageStatus::Exception),
            ("Held at customs", PackageStatus::Exception),
            ("  returned to sender ", PackageStatus::Exception),
            ("awaiting pickup", PackageStatus::Unrecognized),
            ("   ", PackageStatus::Unrecognized),
        ];

        for (label, expected) in cases {
            assert_eq!(
                PackageStatus::from_label(label),
                expected,
                "unexpected classification for {label:?}"
            );
        }
    }

    #[test]
    fn delivered_wins_over_other_words() {
        assert_eq!(
            PackageStatus::from_label("Delivered after transit delay"),
            PackageStatus::Delivered
        );
    }

    #[test]
    fn negated_deliveries_are_exceptions() {
        for label in [
            "Undelivered",
            "Not delivered",
            "NOT DELIVERED - recipient absent",
            "never delivered",
            "Address undeliverable",
        ] {
            assert_eq!(
                PackageStatus::from_label(label),
                PackageStatus::Exception,
                "unexpected classification for {label:?}"
            );
        }
    }

    #[test]
    fn words_are_matched_whole() {
        let cases = [
            ("in-transit", PackageStatus::InTransit),
            ("Created, awaiting pickup", PackageStatus::Created),
            ("reprocessing", PackageStatus::Unrecognized),
            ("withheld", PackageStatus::Unrecognized),
        ];

        for (label, expected) in cases {
            assert_eq!(
                PackageStatus::from_label(label),
                expected,
                "unexpected classification for {label:?}"
            );
        }
    }

    #[test]
    fn stages_group_early_statuses_as_pending() {
        for status in [
            PackageStatus::Pending,
            PackageStatus::Created,
            PackageStatus::Processing,
        ] {
            assert_eq!(status.stage(), StatusStage::Pending, "{status} should be pending");
        }

        assert_eq!(PackageStatus::OutForDelivery.stage(), StatusStage::InTransit);
    }

    #[test]
    fn summary_counts_each_label_once() {
        let summary = StatusSummary::from_labels([
            "pending",
            "processing",
            "in transit",
            "delivered",
            "Delivered",
            "lost",
            "mystery",
        ]);

        assert_eq!(
            summary,
            StatusSummary {
                total: 7,
                pending: 2,
                in_transit: 1,
                delivered: 2,
                exception: 1,
                unrecognized: 1,
            }
        );
    }

    #[test]
    fn empty_summary_is_all_zero() {
        assert_eq!(StatusSummary::from_labels([]), StatusSummary::default());
    }
}
