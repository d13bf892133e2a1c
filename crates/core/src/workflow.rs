//! Report status workflow.
//!
//! Reports move through a fixed linear stage sequence. A transition is
//! accepted only when the target is the immediate next stage, and reaching
//! `final_report` additionally requires at least one applied action and at
//! least one "after" photo.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One stage in the report lifecycle, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    PreReport,
    QuotationSent,
    AwaitingApproval,
    Approved,
    InService,
    FinalReport,
    Archived,
}

/// The fixed total order of stages. `Archived` is terminal.
pub const STATUS_FLOW: &[ReportStatus] = &[
    ReportStatus::Draft,
    ReportStatus::PreReport,
    ReportStatus::QuotationSent,
    ReportStatus::AwaitingApproval,
    ReportStatus::Approved,
    ReportStatus::InService,
    ReportStatus::FinalReport,
    ReportStatus::Archived,
];

impl ReportStatus {
    /// Stable wire name of this stage (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::PreReport => "pre_report",
            ReportStatus::QuotationSent => "quotation_sent",
            ReportStatus::AwaitingApproval => "awaiting_approval",
            ReportStatus::Approved => "approved",
            ReportStatus::InService => "in_service",
            ReportStatus::FinalReport => "final_report",
            ReportStatus::Archived => "archived",
        }
    }

    /// Parse a wire name. Returns `None` for anything outside the flow.
    pub fn parse(raw: &str) -> Option<ReportStatus> {
        STATUS_FLOW.iter().copied().find(|s| s.as_str() == raw)
    }

    /// Position of this stage in [`STATUS_FLOW`].
    fn index(&self) -> usize {
        STATUS_FLOW.iter().position(|s| s == self).unwrap_or(0)
    }

    /// The next stage in the flow, or `None` for the terminal stage.
    pub fn next(&self) -> Option<ReportStatus> {
        STATUS_FLOW.get(self.index() + 1).copied()
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived status metadata for display. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct StatusMeta {
    pub current_stage: ReportStatus,
    pub next_allowed: Option<ReportStatus>,
    pub timeline: &'static [ReportStatus],
}

/// Build the status metadata view for a report's current stage.
///
/// A stored status outside the known flow (e.g. from hand-edited data) is
/// treated as the first stage.
pub fn status_meta(raw_status: &str) -> StatusMeta {
    let current = ReportStatus::parse(raw_status).unwrap_or(ReportStatus::Draft);
    StatusMeta {
        current_stage: current,
        next_allowed: current.next(),
        timeline: STATUS_FLOW,
    }
}

/// Facts about a report that gate the `final_report` stage.
#[derive(Debug, Clone, Copy)]
pub struct FinalizationFacts {
    /// The report has at least one applied action (structured list or
    /// actions text block).
    pub has_actions: bool,
    /// The report has at least one "after" photo reference.
    pub has_after_photos: bool,
}

/// Validate a requested stage transition.
///
/// - The finalization precondition is checked first so its message wins
///   when both rules would reject.
/// - Only a move to the immediate next stage is accepted; staying put,
///   skipping ahead and moving backward are all rejected.
///
/// An unknown current status is treated as the first stage.
pub fn check_transition(
    current: &str,
    target: ReportStatus,
    facts: FinalizationFacts,
) -> Result<(), CoreError> {
    if target == ReportStatus::FinalReport && !(facts.has_actions && facts.has_after_photos) {
        return Err(CoreError::Validation(
            "Final report requires at least one action and one after photo".into(),
        ));
    }

    let current = ReportStatus::parse(current).unwrap_or(ReportStatus::Draft);
    if current.next() != Some(target) {
        return Err(CoreError::Validation(format!(
            "Cannot move from '{current}' to '{target}': only the next stage is allowed"
        )));
    }

    Ok(())
}

/// Audit summary recorded for an accepted transition, e.g. `draft->pre_report`.
pub fn transition_summary(old: &str, new: ReportStatus) -> String {
    format!("{old}->{new}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OK: FinalizationFacts = FinalizationFacts {
        has_actions: true,
        has_after_photos: true,
    };

    #[test]
    fn draft_to_pre_report_accepted() {
        assert!(check_transition("draft", ReportStatus::PreReport, ALL_OK).is_ok());
    }

    #[test]
    fn skipping_a_stage_rejected() {
        let err = check_transition("draft", ReportStatus::QuotationSent, ALL_OK).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn staying_put_rejected() {
        assert!(check_transition("draft", ReportStatus::Draft, ALL_OK).is_err());
    }

    #[test]
    fn moving_backward_rejected() {
        assert!(check_transition("approved", ReportStatus::QuotationSent, ALL_OK).is_err());
    }

    #[test]
    fn archived_is_terminal() {
        for target in STATUS_FLOW {
            assert!(check_transition("archived", *target, ALL_OK).is_err());
        }
    }

    #[test]
    fn unknown_status_treated_as_first_stage() {
        assert!(check_transition("bogus", ReportStatus::PreReport, ALL_OK).is_ok());
        assert!(check_transition("bogus", ReportStatus::QuotationSent, ALL_OK).is_err());
    }

    #[test]
    fn finalization_requires_actions() {
        let facts = FinalizationFacts {
            has_actions: false,
            has_after_photos: true,
        };
        assert!(check_transition("in_service", ReportStatus::FinalReport, facts).is_err());
    }

    #[test]
    fn finalization_requires_after_photos() {
        let facts = FinalizationFacts {
            has_actions: true,
            has_after_photos: false,
        };
        assert!(check_transition("in_service", ReportStatus::FinalReport, facts).is_err());
    }

    #[test]
    fn finalization_accepted_with_both() {
        assert!(check_transition("in_service", ReportStatus::FinalReport, ALL_OK).is_ok());
    }

    #[test]
    fn finalization_message_wins_over_adjacency() {
        // Both rules fail; the precondition message is the one surfaced.
        let facts = FinalizationFacts {
            has_actions: false,
            has_after_photos: false,
        };
        let err = check_transition("draft", ReportStatus::FinalReport, facts).unwrap_err();
        assert!(err.to_string().contains("after photo"));
    }

    #[test]
    fn status_meta_mid_flow() {
        let meta = status_meta("approved");
        assert_eq!(meta.current_stage, ReportStatus::Approved);
        assert_eq!(meta.next_allowed, Some(ReportStatus::InService));
        assert_eq!(meta.timeline.len(), 8);
    }

    #[test]
    fn status_meta_terminal() {
        let meta = status_meta("archived");
        assert_eq!(meta.next_allowed, None);
    }

    #[test]
    fn transition_summary_format() {
        assert_eq!(
            transition_summary("draft", ReportStatus::PreReport),
            "draft->pre_report"
        );
    }

    #[test]
    fn parse_round_trips_all_stages() {
        for stage in STATUS_FLOW {
            assert_eq!(ReportStatus::parse(stage.as_str()), Some(*stage));
        }
        assert_eq!(ReportStatus::parse("deleted"), None);
    }
}
