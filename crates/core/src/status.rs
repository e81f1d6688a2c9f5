//! Opportunity lifecycle status and the allowed transitions between them.
//!
//! Values must match the `ck_live_opportunities_status` check constraint.
//!
//! ```text
//! draft --submit--> processing --publish--> published
//!                              \--reject--> rejected
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Draft,
    Processing,
    Published,
    Rejected,
}

impl OpportunityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OpportunityStatus::Draft => "draft",
            OpportunityStatus::Processing => "processing",
            OpportunityStatus::Published => "published",
            OpportunityStatus::Rejected => "rejected",
        }
    }

    /// Returns `true` if `self -> to` is a legal lifecycle step.
    pub fn can_transition_to(self, to: OpportunityStatus) -> bool {
        use OpportunityStatus::*;
        matches!(
            (self, to),
            (Draft, Processing) | (Processing, Published) | (Processing, Rejected)
        )
    }

    /// Only drafts may be edited by their owner.
    pub fn is_editable(self) -> bool {
        matches!(self, OpportunityStatus::Draft)
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpportunityStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OpportunityStatus::Draft),
            "processing" => Ok(OpportunityStatus::Processing),
            "published" => Ok(OpportunityStatus::Published),
            "rejected" => Ok(OpportunityStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown opportunity status '{other}'"
            ))),
        }
    }
}

/// Validate a lifecycle step, returning `InvalidTransition` if it is not allowed.
pub fn validate_transition(
    from: OpportunityStatus,
    to: OpportunityStatus,
) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

/// Admin review outcome for a submitted opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Publish,
    Reject,
}

impl ReviewDecision {
    /// The status a `processing` opportunity moves to for this decision.
    pub fn target_status(self) -> OpportunityStatus {
        match self {
            ReviewDecision::Publish => OpportunityStatus::Published,
            ReviewDecision::Reject => OpportunityStatus::Rejected,
        }
    }
}
