//! Opportunity models and DTOs.

use chrono::NaiveDate;
use opphub_core::error::CoreError;
use opphub_core::status::OpportunityStatus;
use opphub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An opportunity as returned by list and detail reads.
///
/// Coordinates are decomposed from the `geom` point, `boundary` is GeoJSON,
/// and the lookup names are distinct and never contain nulls.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OpportunityListing {
    pub id: DbId,
    pub user_id: String,
    pub status: String,
    pub name: String,
    pub address: Option<String>,
    pub opportunity_type: Option<String>,
    pub plots: i32,
    pub planning_status: Option<String>,
    pub land_purchase_status: Option<String>,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub boundary: Option<serde_json::Value>,
    pub regions: Vec<String>,
    pub lpa_codes: Vec<String>,
    pub planning_submission_date: Option<NaiveDate>,
    pub planning_determination_date: Option<NaiveDate>,
    pub start_on_site_date: Option<NaiveDate>,
    pub first_golden_brick_date: Option<NaiveDate>,
    pub final_golden_brick_date: Option<NaiveDate>,
    pub first_handover_date: Option<NaiveDate>,
    pub final_handover_date: Option<NaiveDate>,
    pub site_added_to_portal_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub region_names: Vec<String>,
    pub lpa_names: Vec<String>,
    pub is_shortlisted: bool,
}

/// The columns needed to authorize a write against an opportunity.
#[derive(Debug, Clone, FromRow)]
pub struct OpportunityOwnership {
    pub id: DbId,
    pub user_id: String,
    pub status: String,
}

impl OpportunityOwnership {
    /// Parsed lifecycle status. An unknown value means the row violates the
    /// status check constraint, which is an internal error.
    pub fn status(&self) -> Result<OpportunityStatus, CoreError> {
        self.status.parse().map_err(|_| {
            CoreError::Internal(format!(
                "Opportunity {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }
}

/// DTO for creating a new opportunity. It is always stored as a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOpportunity {
    pub name: String,
    pub address: Option<String>,
    pub opportunity_type: Option<String>,
    #[serde(default)]
    pub plots: i32,
    pub planning_status: Option<String>,
    pub land_purchase_status: Option<String>,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// GeoJSON `Polygon`.
    pub boundary: Option<serde_json::Value>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub lpa_codes: Vec<String>,
    #[serde(flatten)]
    pub timeline: Timeline,
}

/// DTO for updating a draft opportunity. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOpportunity {
    pub name: Option<String>,
    pub address: Option<String>,
    pub opportunity_type: Option<String>,
    pub plots: Option<i32>,
    pub planning_status: Option<String>,
    pub land_purchase_status: Option<String>,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub boundary: Option<serde_json::Value>,
    pub regions: Option<Vec<String>>,
    pub lpa_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub timeline: Timeline,
}

/// Project timeline dates shared by the create and update DTOs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timeline {
    pub planning_submission_date: Option<NaiveDate>,
    pub planning_determination_date: Option<NaiveDate>,
    pub start_on_site_date: Option<NaiveDate>,
    pub first_golden_brick_date: Option<NaiveDate>,
    pub final_golden_brick_date: Option<NaiveDate>,
    pub first_handover_date: Option<NaiveDate>,
    pub final_handover_date: Option<NaiveDate>,
    pub site_added_to_portal_date: Option<NaiveDate>,
}
