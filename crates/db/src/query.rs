//! Opportunity listing query builder.
//!
//! Builds the single read statement behind both the list and the detail
//! endpoints: a fixed projection over `live_opportunities` joined to its
//! lookup tables and the caller's shortlist row, narrowed by the caller's
//! visibility and any filters supplied.
//!
//! `$1` is always the caller's user id (used by the shortlist join). Every
//! other placeholder is assigned by [`Conditions::render_where`].

use opphub_core::filters::{DateField, DateFilter, OpportunityFilter, PlotsFilter};
use opphub_core::roles::Caller;
use opphub_core::types::DbId;
use opphub_core::visibility::Visibility;

use crate::predicate::{Conditions, Predicate, QueryParams};

/// Projection for [`OpportunityListing`](crate::models::opportunity::OpportunityListing).
const LISTING_COLUMNS: &str = "\
    lo.id, lo.user_id, lo.status, lo.name, lo.address, lo.opportunity_type, lo.plots, \
    lo.planning_status, lo.land_purchase_status, lo.description, \
    ST_X(lo.geom) AS longitude, ST_Y(lo.geom) AS latitude, \
    ST_AsGeoJSON(lo.boundary)::jsonb AS boundary, \
    lo.regions, lo.lpa_codes, \
    lo.planning_submission_date, lo.planning_determination_date, lo.start_on_site_date, \
    lo.first_golden_brick_date, lo.final_golden_brick_date, \
    lo.first_handover_date, lo.final_handover_date, lo.site_added_to_portal_date, \
    lo.created_at, lo.updated_at, \
    ARRAY_REMOVE(ARRAY_AGG(DISTINCT cr.name), NULL) AS region_names, \
    ARRAY_REMOVE(ARRAY_AGG(DISTINCT lpa.name), NULL) AS lpa_names, \
    (s.id IS NOT NULL) AS is_shortlisted";

/// Joins for the listing projection. `$1` is the caller's user id.
const LISTING_FROM: &str = "\
    FROM live_opportunities lo \
    LEFT JOIN custom_regions cr ON cr.id = ANY(lo.regions) \
    LEFT JOIN local_planning_authorities lpa ON lpa.code = ANY(lo.lpa_codes) \
    LEFT JOIN shortlists s ON s.opportunity_id = lo.id AND s.user_id = $1";

const LISTING_TAIL: &str = "GROUP BY lo.id, s.id ORDER BY lo.created_at DESC";

/// Column filtered by each date filter.
pub fn date_column(field: DateField) -> &'static str {
    match field {
        DateField::SiteAdded => "lo.site_added_to_portal_date",
        DateField::PlanningSubmission => "lo.planning_submission_date",
        DateField::StartOnSite => "lo.start_on_site_date",
        DateField::Handover => "lo.first_handover_date",
    }
}

/// Role-based restriction, or `None` when the caller may see every row.
pub fn visibility_predicate(visibility: &Visibility) -> Option<Predicate> {
    match visibility {
        Visibility::OwnedBy(user_id) => Some(Predicate::eq("lo.user_id", user_id.as_str())),
        Visibility::WithStatus(status) => Some(Predicate::eq("lo.status", status.as_str())),
        Visibility::Everything => None,
    }
}

pub fn plots_predicate(filter: &PlotsFilter) -> Predicate {
    match *filter {
        PlotsFilter::Between { min, max } => Predicate::between("lo.plots", min, max),
        PlotsFilter::MoreThan(v) => Predicate::gt("lo.plots", v),
        PlotsFilter::LessThan(v) => Predicate::lt("lo.plots", v),
    }
}

pub fn date_predicate(column: &'static str, filter: &DateFilter) -> Predicate {
    match *filter {
        DateFilter::Between { start, end } => Predicate::between(column, start, end),
        DateFilter::Before(date) => Predicate::lt(column, date),
        DateFilter::After(date) => Predicate::gt(column, date),
    }
}

/// Translate every present filter into one predicate each.
pub fn filter_predicates(filter: &OpportunityFilter) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(regions) = &filter.regions {
        predicates.push(Predicate::overlaps("lo.regions", regions.clone()));
    }
    if let Some(types) = &filter.opportunity_types {
        predicates.push(Predicate::any_of("lo.opportunity_type", types.clone()));
    }
    if let Some(plots) = &filter.plots {
        predicates.push(plots_predicate(plots));
    }
    if let Some(statuses) = &filter.planning_statuses {
        predicates.push(Predicate::any_of("lo.planning_status", statuses.clone()));
    }
    if let Some(statuses) = &filter.land_purchase_statuses {
        predicates.push(Predicate::any_of("lo.land_purchase_status", statuses.clone()));
    }
    for (field, date_filter) in &filter.dates {
        predicates.push(date_predicate(date_column(*field), date_filter));
    }
    if filter.shortlisted_only {
        predicates.push(Predicate::sql("s.id IS NOT NULL"));
    }

    predicates
}

/// SQL text and its bound values, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: QueryParams,
}

/// Builder for the opportunity listing statement.
///
/// ```ignore
/// let built = ListingQuery::new(&caller, &visibility)
///     .with_filter(&filter)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ListingQuery {
    user_id: String,
    conditions: Conditions,
}

impl ListingQuery {
    /// Start a query for `caller`, restricted to what `visibility` allows.
    pub fn new(caller: &Caller, visibility: &Visibility) -> Self {
        let mut conditions = Conditions::default();
        if let Some(predicate) = visibility_predicate(visibility) {
            conditions.push(predicate);
        }
        Self {
            user_id: caller.user_id.clone(),
            conditions,
        }
    }

    pub fn with_filter(mut self, filter: &OpportunityFilter) -> Self {
        for predicate in filter_predicates(filter) {
            self.conditions.push(predicate);
        }
        self
    }

    pub fn with_id(mut self, id: DbId) -> Self {
        self.conditions.push(Predicate::eq("lo.id", id));
        self
    }

    pub fn build(self) -> BuiltQuery {
        let mut params = QueryParams::default();
        params.push(self.user_id);
        let where_clause = self.conditions.render_where(&mut params);

        let sql = if where_clause.is_empty() {
            format!("SELECT {LISTING_COLUMNS} {LISTING_FROM} {LISTING_TAIL}")
        } else {
            format!("SELECT {LISTING_COLUMNS} {LISTING_FROM} {where_clause} {LISTING_TAIL}")
        };

        BuiltQuery { sql, params }
    }
}
