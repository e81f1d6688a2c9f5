//! Parsing of the opportunity list filters.
//!
//! The list endpoint accepts an open bag of optional query parameters. Each
//! filter is parsed independently into a typed value. A filter that is
//! present but incomplete or unparseable is reported as malformed and
//! contributes nothing to the query; callers decide whether to drop it
//! silently or reject the request.
//!
//! Numbers use leading-integer coercion (`"10.9"` and `"10abc"` are both
//! `10`). Dates are converted to UTC and truncated to the calendar date.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Raw query parameters
// ---------------------------------------------------------------------------

/// Query-string parameters of `GET /api/live-opportunities`, as received.
///
/// Everything is kept as a string so that coercion rules live here rather
/// than in the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOpportunitiesParams {
    pub regions: Option<String>,
    pub opportunity_type: Option<String>,
    pub planning_status: Option<String>,
    pub land_purchase_status: Option<String>,

    pub plots_mode: Option<String>,
    pub plots_min: Option<String>,
    pub plots_max: Option<String>,
    pub plots_value: Option<String>,

    pub site_added_date_mode: Option<String>,
    pub site_added_date_start: Option<String>,
    pub site_added_date_end: Option<String>,
    pub site_added_date_single: Option<String>,

    pub planning_submission_date_mode: Option<String>,
    pub planning_submission_date_start: Option<String>,
    pub planning_submission_date_end: Option<String>,
    pub planning_submission_date_single: Option<String>,

    pub start_on_site_date_mode: Option<String>,
    pub start_on_site_date_start: Option<String>,
    pub start_on_site_date_end: Option<String>,
    pub start_on_site_date_single: Option<String>,

    pub handover_date_mode: Option<String>,
    pub handover_date_start: Option<String>,
    pub handover_date_end: Option<String>,
    pub handover_date_single: Option<String>,

    pub show_shortlisted: Option<String>,
    pub show_drafts: Option<String>,
    pub status: Option<String>,
}

/// The `mode`/`start`/`end`/`single` parameters of one date filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParams<'a> {
    pub mode: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub single: Option<&'a str>,
}

impl ListOpportunitiesParams {
    pub fn show_drafts(&self) -> bool {
        is_true(self.show_drafts.as_deref())
    }

    pub fn shortlisted_only(&self) -> bool {
        is_true(self.show_shortlisted.as_deref())
    }

    pub fn status(&self) -> Option<&str> {
        present(self.status.as_deref())
    }

    pub fn date_params(&self, field: DateField) -> DateParams<'_> {
        let (mode, start, end, single) = match field {
            DateField::SiteAdded => (
                &self.site_added_date_mode,
                &self.site_added_date_start,
                &self.site_added_date_end,
                &self.site_added_date_single,
            ),
            DateField::PlanningSubmission => (
                &self.planning_submission_date_mode,
                &self.planning_submission_date_start,
                &self.planning_submission_date_end,
                &self.planning_submission_date_single,
            ),
            DateField::StartOnSite => (
                &self.start_on_site_date_mode,
                &self.start_on_site_date_start,
                &self.start_on_site_date_end,
                &self.start_on_site_date_single,
            ),
            DateField::Handover => (
                &self.handover_date_mode,
                &self.handover_date_start,
                &self.handover_date_end,
                &self.handover_date_single,
            ),
        };
        DateParams {
            mode: mode.as_deref(),
            start: start.as_deref(),
            end: end.as_deref(),
            single: single.as_deref(),
        }
    }

    /// Parse every filter, collecting the ones that were malformed.
    pub fn parse_filter(&self) -> ParsedFilter {
        let mut malformed = Vec::new();

        let plots = PlotsFilter::parse(
            self.plots_mode.as_deref(),
            self.plots_min.as_deref(),
            self.plots_max.as_deref(),
            self.plots_value.as_deref(),
        )
        .unwrap_or_else(|e| {
            malformed.push(e);
            None
        });

        let mut dates = Vec::new();
        for field in DateField::ALL {
            match DateFilter::parse(field, self.date_params(field)) {
                Ok(Some(filter)) => dates.push((field, filter)),
                Ok(None) => {}
                Err(e) => malformed.push(e),
            }
        }

        let filter = OpportunityFilter {
            regions: parse_list(self.regions.as_deref()),
            opportunity_types: parse_list(self.opportunity_type.as_deref()),
            planning_statuses: parse_list(self.planning_status.as_deref()),
            land_purchase_statuses: parse_list(self.land_purchase_status.as_deref()),
            plots,
            dates,
            shortlisted_only: self.shortlisted_only(),
        };

        ParsedFilter { filter, malformed }
    }
}

// ---------------------------------------------------------------------------
// Typed filters
// ---------------------------------------------------------------------------

/// A filter that was supplied but could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedFilter {
    /// Query-parameter group name, e.g. `plots` or `siteAddedDate`.
    pub name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MalformedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Plot-count filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotsFilter {
    /// Inclusive on both ends.
    Between { min: i64, max: i64 },
    MoreThan(i64),
    LessThan(i64),
}

impl PlotsFilter {
    const NAME: &'static str = "plots";

    /// Parse `plotsMode` and its bounds. `Ok(None)` means no filter requested.
    pub fn parse(
        mode: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
        value: Option<&str>,
    ) -> Result<Option<Self>, MalformedFilter> {
        let Some(mode) = present(mode) else {
            return Ok(None);
        };
        let int = |raw: Option<&str>| present(raw).and_then(parse_int);

        let filter = match mode {
            "between" => match (int(min), int(max)) {
                (Some(min), Some(max)) => PlotsFilter::Between { min, max },
                _ => return Err(malformed(Self::NAME, "between requires plotsMin and plotsMax")),
            },
            "more-than" => PlotsFilter::MoreThan(
                int(value).ok_or(malformed(Self::NAME, "more-than requires plotsValue"))?,
            ),
            "less-than" => PlotsFilter::LessThan(
                int(value).ok_or(malformed(Self::NAME, "less-than requires plotsValue"))?,
            ),
            _ => return Err(malformed(Self::NAME, "unknown plotsMode")),
        };
        Ok(Some(filter))
    }
}

/// The timeline columns that can be filtered by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    SiteAdded,
    PlanningSubmission,
    StartOnSite,
    Handover,
}

impl DateField {
    pub const ALL: [DateField; 4] = [
        DateField::SiteAdded,
        DateField::PlanningSubmission,
        DateField::StartOnSite,
        DateField::Handover,
    ];

    /// Prefix shared by the four query parameters of this filter.
    pub fn param_prefix(self) -> &'static str {
        match self {
            DateField::SiteAdded => "siteAddedDate",
            DateField::PlanningSubmission => "planningSubmissionDate",
            DateField::StartOnSite => "startOnSiteDate",
            DateField::Handover => "handoverDate",
        }
    }
}

/// Date-range filter on a single timeline column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Inclusive on both ends.
    Between { start: NaiveDate, end: NaiveDate },
    Before(NaiveDate),
    After(NaiveDate),
}

impl DateFilter {
    /// Parse one date group. `Ok(None)` means no filter requested.
    pub fn parse(field: DateField, params: DateParams<'_>) -> Result<Option<Self>, MalformedFilter> {
        let Some(mode) = present(params.mode) else {
            return Ok(None);
        };
        let name = field.param_prefix();
        let date = |raw: Option<&str>| present(raw).and_then(normalize_date);

        let filter = match mode {
            "between" => match (date(params.start), date(params.end)) {
                (Some(start), Some(end)) => DateFilter::Between { start, end },
                _ => return Err(malformed(name, "between requires a valid start and end")),
            },
            "before" => DateFilter::Before(
                date(params.single).ok_or(malformed(name, "before requires a valid date"))?,
            ),
            "after" => DateFilter::After(
                date(params.single).ok_or(malformed(name, "after requires a valid date"))?,
            ),
            _ => return Err(malformed(name, "unknown date mode")),
        };
        Ok(Some(filter))
    }
}

/// All list filters a caller may supply. Filters combine with AND; values
/// inside one list filter combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityFilter {
    pub regions: Option<Vec<String>>,
    pub opportunity_types: Option<Vec<String>>,
    pub planning_statuses: Option<Vec<String>>,
    pub land_purchase_statuses: Option<Vec<String>>,
    pub plots: Option<PlotsFilter>,
    pub dates: Vec<(DateField, DateFilter)>,
    pub shortlisted_only: bool,
}

/// Result of [`ListOpportunitiesParams::parse_filter`].
#[derive(Debug, Clone, Default)]
pub struct ParsedFilter {
    pub filter: OpportunityFilter,
    pub malformed: Vec<MalformedFilter>,
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

fn malformed(name: &'static str, reason: &'static str) -> MalformedFilter {
    MalformedFilter { name, reason }
}

/// Treat missing and blank values alike.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn is_true(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Split a comma-separated list, dropping blank entries.
///
/// Returns `None` when nothing usable remains.
pub fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = present(raw)?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Coerce a string to an integer using its leading integer portion.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit. Returns `None` when there are no leading digits or the value
/// overflows.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Normalize a date or date-time string to a UTC calendar date.
///
/// - RFC 3339 with an offset is converted to UTC first, then truncated.
/// - A date-time without an offset is read as UTC.
/// - A bare `YYYY-MM-DD` is UTC midnight of that day.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().date_naive());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- normalize_date ---------------------------------------------------

    #[test]
    fn test_normalize_date_converts_offset_to_utc_before_truncating() {
        // 23:30 at +02:00 is 21:30 UTC on the same day.
        assert_eq!(
            normalize_date("2024-03-15T23:30:00+02:00"),
            Some(ymd(2024, 3, 15))
        );
        // 01:30 at +02:00 is 23:30 UTC on the previous day.
        assert_eq!(
            normalize_date("2024-03-15T01:30:00+02:00"),
            Some(ymd(2024, 3, 14))
        );
        // Negative offsets can roll forward a day.
        assert_eq!(
            normalize_date("2024-03-15T22:00:00-05:00"),
            Some(ymd(2024, 3, 16))
        );
    }

    #[test]
    fn test_normalize_date_accepts_plain_and_zulu_forms() {
        assert_eq!(normalize_date("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(
            normalize_date("2024-03-15T00:00:00.000Z"),
            Some(ymd(2024, 3, 15))
        );
        assert_eq!(
            normalize_date("2024-03-15T23:59:59"),
            Some(ymd(2024, 3, 15))
        );
        assert_eq!(normalize_date("2024-03-15T08:15"), Some(ymd(2024, 3, 15)));
        assert_eq!(normalize_date(" 2024-03-15 "), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2024-02-30"), None);
        assert_eq!(normalize_date("15/03/2024"), None);
    }

    // -- parse_int --------------------------------------------------------

    #[test]
    fn test_parse_int_uses_leading_integer() {
        assert_eq!(parse_int("10"), Some(10));
        assert_eq!(parse_int("  42"), Some(42));
        assert_eq!(parse_int("10.9"), Some(10));
        assert_eq!(parse_int("10abc"), Some(10));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+7"), Some(7));
    }

    #[test]
    fn test_parse_int_rejects_non_numeric() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(".5"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    // -- parse_list -------------------------------------------------------

    #[test]
    fn test_parse_list_splits_and_trims() {
        assert_eq!(
            parse_list(Some("north, south ,,east")),
            Some(vec!["north".into(), "south".into(), "east".into()])
        );
    }

    #[test]
    fn test_parse_list_blank_is_absent() {
        assert_eq!(parse_list(None), None);
        assert_eq!(parse_list(Some("")), None);
        assert_eq!(parse_list(Some(" , ,")), None);
    }

    // -- PlotsFilter ------------------------------------------------------

    #[test]
    fn test_plots_between() {
        assert_eq!(
            PlotsFilter::parse(Some("between"), Some("10"), Some("50"), None),
            Ok(Some(PlotsFilter::Between { min: 10, max: 50 }))
        );
    }

    #[test]
    fn test_plots_between_missing_bound_is_malformed() {
        let err = PlotsFilter::parse(Some("between"), Some("10"), None, None).unwrap_err();
        assert_eq!(err.name, "plots");
        assert!(PlotsFilter::parse(Some("between"), Some("x"), Some("50"), None).is_err());
    }

    #[test]
    fn test_plots_single_value_modes() {
        assert_eq!(
            PlotsFilter::parse(Some("more-than"), None, None, Some("5")),
            Ok(Some(PlotsFilter::MoreThan(5)))
        );
        assert_eq!(
            PlotsFilter::parse(Some("less-than"), Some("1"), Some("2"), Some("20.5")),
            Ok(Some(PlotsFilter::LessThan(20)))
        );
        assert!(PlotsFilter::parse(Some("more-than"), None, None, None).is_err());
    }

    #[test]
    fn test_plots_without_mode_is_absent() {
        assert_eq!(PlotsFilter::parse(None, Some("1"), Some("2"), Some("3")), Ok(None));
        assert_eq!(PlotsFilter::parse(Some(""), None, None, None), Ok(None));
    }

    #[test]
    fn test_plots_unknown_mode_is_malformed() {
        assert!(PlotsFilter::parse(Some("around"), None, None, Some("3")).is_err());
    }

    // -- DateFilter -------------------------------------------------------

    #[test]
    fn test_date_filter_modes() {
        let field = DateField::Handover;
        assert_eq!(
            DateFilter::parse(
                field,
                DateParams {
                    mode: Some("between"),
                    start: Some("2024-01-01"),
                    end: Some("2024-12-31"),
                    single: None,
                }
            ),
            Ok(Some(DateFilter::Between {
                start: ymd(2024, 1, 1),
                end: ymd(2024, 12, 31)
            }))
        );
        assert_eq!(
            DateFilter::parse(
                field,
                DateParams {
                    mode: Some("before"),
                    single: Some("2024-06-01T01:00:00+03:00"),
                    ..Default::default()
                }
            ),
            Ok(Some(DateFilter::Before(ymd(2024, 5, 31))))
        );
        assert_eq!(
            DateFilter::parse(
                field,
                DateParams {
                    mode: Some("after"),
                    single: Some("2024-06-01"),
                    ..Default::default()
                }
            ),
            Ok(Some(DateFilter::After(ymd(2024, 6, 1))))
        );
    }

    #[test]
    fn test_date_filter_incomplete_is_malformed() {
        let err = DateFilter::parse(
            DateField::StartOnSite,
            DateParams {
                mode: Some("between"),
                start: Some("2024-01-01"),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.name, "startOnSiteDate");

        assert!(DateFilter::parse(
            DateField::StartOnSite,
            DateParams {
                mode: Some("after"),
                single: Some("not a date"),
                ..Default::default()
            },
        )
        .is_err());
    }

    // -- ListOpportunitiesParams -----------------------------------------

    #[test]
    fn test_parse_filter_collects_valid_filters() {
        let params = ListOpportunitiesParams {
            regions: Some("r1,r2".into()),
            opportunity_type: Some("s106".into()),
            plots_mode: Some("between".into()),
            plots_min: Some("10".into()),
            plots_max: Some("50".into()),
            site_added_date_mode: Some("after".into()),
            site_added_date_single: Some("2024-01-01".into()),
            show_shortlisted: Some("true".into()),
            ..Default::default()
        };

        let parsed = params.parse_filter();
        assert!(parsed.malformed.is_empty());
        let f = parsed.filter;
        assert_eq!(f.regions, Some(vec!["r1".into(), "r2".into()]));
        assert_eq!(f.opportunity_types, Some(vec!["s106".into()]));
        assert_eq!(f.plots, Some(PlotsFilter::Between { min: 10, max: 50 }));
        assert_eq!(
            f.dates,
            vec![(DateField::SiteAdded, DateFilter::After(ymd(2024, 1, 1)))]
        );
        assert!(f.shortlisted_only);
    }

    #[test]
    fn test_malformed_filter_parses_like_absent_filter() {
        let with_bad_plots = ListOpportunitiesParams {
            regions: Some("r1".into()),
            plots_mode: Some("between".into()),
            plots_min: Some("10".into()),
            ..Default::default()
        };
        let without_plots = ListOpportunitiesParams {
            regions: Some("r1".into()),
            ..Default::default()
        };

        let bad = with_bad_plots.parse_filter();
        assert_eq!(bad.filter, without_plots.parse_filter().filter);
        assert_matches!(bad.malformed.as_slice(), [MalformedFilter { name: "plots", .. }]);
    }

    #[test]
    fn test_flags_require_literal_true() {
        let params = ListOpportunitiesParams {
            show_shortlisted: Some("1".into()),
            show_drafts: Some("TRUE".into()),
            ..Default::default()
        };
        assert!(!params.shortlisted_only());
        assert!(!params.show_drafts());
    }

    #[test]
    fn test_params_deserialize_from_camel_case() {
        let params: ListOpportunitiesParams = serde_json::from_value(serde_json::json!({
            "plotsMode": "more-than",
            "plotsValue": "4",
            "handoverDateMode": "before",
            "handoverDateSingle": "2025-01-01",
            "showDrafts": "true",
        }))
        .unwrap();
        assert_eq!(params.plots_mode.as_deref(), Some("more-than"));
        assert_eq!(params.handover_date_single.as_deref(), Some("2025-01-01"));
        assert!(params.show_drafts());
    }
}
