//! Role-based visibility of opportunities.
//!
//! Visibility is applied to every read before any caller-supplied filter.

use crate::roles::{Caller, Role};
use crate::status::OpportunityStatus;
use crate::types::UserId;

/// The set of opportunities a caller is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Rows owned by the given user, in any status.
    OwnedBy(UserId),
    /// Rows with exactly this status.
    WithStatus(OpportunityStatus),
    /// No restriction.
    Everything,
}

impl Visibility {
    /// Visibility for a listing request.
    ///
    /// Admins see everything unless they ask for drafts, either through
    /// `show_drafts` or `status=draft`; other status values are ignored.
    pub fn for_listing(caller: &Caller, show_drafts: bool, status: Option<&str>) -> Self {
        match caller.role {
            Role::Seller => Visibility::OwnedBy(caller.user_id.clone()),
            Role::Buyer => Visibility::WithStatus(OpportunityStatus::Published),
            Role::Admin if show_drafts || status == Some(OpportunityStatus::Draft.as_str()) => {
                Visibility::WithStatus(OpportunityStatus::Draft)
            }
            Role::Admin => Visibility::Everything,
        }
    }

    /// Visibility for fetching a single record.
    pub fn for_caller(caller: &Caller) -> Self {
        Self::for_listing(caller, false, None)
    }

    /// Whether a record with the given owner and status is visible.
    pub fn permits(&self, owner_id: &str, status: OpportunityStatus) -> bool {
        match self {
            Visibility::OwnedBy(user_id) => user_id == owner_id,
            Visibility::WithStatus(s) => *s == status,
            Visibility::Everything => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_sees_own_rows_only() {
        let caller = Caller::new("U1", Role::Seller);
        let v = Visibility::for_listing(&caller, true, Some("published"));
        assert_eq!(v, Visibility::OwnedBy("U1".into()));
        assert!(v.permits("U1", OpportunityStatus::Draft));
        assert!(!v.permits("U2", OpportunityStatus::Published));
    }

    #[test]
    fn test_buyer_sees_published_regardless_of_flags() {
        let caller = Caller::new("B1", Role::Buyer);
        let v = Visibility::for_listing(&caller, true, Some("draft"));
        assert_eq!(v, Visibility::WithStatus(OpportunityStatus::Published));
        assert!(!v.permits("B1", OpportunityStatus::Draft));
    }

    #[test]
    fn test_admin_default_sees_everything() {
        let caller = Caller::new("A1", Role::Admin);
        assert_eq!(
            Visibility::for_listing(&caller, false, None),
            Visibility::Everything
        );
        assert_eq!(
            Visibility::for_listing(&caller, false, Some("processing")),
            Visibility::Everything
        );
    }

    #[test]
    fn test_admin_drafts_via_flag_or_status() {
        let caller = Caller::new("A1", Role::Admin);
        let drafts = Visibility::WithStatus(OpportunityStatus::Draft);
        assert_eq!(Visibility::for_listing(&caller, true, None), drafts);
        assert_eq!(Visibility::for_listing(&caller, false, Some("draft")), drafts);
        assert_eq!(
            Visibility::for_listing(&caller, true, Some("published")),
            drafts
        );
    }

    #[test]
    fn test_for_caller_matches_unflagged_listing() {
        let admin = Caller::new("A1", Role::Admin);
        assert_eq!(Visibility::for_caller(&admin), Visibility::Everything);
    }
}
