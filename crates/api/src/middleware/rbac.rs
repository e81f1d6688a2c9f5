//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use opphub_core::error::CoreError;
use opphub_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(RequireAdmin(user)),
            Role::Seller | Role::Buyer => Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            ))),
        }
    }
}

/// Requires `seller` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireSeller(pub AuthUser);

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Seller | Role::Admin => Ok(RequireSeller(user)),
            Role::Buyer => Err(AppError::Core(CoreError::Forbidden(
                "Seller or Admin role required".into(),
            ))),
        }
    }
}

/// Requires `buyer` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireBuyer(pub AuthUser);

impl FromRequestParts<AppState> for RequireBuyer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Buyer | Role::Admin => Ok(RequireBuyer(user)),
            Role::Seller => Err(AppError::Core(CoreError::Forbidden(
                "Buyer or Admin role required".into(),
            ))),
        }
    }
}
