//! Session-token request extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::domain::types::AuthSession;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::session::ValidateSessionUseCase;

/// Request header carrying the opaque session token.
pub const SESSION_HEADER: &str = "x-session-id";

/// The authenticated caller: session row plus joined user, employee, role and
/// customer, resolved in one query.
///
/// Rejection is [`ApiError`], so 401/403 responses from the gate carry the
/// same envelope as every other error. Missing, empty or non-UTF-8 header
/// values are 401 before any storage is touched.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthSession);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        let sessions = state.session_repo();

        async move {
            let token = token.ok_or(ApiError::Unauthorized)?;
            let auth = ValidateSessionUseCase { sessions }.execute(&token).await?;
            Ok(Self(auth))
        }
    }
}
