//! API-side access guard.
//!
//! Every data route goes through here, so no handler can reach records the
//! request's role is not allowed to see.

use dumroo_auth::{AccessError, FilteredView, filter};

use crate::app::services::AppServices;
use crate::context::RoleContext;

/// Compute the view visible to the request's role.
pub fn visible_view(
    services: &AppServices,
    ctx: &RoleContext,
) -> Result<FilteredView, AccessError> {
    filter(services.dataset().records(), ctx.role()).inspect_err(|e| {
        tracing::warn!(role = %ctx.role(), error = %e, "access denied");
    })
}
