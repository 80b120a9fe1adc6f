// src/services.rs

pub mod auth;
pub use auth::{AuthService, Session};
pub mod tenancy_service;
pub use tenancy_service::TenancyService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod sales_service;
pub use sales_service::SalesService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod seed_service;
pub use seed_service::SeedService;

use uuid::Uuid;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;

// Resolve a loja-alvo de uma escrita. Um alvo explícito só vale para o
// super admin (que pode escrever em qualquer loja, inclusive sem loja
// ativa); para os demais papéis a loja ativa é carimbada sempre,
// ignorando qualquer alvo vindo de fora.
pub(crate) fn resolve_target_store(
    context: &AccessContext,
    explicit: Option<Uuid>,
) -> Result<Uuid, AppError> {
    if context.user.is_none() {
        return Err(AppError::Unauthenticated);
    }

    if access_control::is_admin(context.user) {
        if let Some(target) = explicit {
            return Ok(target);
        }
    }

    Ok(context.active_store.ok_or(AppError::NoActiveStore)?.id)
}
