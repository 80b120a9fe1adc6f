// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Store (A "Loja")
// ---
// A conta principal do sistema: todo dado de domínio pertence a uma loja.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    // Ausente = acesso sem limite de prazo
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// A invariante central do login: a loja está acessível quando está
    /// ativa E (não tem expiração OU ainda não expirou).
    pub fn is_accessible_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => now <= expires_at,
            None => true,
        }
    }

    pub fn is_accessible(&self) -> bool {
        self.is_accessible_at(Utc::now())
    }

    /// Dias até a expiração (arredondando para cima, como o painel exibe).
    /// `None` quando a loja não tem data de expiração.
    pub fn days_until_expiration_at(&self, now: DateTime<Utc>) -> Option<i64> {
        let expires_at = self.expires_at?;
        let diff_ms = (expires_at - now).num_milliseconds() as f64;
        Some((diff_ms / (1000.0 * 60.0 * 60.0 * 24.0)).ceil() as i64)
    }

    pub fn expiration_status_at(&self, now: DateTime<Utc>) -> ExpirationStatus {
        let Some(days) = self.days_until_expiration_at(now) else {
            return ExpirationStatus::Unlimited;
        };

        if days < 0 {
            ExpirationStatus::Expired
        } else if days <= 7 {
            ExpirationStatus::ExpiringSoon { days }
        } else {
            ExpirationStatus::Active { days }
        }
    }

    pub fn expiration_status(&self) -> ExpirationStatus {
        self.expiration_status_at(Utc::now())
    }
}

// Situação de expiração exibida no painel administrativo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpirationStatus {
    Unlimited,
    Active { days: i64 },
    ExpiringSoon { days: i64 },
    Expired,
}

impl ExpirationStatus {
    pub fn message(&self) -> String {
        match self {
            ExpirationStatus::Unlimited => "Sem data de expiração".to_string(),
            ExpirationStatus::Expired => "Expirado".to_string(),
            ExpirationStatus::ExpiringSoon { days } | ExpirationStatus::Active { days } => {
                format!("Expira em {} dia{}", days, if *days != 1 { "s" } else { "" })
            }
        }
    }
}

// Todo registro de domínio sabe a qual loja pertence; é isso que o
// gate de escrita (`enforce_store_id`) inspeciona.
pub trait TenantScoped {
    fn store_id(&self) -> Uuid;
}

// Dados para criar/editar uma loja
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}
