// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::tenancy::TenantScoped;

// O catálogo de produtos de uma loja. Preço e custo em Decimal;
// estoque é contagem inteira.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: Decimal,
    pub cost: Decimal,
    pub stock: i64,
    pub category: String,
    pub image: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantScoped for Product {
    fn store_id(&self) -> Uuid {
        self.store_id
    }
}

// Dados para criar/editar um produto.
// `store_id` explícito só é honrado para o super admin (alvo de outra loja);
// para os demais papéis a loja ativa é carimbada incondicionalmente.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub store_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,
    #[validate(custom(function = non_negative, message = "O preço não pode ser negativo."))]
    pub price: Decimal,
    #[validate(custom(function = non_negative, message = "O custo não pode ser negativo."))]
    pub cost: Decimal,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    pub image: Option<String>,
    pub active: bool,
}

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}
