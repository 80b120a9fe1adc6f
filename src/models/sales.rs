// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::inventory::non_negative;
use crate::models::tenancy::TenantScoped;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Debit,
    Pix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    Cancelled,
    Pending,
}

// Item de venda com nome e preço congelados no momento da venda:
// mudar o produto depois não altera vendas já registradas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub store_id: Uuid,
    pub receipt_code: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub items: Vec<SaleItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for Sale {
    fn store_id(&self) -> Uuid {
        self.store_id
    }
}

// Dados para registrar uma venda. Os valores monetários do item
// (preço, total) são derivados do produto no serviço, nunca aceitos
// do chamador.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSalePayload {
    pub store_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Adicione pelo menos um item à venda."), nested)]
    pub items: Vec<NewSaleItem>,
    #[serde(default)]
    #[validate(custom(function = non_negative, message = "O desconto não pode ser negativo."))]
    pub discount: Decimal,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleItem {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i64,
    #[serde(default)]
    #[validate(custom(function = non_negative, message = "O desconto não pode ser negativo."))]
    pub discount: Decimal,
}
