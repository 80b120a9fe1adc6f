// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::sales::PaymentMethod;

// 1. Resumo do painel da loja (os cards do topo + gráficos)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sales: u64,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub total_customers: u64,
    pub total_products: u64,
    pub low_stock_products: u64,
    pub sales_by_day: Vec<DailySales>,
    pub top_products: Vec<TopProduct>,
    pub sales_by_payment_method: Vec<PaymentMethodTotal>,
}

// 2. Gráfico de vendas (últimos 7 dias, um registro por dia-calendário)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: u64,
}

// 3. Top produtos por receita
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotal {
    pub method: PaymentMethod,
    pub total: Decimal,
    pub count: u64,
}

// Resumo por loja para o painel do administrador
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub store_id: Uuid,
    pub total_revenue: Decimal,
    pub total_sales: u64,
    pub total_products: u64,
    pub total_customers: u64,
    pub last_activity: Option<DateTime<Utc>>,
}
