// src/services/dashboard_service.rs

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;
use crate::models::crm::Customer;
use crate::models::dashboard::{DailySales, DashboardStats, PaymentMethodTotal, StoreStats, TopProduct};
use crate::models::inventory::Product;
use crate::models::sales::{Sale, SaleStatus};
use crate::models::tenancy::Store;
use crate::storage::{CustomerRepository, ProductRepository, SaleRepository, StoreRepository};

// Abaixo deste estoque o produto aparece no alerta do painel
const LOW_STOCK_THRESHOLD: i64 = 10;

// Agregações de leitura sobre as coleções. Nenhuma função aqui altera
// nada; dado o mesmo insumo, o resultado é sempre o mesmo.
#[derive(Clone)]
pub struct DashboardService {
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
    store_repo: StoreRepository,
}

impl DashboardService {
    pub fn new(
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
        store_repo: StoreRepository,
    ) -> Self {
        Self { sale_repo, product_repo, customer_repo, store_repo }
    }

    /// O painel da loja ativa.
    pub fn dashboard(&self, context: &AccessContext) -> Result<DashboardStats, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        let sales = self.sale_repo.find_all_by_store(store.id)?;
        let products = self.product_repo.find_all_by_store(store.id)?;
        let customers = self.customer_repo.find_all_by_store(store.id)?;
        Ok(calculate_dashboard_stats(&sales, &products, &customers, Utc::now()))
    }

    /// O resumo de uma loja específica, para o painel administrativo.
    pub fn store_stats(&self, store_id: Uuid) -> Result<StoreStats, AppError> {
        let sales = self.sale_repo.find_all_by_store(store_id)?;
        let products = self.product_repo.find_all_by_store(store_id)?;
        let customers = self.customer_repo.find_all_by_store(store_id)?;
        Ok(calculate_store_stats(store_id, &sales, &products, &customers))
    }

    /// O resumo de todas as lojas, indexado pelo id (visão do admin).
    pub fn all_store_stats(&self, context: &AccessContext) -> Result<HashMap<Uuid, StoreStats>, AppError> {
        if !access_control::is_admin(context.user) {
            return Err(AppError::CrossTenantAccess);
        }

        let stores: Vec<Store> = self.store_repo.find_all()?;
        let mut stats = HashMap::with_capacity(stores.len());
        for store in stores {
            stats.insert(store.id, self.store_stats(store.id)?);
        }
        Ok(stats)
    }
}

/// Estatísticas do painel de uma loja. Apenas vendas concluídas contam;
/// `now` ancora a janela dos últimos 7 dias.
pub fn calculate_dashboard_stats(
    sales: &[Sale],
    products: &[Product],
    customers: &[Customer],
    now: DateTime<Utc>,
) -> DashboardStats {
    let completed: Vec<&Sale> = sales.iter().filter(|s| s.status == SaleStatus::Completed).collect();

    let total_revenue: Decimal = completed.iter().map(|s| s.total).sum();

    // Lucro = receita − custo dos itens. Produto que sumiu do catálogo
    // entra com custo zero (margem cheia).
    let total_profit: Decimal = completed
        .iter()
        .map(|sale| {
            sale.items
                .iter()
                .map(|item| {
                    let cost = products
                        .iter()
                        .find(|p| p.id == item.product_id)
                        .map(|p| p.cost * Decimal::from(item.quantity))
                        .unwrap_or(Decimal::ZERO);
                    item.total - cost
                })
                .sum::<Decimal>()
        })
        .sum();

    let low_stock_products =
        products.iter().filter(|p| p.stock < LOW_STOCK_THRESHOLD && p.active).count() as u64;

    DashboardStats {
        total_sales: completed.len() as u64,
        total_revenue,
        total_profit,
        total_customers: customers.len() as u64,
        total_products: products.iter().filter(|p| p.active).count() as u64,
        low_stock_products,
        sales_by_day: last_7_days(&completed, now),
        top_products: top_products(&completed),
        sales_by_payment_method: sales_by_payment_method(&completed),
    }
}

/// Resumo de uma loja para o painel administrativo.
pub fn calculate_store_stats(
    store_id: Uuid,
    sales: &[Sale],
    products: &[Product],
    customers: &[Customer],
) -> StoreStats {
    let completed: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.store_id == store_id && s.status == SaleStatus::Completed)
        .collect();

    StoreStats {
        store_id,
        total_revenue: completed.iter().map(|s| s.total).sum(),
        total_sales: completed.len() as u64,
        total_products: products
            .iter()
            .filter(|p| p.store_id == store_id && p.active)
            .count() as u64,
        total_customers: customers.iter().filter(|c| c.store_id == store_id).count() as u64,
        last_activity: completed.iter().map(|s| s.created_at).max(),
    }
}

// Um registro por dia-calendário, do mais antigo para hoje; dias sem
// venda aparecem zerados.
fn last_7_days(completed: &[&Sale], now: DateTime<Utc>) -> Vec<DailySales> {
    (0..7)
        .map(|i| {
            let date = (now - Duration::days(6 - i)).date_naive();
            let day_sales: Vec<&&Sale> =
                completed.iter().filter(|s| s.created_at.date_naive() == date).collect();
            DailySales {
                date,
                total: day_sales.iter().map(|s| s.total).sum(),
                count: day_sales.len() as u64,
            }
        })
        .collect()
}

// Top 5 por receita, acumulando pelo snapshot do item (funciona mesmo
// para produto que já saiu do catálogo)
fn top_products(completed: &[&Sale]) -> Vec<TopProduct> {
    let mut ranking: Vec<TopProduct> = Vec::new();

    for sale in completed {
        for item in &sale.items {
            match ranking.iter_mut().find(|t| t.product_id == item.product_id) {
                Some(entry) => {
                    entry.quantity += item.quantity;
                    entry.revenue += item.total;
                }
                None => ranking.push(TopProduct {
                    product_id: item.product_id,
                    name: item.product_name.clone(),
                    quantity: item.quantity,
                    revenue: item.total,
                }),
            }
        }
    }

    ranking.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranking.truncate(5);
    ranking
}

fn sales_by_payment_method(completed: &[&Sale]) -> Vec<PaymentMethodTotal> {
    let mut totals: Vec<PaymentMethodTotal> = Vec::new();

    for sale in completed {
        match totals.iter_mut().find(|t| t.method == sale.payment_method) {
            Some(entry) => {
                entry.total += sale.total;
                entry.count += 1;
            }
            None => totals.push(PaymentMethodTotal {
                method: sale.payment_method,
                total: sale.total,
                count: 1,
            }),
        }
    }

    totals
}
