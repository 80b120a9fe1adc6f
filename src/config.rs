// src/config.rs

use std::env;
use std::path::PathBuf;

use crate::common::error::AppError;
use crate::services::{
    AuthService, CrmService, DashboardService, InventoryService, SalesService, SeedService,
    TenancyService,
};
use crate::storage::{
    CustomerRepository, ProductRepository, SaleRepository, Storage, StoreRepository, UserRepository,
};

// Configuração carregada do ambiente. Sem STORAGE_PATH o armazenamento
// fica só em memória (útil em testes e demonstrações).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub super_admin_email: String,
    pub super_admin_password: String,
    pub storage_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            super_admin_email: env::var("SUPER_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@nova.com".to_string()),
            super_admin_password: env::var("SUPER_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
            storage_path: env::var("STORAGE_PATH").ok().map(PathBuf::from),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: Storage,

    pub user_repo: UserRepository,
    pub store_repo: StoreRepository,
    pub product_repo: ProductRepository,
    pub customer_repo: CustomerRepository,
    pub sale_repo: SaleRepository,

    pub auth_service: AuthService,
    pub tenancy_service: TenancyService,
    pub inventory_service: InventoryService,
    pub crm_service: CrmService,
    pub sales_service: SalesService,
    pub dashboard_service: DashboardService,
    pub seed_service: SeedService,
}

impl AppState {
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(AppConfig::from_env())
    }

    pub fn with_config(config: AppConfig) -> Result<Self, AppError> {
        let storage = match &config.storage_path {
            Some(path) => Storage::file(path)?,
            None => Storage::memory(),
        };
        tracing::info!("✅ Armazenamento inicializado com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(storage.clone());
        let store_repo = StoreRepository::new(storage.clone());
        let product_repo = ProductRepository::new(storage.clone());
        let customer_repo = CustomerRepository::new(storage.clone());
        let sale_repo = SaleRepository::new(storage.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            store_repo.clone(),
            storage.clone(),
            config.clone(),
        );
        let tenancy_service = TenancyService::new(store_repo.clone(), user_repo.clone());
        let inventory_service = InventoryService::new(product_repo.clone());
        let crm_service = CrmService::new(customer_repo.clone());
        let sales_service = SalesService::new(
            sale_repo.clone(),
            product_repo.clone(),
            customer_repo.clone(),
        );
        let dashboard_service = DashboardService::new(
            sale_repo.clone(),
            product_repo.clone(),
            customer_repo.clone(),
            store_repo.clone(),
        );
        let seed_service = SeedService::new(
            user_repo.clone(),
            product_repo.clone(),
            customer_repo.clone(),
            config.clone(),
        );

        Ok(Self {
            config,
            storage,
            user_repo,
            store_repo,
            product_repo,
            customer_repo,
            sale_repo,
            auth_service,
            tenancy_service,
            inventory_service,
            crm_service,
            sales_service,
            dashboard_service,
            seed_service,
        })
    }
}
