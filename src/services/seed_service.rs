// src/services/seed_service.rs

use bcrypt::hash;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::config::AppConfig;
use crate::models::auth::{Role, User};
use crate::models::crm::Customer;
use crate::models::inventory::Product;
use crate::storage::{CustomerRepository, ProductRepository, UserRepository};

// Preparação do primeiro uso: garante a conta do super admin e, quando
// a loja está vazia, carrega o catálogo de demonstração.
#[derive(Clone)]
pub struct SeedService {
    user_repo: UserRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
    config: AppConfig,
}

impl SeedService {
    pub fn new(
        user_repo: UserRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
        config: AppConfig,
    ) -> Self {
        Self { user_repo, product_repo, customer_repo, config }
    }

    /// Cria a conta fixa do super admin quando a coleção de usuários
    /// ainda está vazia. Idempotente.
    pub fn ensure_super_admin(&self) -> Result<(), AppError> {
        if !self.user_repo.find_all()?.is_empty() {
            return Ok(());
        }

        let admin = User {
            id: Uuid::new_v4(),
            email: self.config.super_admin_email.clone(),
            password_hash: hash(&self.config.super_admin_password, bcrypt::DEFAULT_COST)?,
            name: "Super Admin".to_string(),
            role: Role::SuperAdmin,
            created_at: Utc::now(),
        };
        self.user_repo.insert(admin)?;
        tracing::info!("✅ Conta do super admin criada");
        Ok(())
    }

    /// Carrega produtos e clientes de demonstração na loja informada,
    /// apenas se as coleções ainda estão vazias.
    pub fn seed_demo_data(&self, store_id: Uuid) -> Result<(), AppError> {
        if self.product_repo.find_all()?.is_empty() {
            self.product_repo.save_all(&demo_products(store_id))?;
        }
        if self.customer_repo.find_all()?.is_empty() {
            self.customer_repo.save_all(&demo_customers(store_id))?;
        }
        Ok(())
    }
}

fn demo_products(store_id: Uuid) -> Vec<Product> {
    let now = Utc::now();
    let product = |name: &str, description: &str, sku: &str, price, cost, stock, category: &str| Product {
        id: Uuid::new_v4(),
        store_id,
        name: name.to_string(),
        description: description.to_string(),
        sku: sku.to_string(),
        price,
        cost,
        stock,
        category: category.to_string(),
        image: None,
        active: true,
        created_at: now,
        updated_at: now,
    };

    vec![
        product(
            "Notebook Dell Inspiron",
            "Notebook Dell Inspiron 15, Intel Core i5, 8GB RAM, 256GB SSD",
            "NB-DELL-001",
            Decimal::new(34999, 1),
            Decimal::from(2800),
            15,
            "Eletrônicos",
        ),
        product(
            "Mouse Logitech MX Master",
            "Mouse sem fio Logitech MX Master 3, ergonômico",
            "MS-LOG-001",
            Decimal::new(4499, 1),
            Decimal::from(320),
            45,
            "Periféricos",
        ),
        product(
            "Teclado Mecânico Keychron",
            "Teclado mecânico Keychron K2, switches brown",
            "KB-KEY-001",
            Decimal::new(5999, 1),
            Decimal::from(420),
            8,
            "Periféricos",
        ),
        product(
            "Monitor LG UltraWide 29\"",
            "Monitor LG 29\" UltraWide Full HD IPS",
            "MN-LG-001",
            Decimal::new(12999, 1),
            Decimal::from(950),
            3,
            "Monitores",
        ),
        product(
            "Webcam Logitech C920",
            "Webcam Full HD 1080p com microfone",
            "WC-LOG-001",
            Decimal::new(3999, 1),
            Decimal::from(280),
            22,
            "Periféricos",
        ),
    ]
}

fn demo_customers(store_id: Uuid) -> Vec<Customer> {
    let now = Utc::now();
    let base = Customer {
        id: Uuid::new_v4(),
        store_id,
        name: String::new(),
        email: None,
        phone: None,
        cpf: None,
        address: None,
        city: None,
        state: None,
        zip_code: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        Customer {
            id: Uuid::new_v4(),
            name: "João Silva".into(),
            email: Some("joao.silva@email.com".into()),
            phone: Some("(11) 98765-4321".into()),
            cpf: Some("123.456.789-00".into()),
            address: Some("Rua das Flores, 123".into()),
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            zip_code: Some("01234-567".into()),
            ..base.clone()
        },
        Customer {
            id: Uuid::new_v4(),
            name: "Maria Santos".into(),
            email: Some("maria.santos@email.com".into()),
            phone: Some("(11) 91234-5678".into()),
            cpf: Some("987.654.321-00".into()),
            address: Some("Av. Paulista, 1000".into()),
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            zip_code: Some("01310-100".into()),
            ..base.clone()
        },
        Customer {
            id: Uuid::new_v4(),
            name: "Pedro Oliveira".into(),
            email: Some("pedro.oliveira@email.com".into()),
            phone: Some("(21) 99876-5432".into()),
            city: Some("Rio de Janeiro".into()),
            state: Some("RJ".into()),
            ..base
        },
    ]
}
