// tests/common.rs

use pdv_core::models::auth::{OwnerPayload, User};
use pdv_core::models::crm::CustomerPayload;
use pdv_core::models::inventory::ProductPayload;
use pdv_core::models::sales::{NewSaleItem, NewSalePayload, PaymentMethod};
use pdv_core::models::tenancy::{Store, StorePayload};
use pdv_core::{AppConfig, AppState, Session};
use rust_decimal::Decimal;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
}

#[allow(dead_code)]
impl TestApp {
    /// Aplicação completa sobre armazenamento em memória, com o super
    /// admin semeado.
    pub fn new() -> Self {
        let state = AppState::with_config(test_config(None)).expect("estado de teste");
        state.seed_service.ensure_super_admin().expect("seed do super admin");
        Self { state }
    }

    pub fn login(&self, email: &str, password: &str) -> Session {
        let mut session = Session::default();
        self.state
            .auth_service
            .login(&mut session, email, password)
            .unwrap_or_else(|e| panic!("login de {} falhou: {}", email, e));
        session
    }

    pub fn login_admin(&self) -> Session {
        self.login("admin@nova.com", "admin123")
    }

    /// Provisiona uma loja com o dono pareado, como o painel do admin faz.
    pub fn create_store(&self, admin: &Session, name: &str, owner_email: &str) -> (Store, User) {
        self.state
            .tenancy_service
            .create_store_with_owner(
                &admin.context(),
                store_payload(name),
                OwnerPayload {
                    name: format!("Dono de {}", name),
                    email: owner_email.into(),
                    password: "segredo1".into(),
                },
            )
            .expect("criação de loja")
    }
}

#[allow(dead_code)]
pub fn test_config(storage_path: Option<std::path::PathBuf>) -> AppConfig {
    AppConfig {
        super_admin_email: "admin@nova.com".into(),
        super_admin_password: "admin123".into(),
        storage_path,
    }
}

#[allow(dead_code)]
pub fn store_payload(name: &str) -> StorePayload {
    StorePayload {
        name: name.into(),
        email: format!("{}@lojas.com", name),
        phone: None,
        address: None,
        is_active: true,
        expires_at: None,
    }
}

#[allow(dead_code)]
pub fn product_payload(name: &str, price: i64, cost: i64, stock: i64) -> ProductPayload {
    ProductPayload {
        store_id: None,
        name: name.into(),
        description: format!("{} de demonstração", name),
        sku: format!("SKU-{}", name.to_uppercase()),
        price: Decimal::from(price),
        cost: Decimal::from(cost),
        stock,
        category: "Geral".into(),
        image: None,
        active: true,
    }
}

#[allow(dead_code)]
pub fn customer_payload(name: &str) -> CustomerPayload {
    CustomerPayload {
        store_id: None,
        name: name.into(),
        email: None,
        phone: None,
        cpf: None,
        address: None,
        city: None,
        state: None,
        zip_code: None,
        notes: None,
    }
}

#[allow(dead_code)]
pub fn sale_payload(items: Vec<(Uuid, i64)>, method: PaymentMethod) -> NewSalePayload {
    NewSalePayload {
        store_id: None,
        customer_id: None,
        items: items
            .into_iter()
            .map(|(product_id, quantity)| NewSaleItem {
                product_id,
                quantity,
                discount: Decimal::ZERO,
            })
            .collect(),
        discount: Decimal::ZERO,
        payment_method: method,
        notes: None,
    }
}
