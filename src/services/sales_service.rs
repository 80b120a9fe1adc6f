// src/services/sales_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;
use crate::common::receipt::generate_receipt_code;
use crate::models::sales::{NewSalePayload, Sale, SaleItem, SaleStatus};
use crate::services::resolve_target_store;
use crate::storage::{CustomerRepository, ProductRepository, SaleRepository};

// O fluxo do ponto de venda: registra a venda com os itens congelados
// (nome e preço do produto no momento da venda) e dá baixa no estoque
// da própria loja.
#[derive(Clone)]
pub struct SalesService {
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
}

impl SalesService {
    pub fn new(
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
    ) -> Self {
        Self { sale_repo, product_repo, customer_repo }
    }

    pub fn create_sale(&self, context: &AccessContext, payload: NewSalePayload) -> Result<Sale, AppError> {
        payload.validate()?;

        let seller = context.user.ok_or(AppError::Unauthenticated)?;
        let store_id = resolve_target_store(context, payload.store_id)?;

        // Monta os itens com o preço e o nome congelados. Itens de venda
        // nunca são recalculados depois, mesmo que o produto mude.
        let mut items = Vec::with_capacity(payload.items.len());
        for entry in &payload.items {
            let product = self
                .product_repo
                .find_by_id_in_store(entry.product_id, store_id)?
                .ok_or(AppError::ProductNotFound)?;

            if entry.quantity > product.stock {
                return Err(AppError::InsufficientStock(product.name));
            }

            let total = Decimal::from(entry.quantity) * product.price - entry.discount;
            items.push(SaleItem {
                product_id: product.id,
                product_name: product.name,
                quantity: entry.quantity,
                unit_price: product.price,
                discount: entry.discount,
                total,
            });
        }

        let subtotal: Decimal = items.iter().map(|item| item.total).sum();
        let total = subtotal - payload.discount;

        // Cliente é opcional; quando informado, precisa existir na loja
        let customer = match payload.customer_id {
            Some(customer_id) => Some(
                self.customer_repo
                    .find_by_id_in_store(customer_id, store_id)?
                    .ok_or(AppError::CustomerNotFound)?,
            ),
            None => None,
        };

        let sale = Sale {
            id: Uuid::new_v4(),
            store_id,
            receipt_code: generate_receipt_code(),
            customer_id: customer.as_ref().map(|c| c.id),
            customer_name: customer.map(|c| c.name),
            items,
            subtotal,
            discount: payload.discount,
            total,
            payment_method: payload.payment_method,
            status: SaleStatus::Completed,
            seller_id: seller.id,
            seller_name: seller.name.clone(),
            notes: payload.notes,
            created_at: Utc::now(),
        };

        let sale = match context.active_store {
            Some(_) => access_control::enforce_store_id(sale, context)?,
            None => sale,
        };

        let sale = self.sale_repo.insert(sale)?;
        self.decrement_stock(&sale)?;

        tracing::info!("✅ Venda {} registrada na loja {}", sale.receipt_code, sale.store_id);
        Ok(sale)
    }

    pub fn list_sales(&self, context: &AccessContext) -> Result<Vec<Sale>, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.sale_repo.find_all_by_store(store.id)
    }

    pub fn list_sales_for_store(&self, store_id: Uuid) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.find_all_by_store(store_id)
    }

    pub fn get_sale(&self, context: &AccessContext, sale_id: Uuid) -> Result<Sale, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.sale_repo.find_by_id_in_store(sale_id, store.id)?.ok_or(AppError::SaleNotFound)
    }

    /// Confere um código de recibo contra as vendas da loja ativa.
    pub fn validate_receipt(&self, context: &AccessContext, code: &str) -> Result<bool, AppError> {
        let sales = self.list_sales(context)?;
        Ok(crate::common::receipt::validate_receipt_code(code, &sales))
    }

    // A baixa de estoque fica restrita aos produtos da loja da venda.
    fn decrement_stock(&self, sale: &Sale) -> Result<(), AppError> {
        let mut products = self.product_repo.find_all()?;
        let now = Utc::now();

        for product in products.iter_mut() {
            if product.store_id != sale.store_id {
                continue;
            }
            if let Some(item) = sale.items.iter().find(|item| item.product_id == product.id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }

        self.product_repo.save_all(&products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Role, User};
    use crate::models::crm::CustomerPayload;
    use crate::models::inventory::{Product, ProductPayload};
    use crate::models::sales::{NewSaleItem, PaymentMethod};
    use crate::models::tenancy::Store;
    use crate::services::crm_service::CrmService;
    use crate::services::inventory_service::InventoryService;
    use crate::storage::Storage;

    struct Fixture {
        sales: SalesService,
        inventory: InventoryService,
        crm: CrmService,
        product_repo: ProductRepository,
    }

    fn fixture() -> Fixture {
        let storage = Storage::memory();
        let sale_repo = SaleRepository::new(storage.clone());
        let product_repo = ProductRepository::new(storage.clone());
        let customer_repo = CustomerRepository::new(storage.clone());
        Fixture {
            sales: SalesService::new(sale_repo, product_repo.clone(), customer_repo.clone()),
            inventory: InventoryService::new(product_repo.clone()),
            crm: CrmService::new(customer_repo),
            product_repo,
        }
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "vendedora@loja.com".into(),
            password_hash: "hash".into(),
            name: "Vendedora".into(),
            role,
            created_at: Utc::now(),
        }
    }

    fn store(id: Uuid) -> Store {
        let now = Utc::now();
        Store {
            id,
            name: "Loja".into(),
            email: "loja@teste.com".into(),
            phone: None,
            address: None,
            is_active: true,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn product_payload(name: &str, price: i64, stock: i64) -> ProductPayload {
        ProductPayload {
            store_id: None,
            name: name.into(),
            description: String::new(),
            sku: format!("SKU-{}", name),
            price: Decimal::from(price),
            cost: Decimal::from(price / 2),
            stock,
            category: "Geral".into(),
            image: None,
            active: true,
        }
    }

    fn sale_payload(items: Vec<NewSaleItem>, discount: i64) -> NewSalePayload {
        NewSalePayload {
            store_id: None,
            customer_id: None,
            items,
            discount: Decimal::from(discount),
            payment_method: PaymentMethod::Pix,
            notes: None,
        }
    }

    #[test]
    fn venda_deriva_totais_e_da_baixa_no_estoque() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let mouse = f.inventory.create_product(&ctx, product_payload("mouse", 100, 10)).unwrap();
        let cabo = f.inventory.create_product(&ctx, product_payload("cabo", 20, 5)).unwrap();

        let sale = f
            .sales
            .create_sale(
                &ctx,
                sale_payload(
                    vec![
                        NewSaleItem { product_id: mouse.id, quantity: 2, discount: Decimal::from(10) },
                        NewSaleItem { product_id: cabo.id, quantity: 1, discount: Decimal::ZERO },
                    ],
                    5,
                ),
            )
            .unwrap();

        // item: 2 × 100 − 10 = 190; 1 × 20 = 20; subtotal 210; total 205
        assert_eq!(sale.subtotal, Decimal::from(210));
        assert_eq!(sale.total, Decimal::from(205));
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.seller_id, owner.id);
        assert!(!sale.receipt_code.is_empty());

        // estoque decrementado, registro da venda congelado
        let mouse_depois = f.product_repo.find_by_id(mouse.id).unwrap().unwrap();
        assert_eq!(mouse_depois.stock, 8);
        let cabo_depois = f.product_repo.find_by_id(cabo.id).unwrap().unwrap();
        assert_eq!(cabo_depois.stock, 4);
    }

    #[test]
    fn snapshot_do_item_nao_muda_com_o_produto() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let mouse = f.inventory.create_product(&ctx, product_payload("mouse", 100, 10)).unwrap();
        let sale = f
            .sales
            .create_sale(
                &ctx,
                sale_payload(vec![NewSaleItem { product_id: mouse.id, quantity: 1, discount: Decimal::ZERO }], 0),
            )
            .unwrap();

        // o produto muda de nome e preço depois da venda
        let mut edit = product_payload("mouse gamer", 250, 7);
        edit.sku = mouse.sku.clone();
        f.inventory.update_product(&ctx, mouse.id, edit).unwrap();

        let persisted = f.sales.get_sale(&ctx, sale.id).unwrap();
        assert_eq!(persisted.items[0].product_name, "mouse");
        assert_eq!(persisted.items[0].unit_price, Decimal::from(100));
    }

    #[test]
    fn estoque_insuficiente_recusa_a_venda_inteira() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let mouse = f.inventory.create_product(&ctx, product_payload("mouse", 100, 1)).unwrap();

        let err = f
            .sales
            .create_sale(
                &ctx,
                sale_payload(vec![NewSaleItem { product_id: mouse.id, quantity: 2, discount: Decimal::ZERO }], 0),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock(_)));

        // nada foi gravado
        assert!(f.sales.list_sales(&ctx).unwrap().is_empty());
        assert_eq!(f.product_repo.find_by_id(mouse.id).unwrap().unwrap().stock, 1);
    }

    #[test]
    fn produto_de_outra_loja_nao_entra_na_venda() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();

        let admin = user(Role::SuperAdmin);
        let ctx_admin = AccessContext::new(Some(&admin), None);
        let mut alheio = product_payload("alheio", 50, 10);
        alheio.store_id = Some(s2);
        let alheio = f.inventory.create_product(&ctx_admin, alheio).unwrap();

        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let err = f
            .sales
            .create_sale(
                &ctx,
                sale_payload(vec![NewSaleItem { product_id: alheio.id, quantity: 1, discount: Decimal::ZERO }], 0),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));
    }

    #[test]
    fn cliente_informado_vira_snapshot_na_venda() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let mouse = f.inventory.create_product(&ctx, product_payload("mouse", 100, 5)).unwrap();
        let customer = f
            .crm
            .create_customer(&ctx, CustomerPayload { name: "João Silva".into(), ..Default::default() })
            .unwrap();

        let mut payload = sale_payload(
            vec![NewSaleItem { product_id: mouse.id, quantity: 1, discount: Decimal::ZERO }],
            0,
        );
        payload.customer_id = Some(customer.id);

        let sale = f.sales.create_sale(&ctx, payload).unwrap();
        assert_eq!(sale.customer_id, Some(customer.id));
        assert_eq!(sale.customer_name.as_deref(), Some("João Silva"));
    }

    #[test]
    fn recibo_valida_apenas_na_loja_da_venda() {
        let f = fixture();
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        let mouse = f.inventory.create_product(&ctx, product_payload("mouse", 100, 5)).unwrap();
        let sale = f
            .sales
            .create_sale(
                &ctx,
                sale_payload(vec![NewSaleItem { product_id: mouse.id, quantity: 1, discount: Decimal::ZERO }], 0),
            )
            .unwrap();

        assert!(f.sales.validate_receipt(&ctx, &sale.receipt_code).unwrap());
        assert!(!f.sales.validate_receipt(&ctx, "XXXX-0000").unwrap());

        // na outra loja o mesmo código não valida
        let owner2 = user(Role::StoreOwner(s2));
        let active2 = store(s2);
        let ctx2 = AccessContext::new(Some(&owner2), Some(&active2));
        assert!(!f.sales.validate_receipt(&ctx2, &sale.receipt_code).unwrap());
    }
}
