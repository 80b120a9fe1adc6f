// src/services/inventory_service.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;
use crate::models::inventory::{Product, ProductPayload};
use crate::services::resolve_target_store;
use crate::storage::ProductRepository;

// CRUD de produtos atrás do gate de isolamento. Toda mutação passa por
// `enforce_store_id`/`validate_store_access` antes de tocar no
// armazenamento.
#[derive(Clone)]
pub struct InventoryService {
    product_repo: ProductRepository,
}

impl InventoryService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    /// Os produtos da loja ativa.
    pub fn list_products(&self, context: &AccessContext) -> Result<Vec<Product>, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.product_repo.find_all_by_store(store.id)
    }

    /// Leitura escopada com alvo explícito: mesmo para o super admin o
    /// filtro por loja continua valendo.
    pub fn list_products_for_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.product_repo.find_all_by_store(store_id)
    }

    pub fn get_product(&self, context: &AccessContext, product_id: Uuid) -> Result<Option<Product>, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.product_repo.find_by_id_in_store(product_id, store.id)
    }

    pub fn create_product(
        &self,
        context: &AccessContext,
        payload: ProductPayload,
    ) -> Result<Product, AppError> {
        payload.validate()?;
        let store_id = resolve_target_store(context, payload.store_id)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            name: payload.name,
            description: payload.description,
            sku: payload.sku,
            price: payload.price,
            cost: payload.cost,
            stock: payload.stock,
            category: payload.category,
            image: payload.image,
            active: payload.active,
            created_at: now,
            updated_at: now,
        };

        let product = self.gate_write(product, context)?;
        self.product_repo.insert(product)
    }

    pub fn update_product(
        &self,
        context: &AccessContext,
        product_id: Uuid,
        payload: ProductPayload,
    ) -> Result<Product, AppError> {
        payload.validate()?;

        let existing = self.product_repo.find_by_id(product_id)?.ok_or(AppError::ProductNotFound)?;
        access_control::validate_store_access(existing.store_id, context)?;

        // A loja ativa é carimbada de novo na edição; para não-admin a
        // validação acima já garantiu que é a mesma.
        let store_id = context.active_store.map(|s| s.id).unwrap_or(existing.store_id);

        let updated = Product {
            id: existing.id,
            store_id,
            name: payload.name,
            description: payload.description,
            sku: payload.sku,
            price: payload.price,
            cost: payload.cost,
            stock: payload.stock,
            category: payload.category,
            image: payload.image,
            active: payload.active,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        let updated = self.gate_write(updated, context)?;
        self.product_repo.update(updated)
    }

    pub fn delete_product(&self, context: &AccessContext, product_id: Uuid) -> Result<(), AppError> {
        let existing = self.product_repo.find_by_id(product_id)?.ok_or(AppError::ProductNotFound)?;
        access_control::validate_store_access(existing.store_id, context)?;
        self.product_repo.delete(product_id)
    }

    // O gate de escrita. Sem loja ativa só o super admin chega aqui
    // (com alvo explícito já resolvido), e para ele o registro passa
    // intocado de qualquer forma.
    fn gate_write(&self, product: Product, context: &AccessContext) -> Result<Product, AppError> {
        match context.active_store {
            Some(_) => access_control::enforce_store_id(product, context),
            None => Ok(product),
        }
    }
}
