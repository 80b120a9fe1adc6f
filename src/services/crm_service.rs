// src/services/crm_service.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;
use crate::models::crm::{Customer, CustomerPayload};
use crate::services::resolve_target_store;
use crate::storage::CustomerRepository;

// Gestão de clientes, com o mesmo gate de isolamento dos produtos.
#[derive(Clone)]
pub struct CrmService {
    customer_repo: CustomerRepository,
}

impl CrmService {
    pub fn new(customer_repo: CustomerRepository) -> Self {
        Self { customer_repo }
    }

    pub fn list_customers(&self, context: &AccessContext) -> Result<Vec<Customer>, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.customer_repo.find_all_by_store(store.id)
    }

    pub fn list_customers_for_store(&self, store_id: Uuid) -> Result<Vec<Customer>, AppError> {
        self.customer_repo.find_all_by_store(store_id)
    }

    pub fn get_customer(&self, context: &AccessContext, customer_id: Uuid) -> Result<Option<Customer>, AppError> {
        let store = context.active_store.ok_or(AppError::NoActiveStore)?;
        self.customer_repo.find_by_id_in_store(customer_id, store.id)
    }

    pub fn create_customer(
        &self,
        context: &AccessContext,
        payload: CustomerPayload,
    ) -> Result<Customer, AppError> {
        payload.validate()?;
        let store_id = resolve_target_store(context, payload.store_id)?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            store_id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            cpf: payload.cpf,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };

        let customer = self.gate_write(customer, context)?;
        self.customer_repo.insert(customer)
    }

    pub fn update_customer(
        &self,
        context: &AccessContext,
        customer_id: Uuid,
        payload: CustomerPayload,
    ) -> Result<Customer, AppError> {
        payload.validate()?;

        let existing =
            self.customer_repo.find_by_id(customer_id)?.ok_or(AppError::CustomerNotFound)?;
        access_control::validate_store_access(existing.store_id, context)?;

        let store_id = context.active_store.map(|s| s.id).unwrap_or(existing.store_id);

        let updated = Customer {
            id: existing.id,
            store_id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            cpf: payload.cpf,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            notes: payload.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        let updated = self.gate_write(updated, context)?;
        self.customer_repo.update(updated)
    }

    pub fn delete_customer(&self, context: &AccessContext, customer_id: Uuid) -> Result<(), AppError> {
        let existing =
            self.customer_repo.find_by_id(customer_id)?.ok_or(AppError::CustomerNotFound)?;
        access_control::validate_store_access(existing.store_id, context)?;
        self.customer_repo.delete(customer_id)
    }

    fn gate_write(&self, customer: Customer, context: &AccessContext) -> Result<Customer, AppError> {
        match context.active_store {
            Some(_) => access_control::enforce_store_id(customer, context),
            None => Ok(customer),
        }
    }
}
