// src/storage/customer_repo.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::crm::Customer;
use crate::storage::{KEY_CUSTOMERS, Storage};

#[derive(Clone)]
pub struct CustomerRepository {
    storage: Storage,
}

impl CustomerRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        self.storage.read_collection(KEY_CUSTOMERS)
    }

    pub fn find_all_by_store(&self, store_id: Uuid) -> Result<Vec<Customer>, AppError> {
        let customers = self.find_all()?;
        Ok(customers.into_iter().filter(|c| c.store_id == store_id).collect())
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customers = self.find_all()?;
        Ok(customers.into_iter().find(|c| c.id == id))
    }

    pub fn find_by_id_in_store(&self, id: Uuid, store_id: Uuid) -> Result<Option<Customer>, AppError> {
        let customers = self.find_all()?;
        Ok(customers.into_iter().find(|c| c.id == id && c.store_id == store_id))
    }

    pub fn insert(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut customers = self.find_all()?;
        customers.push(customer.clone());
        self.storage.write_collection(KEY_CUSTOMERS, &customers)?;
        Ok(customer)
    }

    pub fn update(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut customers = self.find_all()?;
        let slot = customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(AppError::CustomerNotFound)?;
        *slot = customer.clone();
        self.storage.write_collection(KEY_CUSTOMERS, &customers)?;
        Ok(customer)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let customers = self.find_all()?;
        let remaining: Vec<Customer> = customers.into_iter().filter(|c| c.id != id).collect();
        self.storage.write_collection(KEY_CUSTOMERS, &remaining)?;
        Ok(())
    }

    pub fn save_all(&self, customers: &[Customer]) -> Result<(), AppError> {
        self.storage.write_collection(KEY_CUSTOMERS, customers)
    }
}
