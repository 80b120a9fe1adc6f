// src/storage/sale_repo.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::sales::Sale;
use crate::storage::{KEY_SALES, Storage};

// Vendas nunca são editadas depois de registradas; o repositório só
// insere e lê.
#[derive(Clone)]
pub struct SaleRepository {
    storage: Storage,
}

impl SaleRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        self.storage.read_collection(KEY_SALES)
    }

    pub fn find_all_by_store(&self, store_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = self.find_all()?;
        Ok(sales.into_iter().filter(|s| s.store_id == store_id).collect())
    }

    pub fn find_by_id_in_store(&self, id: Uuid, store_id: Uuid) -> Result<Option<Sale>, AppError> {
        let sales = self.find_all()?;
        Ok(sales.into_iter().find(|s| s.id == id && s.store_id == store_id))
    }

    pub fn find_by_receipt_code(&self, code: &str) -> Result<Option<Sale>, AppError> {
        let sales = self.find_all()?;
        Ok(sales.into_iter().find(|s| s.receipt_code == code))
    }

    pub fn insert(&self, sale: Sale) -> Result<Sale, AppError> {
        let mut sales = self.find_all()?;
        sales.push(sale.clone());
        self.storage.write_collection(KEY_SALES, &sales)?;
        Ok(sale)
    }
}
