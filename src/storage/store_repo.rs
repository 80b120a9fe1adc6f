// src/storage/store_repo.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::tenancy::Store;
use crate::storage::{KEY_STORES, Storage};

#[derive(Clone)]
pub struct StoreRepository {
    storage: Storage,
}

impl StoreRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> Result<Vec<Store>, AppError> {
        self.storage.read_collection(KEY_STORES)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, AppError> {
        let stores = self.find_all()?;
        Ok(stores.into_iter().find(|s| s.id == id))
    }

    pub fn insert(&self, store: Store) -> Result<Store, AppError> {
        let mut stores = self.find_all()?;
        stores.push(store.clone());
        self.storage.write_collection(KEY_STORES, &stores)?;
        Ok(store)
    }

    // Substitui a loja de mesmo id
    pub fn update(&self, store: Store) -> Result<Store, AppError> {
        let mut stores = self.find_all()?;
        let slot = stores
            .iter_mut()
            .find(|s| s.id == store.id)
            .ok_or(AppError::StoreNotFound)?;
        *slot = store.clone();
        self.storage.write_collection(KEY_STORES, &stores)?;
        Ok(store)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let stores = self.find_all()?;
        let remaining: Vec<Store> = stores.into_iter().filter(|s| s.id != id).collect();
        self.storage.write_collection(KEY_STORES, &remaining)?;
        Ok(())
    }
}
