// src/storage.rs

pub mod backend;

pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::common::error::AppError;
use crate::storage::backend::{FileBackend, KeyValueBackend, MemoryBackend};

// As chaves nomeadas do armazenamento (mesmos nomes da origem dos dados)
pub const KEY_USER: &str = "sales_app_user";
pub const KEY_USERS: &str = "sales_app_users";
pub const KEY_PRODUCTS: &str = "sales_app_products";
pub const KEY_CUSTOMERS: &str = "sales_app_customers";
pub const KEY_SALES: &str = "sales_app_sales";
pub const KEY_STORES: &str = "sales_app_stores";
pub const KEY_ACTIVE_STORE: &str = "sales_app_active_store";

// O handle compartilhado do armazenamento. Cada repositório clona o
// handle, do mesmo jeito que repositórios clonam uma pool de conexões.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueBackend>,
}

impl Storage {
    pub fn memory() -> Self {
        Self { backend: Arc::new(MemoryBackend::new()) }
    }

    pub fn file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Ok(Self { backend: Arc::new(FileBackend::open(path.as_ref())?) })
    }

    pub fn with_backend(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Lê uma coleção inteira. Chave ausente vira coleção vazia;
    /// JSON que não decodifica é erro explícito, nunca default silencioso.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, AppError> {
        match self.backend.get(key) {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|source| AppError::CorruptedData { key: key.to_string(), source }),
        }
    }

    /// Substitui a coleção inteira (last-write-wins, sem merge).
    pub fn write_collection<T: Serialize>(&self, key: &str, values: &[T]) -> Result<(), AppError> {
        let raw = serde_json::to_string(values)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar a coleção '{}': {}", key, e))?;
        self.backend.set(key, raw);
        Ok(())
    }

    /// Lê um slot de sessão. Diferente das coleções, um slot ilegível
    /// degrada para `None`: restaurar a sessão nunca falha visivelmente.
    pub fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Slot de sessão '{}' ilegível, descartando: {}", key, e);
                self.backend.remove(key);
                None
            }
        }
    }

    pub fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar o slot '{}': {}", key, e))?;
        self.backend.set(key, raw);
        Ok(())
    }

    pub fn clear_slot(&self, key: &str) {
        self.backend.remove(key);
    }
}
