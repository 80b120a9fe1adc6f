// src/storage/product_repo.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::inventory::Product;
use crate::storage::{KEY_PRODUCTS, Storage};

#[derive(Clone)]
pub struct ProductRepository {
    storage: Storage,
}

impl ProductRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> Result<Vec<Product>, AppError> {
        self.storage.read_collection(KEY_PRODUCTS)
    }

    // Leitura com escopo de loja: filtra por igualdade de storeId.
    // Registro de outra loja simplesmente não aparece; não é erro.
    pub fn find_all_by_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = self.find_all()?;
        Ok(products.into_iter().filter(|p| p.store_id == store_id).collect())
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let products = self.find_all()?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    pub fn find_by_id_in_store(&self, id: Uuid, store_id: Uuid) -> Result<Option<Product>, AppError> {
        let products = self.find_all()?;
        Ok(products.into_iter().find(|p| p.id == id && p.store_id == store_id))
    }

    pub fn insert(&self, product: Product) -> Result<Product, AppError> {
        let mut products = self.find_all()?;
        products.push(product.clone());
        self.storage.write_collection(KEY_PRODUCTS, &products)?;
        Ok(product)
    }

    pub fn update(&self, product: Product) -> Result<Product, AppError> {
        let mut products = self.find_all()?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(AppError::ProductNotFound)?;
        *slot = product.clone();
        self.storage.write_collection(KEY_PRODUCTS, &products)?;
        Ok(product)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let products = self.find_all()?;
        let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
        self.storage.write_collection(KEY_PRODUCTS, &remaining)?;
        Ok(())
    }

    pub fn save_all(&self, products: &[Product]) -> Result<(), AppError> {
        self.storage.write_collection(KEY_PRODUCTS, products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(store_id: Uuid, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            store_id,
            name: name.into(),
            description: String::new(),
            sku: format!("SKU-{}", name),
            price: Decimal::from(10),
            cost: Decimal::from(5),
            stock: 3,
            category: "Geral".into(),
            image: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn leitura_escopada_filtra_por_loja() {
        let repo = ProductRepository::new(Storage::memory());
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let p1 = repo.insert(product(s1, "mouse")).unwrap();
        repo.insert(product(s2, "teclado")).unwrap();

        let of_s1 = repo.find_all_by_store(s1).unwrap();
        assert_eq!(of_s1.len(), 1);
        assert_eq!(of_s1[0].id, p1.id);

        // id certo, loja errada: ausente, não erro
        assert!(repo.find_by_id_in_store(p1.id, s2).unwrap().is_none());
        assert!(repo.find_by_id_in_store(p1.id, s1).unwrap().is_some());
    }

    #[test]
    fn leituras_repetidas_sao_idempotentes() {
        let repo = ProductRepository::new(Storage::memory());
        let s1 = Uuid::new_v4();
        repo.insert(product(s1, "mouse")).unwrap();

        let first = repo.find_all_by_store(s1).unwrap();
        let second = repo.find_all_by_store(s1).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].id, second[0].id);
    }
}
