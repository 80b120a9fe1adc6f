// src/storage/user_repo.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::User;
use crate::storage::{KEY_USERS, Storage};

// O repositório de usuários, responsável por todas as interações com a
// coleção 'users'.
#[derive(Clone)]
pub struct UserRepository {
    storage: Storage,
}

impl UserRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.storage.read_collection(KEY_USERS)
    }

    // Busca um usuário pelo seu e-mail
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.find_all()?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    // Busca um usuário pelo seu ID
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.find_all()?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    // Usuários vinculados a uma loja (o dono e eventuais funcionários)
    pub fn find_by_store(&self, store_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = self.find_all()?;
        Ok(users.into_iter().filter(|u| u.role.store_id() == Some(store_id)).collect())
    }

    // Cria um novo usuário, com tratamento específico para e-mail duplicado.
    pub fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self.find_all()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        users.push(user.clone());
        self.storage.write_collection(KEY_USERS, &users)?;
        Ok(user)
    }

    pub fn save_all(&self, users: &[User]) -> Result<(), AppError> {
        self.storage.write_collection(KEY_USERS, users)
    }

    // Remove todos os usuários vinculados à loja; retorna quantos saíram.
    pub fn delete_by_store(&self, store_id: Uuid) -> Result<usize, AppError> {
        let users = self.find_all()?;
        let before = users.len();
        let remaining: Vec<User> =
            users.into_iter().filter(|u| u.role.store_id() != Some(store_id)).collect();
        let removed = before - remaining.len();
        self.storage.write_collection(KEY_USERS, &remaining)?;
        Ok(removed)
    }
}
