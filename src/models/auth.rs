// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// O papel carrega a loja dentro da própria variante: só o super admin
// existe sem loja, e isso agora é garantido pelo tipo, não por um
// campo opcional que "deveria" estar preenchido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "storeId", rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    StoreOwner(Uuid),
    Manager(Uuid),
    Seller(Uuid),
}

impl Role {
    /// A loja à qual o papel está vinculado (`None` apenas para o super admin).
    pub fn store_id(&self) -> Option<Uuid> {
        match self {
            Role::SuperAdmin => None,
            Role::StoreOwner(store_id) | Role::Manager(store_id) | Role::Seller(store_id) => {
                Some(*store_id)
            }
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            Role::SuperAdmin => RoleKind::SuperAdmin,
            Role::StoreOwner(_) => RoleKind::StoreOwner,
            Role::Manager(_) => RoleKind::Manager,
            Role::Seller(_) => RoleKind::Seller,
        }
    }
}

// Versão sem dados do papel, para testes de pertencimento (`has_role`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    SuperAdmin,
    StoreOwner,
    Manager,
    Seller,
}

// Representa um usuário persistido na coleção `users`.
// Diferente de uma API pública, aqui a serialização É o armazenamento,
// então o hash da senha precisa ir junto no JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    #[serde(flatten)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// Dados para criar o usuário dono pareado a uma nova loja
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}
