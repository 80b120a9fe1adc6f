// src/services/tenancy_service.rs

use bcrypt::hash;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::access_control::{self, AccessContext};
use crate::common::error::AppError;
use crate::models::auth::{OwnerPayload, Role, RoleKind, User};
use crate::models::tenancy::{Store, StorePayload};
use crate::storage::{StoreRepository, UserRepository};

// Provisionamento de lojas: operação exclusiva do super admin.
#[derive(Clone)]
pub struct TenancyService {
    store_repo: StoreRepository,
    user_repo: UserRepository,
}

impl TenancyService {
    pub fn new(store_repo: StoreRepository, user_repo: UserRepository) -> Self {
        Self { store_repo, user_repo }
    }

    /// Cria uma nova loja e o seu usuário dono pareado — o dono nasce
    /// junto com a loja, nunca numa edição posterior. As verificações
    /// (papel, validação, e-mail duplicado) acontecem antes de qualquer
    /// escrita.
    pub fn create_store_with_owner(
        &self,
        context: &AccessContext,
        payload: StorePayload,
        owner: OwnerPayload,
    ) -> Result<(Store, User), AppError> {
        if !access_control::has_role(context.user, &[RoleKind::SuperAdmin]) {
            return Err(AppError::CrossTenantAccess);
        }
        payload.validate()?;
        owner.validate()?;

        if self.user_repo.find_by_email(&owner.email)?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let store = Store {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            is_active: payload.is_active,
            expires_at: payload.expires_at,
            created_at: now,
            updated_at: now,
        };

        let owner_user = User {
            id: Uuid::new_v4(),
            email: owner.email,
            password_hash: hash(&owner.password, bcrypt::DEFAULT_COST)?,
            name: owner.name,
            role: Role::StoreOwner(store.id),
            created_at: now,
        };

        let store = self.store_repo.insert(store)?;
        let owner_user = self.user_repo.insert(owner_user)?;

        tracing::info!("✅ Loja '{}' criada com o dono '{}'", store.name, owner_user.email);
        Ok((store, owner_user))
    }

    /// Edita os dados da loja. Nunca mexe no dono.
    pub fn update_store(
        &self,
        context: &AccessContext,
        store_id: Uuid,
        payload: StorePayload,
    ) -> Result<Store, AppError> {
        if !access_control::has_role(context.user, &[RoleKind::SuperAdmin]) {
            return Err(AppError::CrossTenantAccess);
        }
        payload.validate()?;

        let existing = self.store_repo.find_by_id(store_id)?.ok_or(AppError::StoreNotFound)?;

        let updated = Store {
            id: existing.id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            is_active: payload.is_active,
            expires_at: payload.expires_at,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.store_repo.update(updated)
    }

    /// Exclui a loja e, em cascata, todos os usuários vinculados a ela.
    /// Produtos, clientes e vendas da loja ficam órfãos no armazenamento:
    /// nenhuma leitura escopada volta a alcançá-los.
    pub fn delete_store(&self, context: &AccessContext, store_id: Uuid) -> Result<usize, AppError> {
        if !access_control::has_role(context.user, &[RoleKind::SuperAdmin]) {
            return Err(AppError::CrossTenantAccess);
        }

        self.store_repo.find_by_id(store_id)?.ok_or(AppError::StoreNotFound)?;
        self.store_repo.delete(store_id)?;
        let removed_users = self.user_repo.delete_by_store(store_id)?;

        tracing::info!("Loja {} excluída ({} usuários removidos em cascata)", store_id, removed_users);
        Ok(removed_users)
    }

    /// A lista completa de lojas: visão do painel administrativo.
    pub fn list_stores(&self, context: &AccessContext) -> Result<Vec<Store>, AppError> {
        if !access_control::has_role(context.user, &[RoleKind::SuperAdmin]) {
            return Err(AppError::CrossTenantAccess);
        }
        self.store_repo.find_all()
    }

    /// O dono cadastrado de cada loja (papel `store_owner`), para o
    /// painel exibir as credenciais de acesso.
    pub fn store_owner(&self, context: &AccessContext, store_id: Uuid) -> Result<Option<User>, AppError> {
        if !access_control::has_role(context.user, &[RoleKind::SuperAdmin]) {
            return Err(AppError::CrossTenantAccess);
        }
        let users = self.user_repo.find_by_store(store_id)?;
        Ok(users.into_iter().find(|u| u.role.kind() == RoleKind::StoreOwner))
    }
}
