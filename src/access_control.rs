// src/access_control.rs
//
// A única autoridade de isolamento entre lojas. O armazenamento não
// filtra nada sozinho: toda mutação de coleção passa por
// `enforce_store_id` antes de persistir, e toda leitura "da loja atual"
// filtra por storeId. Caminho que grava direto no armazenamento sem
// passar por aqui é, por construção, um furo de isolamento.

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::{RoleKind, User};
use crate::models::tenancy::{Store, TenantScoped};

// O contexto explícito de acesso: quem está logado e qual loja está
// ativa. Passado por referência em toda chamada; não existe estado
// ambiente escondido.
#[derive(Debug, Clone, Copy)]
pub struct AccessContext<'a> {
    pub user: Option<&'a User>,
    pub active_store: Option<&'a Store>,
}

impl<'a> AccessContext<'a> {
    pub fn new(user: Option<&'a User>, active_store: Option<&'a Store>) -> Self {
        Self { user, active_store }
    }
}

// Verifica se o usuário pode acessar uma loja específica
pub fn can_access_store(user: Option<&User>, store_id: Uuid) -> bool {
    let Some(user) = user else { return false };

    // Super admin acessa qualquer loja
    if user.role.is_super_admin() {
        return true;
    }

    // Os demais papéis só acessam a própria loja
    user.role.store_id() == Some(store_id)
}

// Verifica se o usuário pode executar operações administrativas
pub fn is_admin(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role.is_super_admin())
}

// Valida que um storeId corresponde à loja ativa do contexto
pub fn validate_store_access(record_store_id: Uuid, context: &AccessContext) -> Result<(), AppError> {
    let user = context.user.ok_or(AppError::Unauthenticated)?;
    let active_store = context.active_store.ok_or(AppError::NoActiveStore)?;

    // Super admin acessa qualquer loja
    if user.role.is_super_admin() {
        return Ok(());
    }

    if record_store_id != active_store.id {
        return Err(AppError::CrossTenantAccess);
    }

    Ok(())
}

// Garante que um registro sendo criado/atualizado carrega o storeId
// correto. Para o super admin o registro passa intocado (ele pode
// mirar qualquer loja); para os demais, storeId diferente da loja
// ativa é recusado.
pub fn enforce_store_id<T: TenantScoped>(record: T, context: &AccessContext) -> Result<T, AppError> {
    let (Some(user), Some(active_store)) = (context.user, context.active_store) else {
        return Err(AppError::InvalidContext);
    };

    if user.role.is_super_admin() {
        return Ok(record);
    }

    if record.store_id() != active_store.id {
        return Err(AppError::CrossTenantWrite);
    }

    Ok(record)
}

// Verifica se o usuário pode modificar um registro específico
pub fn can_modify_record(record_store_id: Uuid, context: &AccessContext) -> bool {
    let Some(user) = context.user else { return false };

    if user.role.is_super_admin() {
        return true;
    }

    context.active_store.map(|s| s.id) == Some(record_store_id)
}

// Verifica se o usuário pode excluir um registro específico.
// Mesma política da modificação, por enquanto.
pub fn can_delete_record(record_store_id: Uuid, context: &AccessContext) -> bool {
    can_modify_record(record_store_id, context)
}

// Valida que o usuário tem um dos papéis exigidos
pub fn has_role(user: Option<&User>, allowed: &[RoleKind]) -> bool {
    user.is_some_and(|u| allowed.contains(&u.role.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::models::inventory::Product;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "u@teste.com".into(),
            password_hash: "hash".into(),
            name: "Usuário".into(),
            role,
            created_at: Utc::now(),
        }
    }

    fn store(id: Uuid) -> Store {
        let now = Utc::now();
        Store {
            id,
            name: "Loja".into(),
            email: "loja@teste.com".into(),
            phone: None,
            address: None,
            is_active: true,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn product(store_id: Uuid) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            store_id,
            name: "Produto".into(),
            description: String::new(),
            sku: "SKU-1".into(),
            price: Decimal::from(10),
            cost: Decimal::from(4),
            stock: 1,
            category: "Geral".into(),
            image: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sem_usuario_nao_ha_acesso() {
        let s1 = Uuid::new_v4();
        assert!(!can_access_store(None, s1));
        assert!(!is_admin(None));
        assert!(!has_role(None, &[RoleKind::SuperAdmin]));

        let ctx = AccessContext::new(None, None);
        assert!(!can_modify_record(s1, &ctx));
        assert!(!can_delete_record(s1, &ctx));
        assert!(matches!(validate_store_access(s1, &ctx), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn super_admin_acessa_qualquer_loja() {
        let admin = user(Role::SuperAdmin);
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        assert!(can_access_store(Some(&admin), s1));
        assert!(can_access_store(Some(&admin), s2));
        assert!(is_admin(Some(&admin)));
    }

    #[test]
    fn dono_so_acessa_a_propria_loja() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        assert!(can_access_store(Some(&owner), s1));
        assert!(!can_access_store(Some(&owner), s2));
        assert!(!is_admin(Some(&owner)));
    }

    #[test]
    fn validacao_exige_loja_ativa() {
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let ctx = AccessContext::new(Some(&owner), None);
        assert!(matches!(validate_store_access(s1, &ctx), Err(AppError::NoActiveStore)));
    }

    #[test]
    fn validacao_para_nao_admin_e_igualdade_de_loja() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        assert!(validate_store_access(s1, &ctx).is_ok());
        assert!(matches!(validate_store_access(s2, &ctx), Err(AppError::CrossTenantAccess)));
    }

    #[test]
    fn validacao_para_admin_ignora_a_loja_alvo() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let admin = user(Role::SuperAdmin);
        let active = store(s1);
        let ctx = AccessContext::new(Some(&admin), Some(&active));

        assert!(validate_store_access(s2, &ctx).is_ok());
    }

    #[test]
    fn enforce_exige_usuario_e_loja_ativa() {
        let s1 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);

        let sem_usuario = AccessContext::new(None, Some(&active));
        assert!(matches!(
            enforce_store_id(product(s1), &sem_usuario),
            Err(AppError::InvalidContext)
        ));

        let sem_loja = AccessContext::new(Some(&owner), None);
        assert!(matches!(enforce_store_id(product(s1), &sem_loja), Err(AppError::InvalidContext)));
    }

    #[test]
    fn enforce_recusa_escrita_em_outra_loja() {
        // Cenário: dono de s1 tenta salvar um produto com storeId s2
        // enquanto a loja ativa é s1
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        assert!(matches!(enforce_store_id(product(s2), &ctx), Err(AppError::CrossTenantWrite)));

        let ok = enforce_store_id(product(s1), &ctx).unwrap();
        assert_eq!(ok.store_id, s1);
    }

    #[test]
    fn enforce_deixa_admin_mirar_qualquer_loja() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let admin = user(Role::SuperAdmin);
        let active = store(s1);
        let ctx = AccessContext::new(Some(&admin), Some(&active));

        let p = enforce_store_id(product(s2), &ctx).unwrap();
        assert_eq!(p.store_id, s2);
    }

    #[test]
    fn modificacao_e_exclusao_compartilham_a_politica() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let owner = user(Role::StoreOwner(s1));
        let active = store(s1);
        let ctx = AccessContext::new(Some(&owner), Some(&active));

        assert!(can_modify_record(s1, &ctx));
        assert!(!can_modify_record(s2, &ctx));
        assert_eq!(can_delete_record(s1, &ctx), can_modify_record(s1, &ctx));
        assert_eq!(can_delete_record(s2, &ctx), can_modify_record(s2, &ctx));

        let admin = user(Role::SuperAdmin);
        let ctx_admin = AccessContext::new(Some(&admin), None);
        assert!(can_modify_record(s2, &ctx_admin));
        assert!(can_delete_record(s2, &ctx_admin));
    }

    #[test]
    fn has_role_testa_pertencimento() {
        let s1 = Uuid::new_v4();
        let seller = user(Role::Seller(s1));
        assert!(has_role(Some(&seller), &[RoleKind::Seller, RoleKind::Manager]));
        assert!(!has_role(Some(&seller), &[RoleKind::SuperAdmin]));
    }
}
