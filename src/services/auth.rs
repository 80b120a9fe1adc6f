// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use uuid::Uuid;

use crate::access_control::AccessContext;
use crate::common::error::AppError;
use crate::config::AppConfig;
use crate::models::auth::{Role, User};
use crate::models::tenancy::Store;
use crate::storage::{KEY_ACTIVE_STORE, KEY_USER, Storage, StoreRepository, UserRepository};

// O estado de sessão, explícito e passado por referência: nada de
// singleton de processo. `ready` indica que a restauração inicial já
// rodou (a apresentação espera por isso antes de decidir a rota).
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current_user: Option<User>,
    pub active_store: Option<Store>,
    pub ready: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// O contexto que o controle de acesso consome.
    pub fn context(&self) -> AccessContext<'_> {
        AccessContext::new(self.current_user.as_ref(), self.active_store.as_ref())
    }
}

// A máquina de estados de login/sessão. Falha sempre como valor de
// retorno; nenhuma transição entra em panic.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    store_repo: StoreRepository,
    storage: Storage,
    config: AppConfig,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        store_repo: StoreRepository,
        storage: Storage,
        config: AppConfig,
    ) -> Self {
        Self { user_repo, store_repo, storage, config }
    }

    pub fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<(), AppError> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        // A conta fixa do super admin vem da configuração, não da coleção
        if email == self.config.super_admin_email && password == self.config.super_admin_password {
            let admin = self.find_or_create_super_admin()?;
            self.storage.write_slot(KEY_USER, &admin)?;
            session.current_user = Some(admin);
            session.active_store = None;
            tracing::info!("✅ Super admin autenticado");
            return Ok(());
        }

        let user = self
            .user_repo
            .find_by_email(email)?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        match user.role.store_id() {
            Some(store_id) => {
                let store = self
                    .store_repo
                    .find_by_id(store_id)?
                    .ok_or(AppError::StoreNotFound)?;

                if !store.is_accessible() {
                    // Bloqueio tem precedência sobre expiração na mensagem
                    if !store.is_active {
                        return Err(AppError::StoreBlocked);
                    }
                    return Err(AppError::StoreExpired);
                }

                self.storage.write_slot(KEY_USER, &user)?;
                self.storage.write_slot(KEY_ACTIVE_STORE, &store)?;
                tracing::info!("✅ Usuário '{}' autenticado na loja '{}'", user.email, store.name);
                session.current_user = Some(user);
                session.active_store = Some(store);
            }
            None => {
                // Papel sem loja vinculada: alcançável apenas para dados
                // fora do conjunto atual de papéis, mas o contrato prevê.
                self.storage.write_slot(KEY_USER, &user)?;
                session.current_user = Some(user);
                session.active_store = None;
            }
        }

        Ok(())
    }

    /// Reconstrói a sessão a partir dos slots persistidos. Roda uma vez
    /// na inicialização; estado inconsistente degrada em silêncio para
    /// "deslogado" ou "logado sem loja", nunca para erro.
    pub fn restore_session(&self) -> Session {
        let mut session = Session::default();

        if let Some(user) = self.storage.read_slot::<User>(KEY_USER) {
            if !user.role.is_super_admin() {
                if let Some(store) = self.storage.read_slot::<Store>(KEY_ACTIVE_STORE) {
                    if store.is_accessible() {
                        session.active_store = Some(store);
                    } else {
                        // Autocorreção de dado velho: limpa só o slot da
                        // loja; o usuário continua logado.
                        tracing::warn!(
                            "Loja ativa persistida não está mais acessível; limpando o slot"
                        );
                        self.storage.clear_slot(KEY_ACTIVE_STORE);
                    }
                }
            }
            session.current_user = Some(user);
        }

        session.ready = true;
        session
    }

    /// Limpa os dois slots, incondicionalmente. Nunca falha.
    pub fn logout(&self, session: &mut Session) {
        session.current_user = None;
        session.active_store = None;
        self.storage.clear_slot(KEY_USER);
        self.storage.clear_slot(KEY_ACTIVE_STORE);
    }

    /// Troca explícita de loja ativa (o super admin usa para inspecionar
    /// uma loja específica).
    pub fn set_active_store(
        &self,
        session: &mut Session,
        store: Option<Store>,
    ) -> Result<(), AppError> {
        match &store {
            Some(store) => self.storage.write_slot(KEY_ACTIVE_STORE, store)?,
            None => self.storage.clear_slot(KEY_ACTIVE_STORE),
        }
        session.active_store = store;
        Ok(())
    }

    fn find_or_create_super_admin(&self) -> Result<User, AppError> {
        if let Some(user) = self.user_repo.find_by_email(&self.config.super_admin_email)? {
            return Ok(user);
        }

        let admin = User {
            id: Uuid::new_v4(),
            email: self.config.super_admin_email.clone(),
            password_hash: hash(&self.config.super_admin_password, bcrypt::DEFAULT_COST)?,
            name: "Super Admin".to_string(),
            role: Role::SuperAdmin,
            created_at: Utc::now(),
        };
        self.user_repo.insert(admin)
    }
}
