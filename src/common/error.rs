// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todas as falhas de acesso e de sessão são valores de retorno,
// nunca panics: quem chama exibe a mensagem e segue em frente.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Controle de acesso / isolamento por loja ---
    #[error("Usuário não autenticado")]
    Unauthenticated,

    #[error("Nenhuma loja ativa selecionada")]
    NoActiveStore,

    #[error("Contexto de autenticação inválido")]
    InvalidContext,

    #[error("Acesso negado: você não tem permissão para acessar dados desta loja")]
    CrossTenantAccess,

    #[error("Acesso negado: você só pode criar/modificar dados da sua loja")]
    CrossTenantWrite,

    // --- Login / sessão ---
    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Loja não encontrada")]
    StoreNotFound,

    #[error("Esta loja está bloqueada. Entre em contato com o administrador.")]
    StoreBlocked,

    #[error("O acesso desta loja expirou. Entre em contato com o administrador.")]
    StoreExpired,

    // --- Regras de negócio das coleções ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Estoque insuficiente para o produto '{0}'")]
    InsufficientStock(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Dados persistidos que não decodificam mais: falha ambiental,
    // não adianta tentar de novo sem intervenção externa.
    #[error("Dados persistidos corrompidos na chave '{key}'")]
    CorruptedData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    Internal(#[from] anyhow::Error),
}
