// src/common/receipt.rs

use chrono::Utc;
use uuid::Uuid;

use crate::models::sales::Sale;

/// Gera o código de validação de um recibo: prefixo temporal em base 36
/// mais um sufixo aleatório curto. Resistente a colisões o suficiente para
/// consulta humana; nunca é usado como chave primária.
pub fn generate_receipt_code() -> String {
    let prefix = to_base36(Utc::now().timestamp_millis() as u64);
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, random[..4].to_uppercase())
}

/// Versão de exibição do código (espaços no lugar de hífens).
pub fn format_receipt_code(code: Option<&str>) -> String {
    match code {
        Some(code) => code.replace('-', " "),
        None => "N/A".to_string(),
    }
}

/// Confere se um código pertence a alguma venda da coleção informada.
pub fn validate_receipt_code(code: &str, sales: &[Sale]) -> bool {
    sales.iter().any(|sale| sale.receipt_code == code)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out.iter().rev().collect()
}
