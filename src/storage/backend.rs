// src/storage/backend.rs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use parking_lot::RwLock;

use crate::common::error::AppError;

// O contrato chave-valor do armazenamento local: chaves nomeadas para
// strings serializadas, sem nenhuma validação. Quem valida é a camada
// tipada acima (`Storage`) e o controle de acesso acima dela.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

// ---
// Backend em memória
// ---
// Usado nos testes e quando nenhum caminho de arquivo é configurado.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

// ---
// Backend em arquivo
// ---
// Um único arquivo JSON com o mapa completo, reescrito inteiro a cada
// gravação (last-write-wins, igual ao armazenamento do navegador).
// Uma única sessão por origem de armazenamento; não há trava entre
// processos.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileBackend {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Falha ao ler o armazenamento em {}", path.display()))?;
            serde_json::from_str(&raw).map_err(|source| AppError::CorruptedData {
                key: path.display().to_string(),
                source,
            })?
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries: RwLock::new(entries) })
    }

    // A gravação não propaga erro: o contrato `set -> void` vem do
    // armazenamento do navegador. Falha de E/S aqui é falha ambiental.
    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("🔥 Falha ao serializar o armazenamento: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            tracing::error!("🔥 Falha ao gravar o armazenamento em {}: {}", self.path.display(), e);
        }
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value);
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write();
        entries.remove(key);
        self.persist(&entries);
    }
}
