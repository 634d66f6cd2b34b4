use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

/// Error type for file transfers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("file transfer failed: {0}")]
    Transfer(String),
}

/// Platform file storage.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, FileError>;

    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<FileInfo, FileError>;
}

/// HashMap-backed file store. Uploads get a UUID v4 file id.
#[derive(Clone, Default)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<HashMap<String, (FileInfo, Vec<u8>)>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under a caller-chosen id.
    pub fn insert(
        &self,
        file_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<FileInfo, FileError> {
        let info = FileInfo {
            file_id: file_id.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            size: content.len() as u64,
        };
        let mut files = self
            .files
            .write()
            .map_err(|_| FileError::Transfer("file table poisoned".into()))?;
        files.insert(file_id.to_string(), (info.clone(), content));
        Ok(info)
    }

    pub fn info(&self, file_id: &str) -> Option<FileInfo> {
        let files = self.files.read().ok()?;
        files.get(file_id).map(|(info, _)| info.clone())
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, FileError> {
        let files = self
            .files
            .read()
            .map_err(|_| FileError::Transfer("file table poisoned".into()))?;
        files
            .get(file_id)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| FileError::NotFound(file_id.to_string()))
    }

    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<FileInfo, FileError> {
        let file_id = uuid::Uuid::new_v4().to_string();
        self.insert(&file_id, file_name, content)
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
