//! Trust anchors used by outbound calls to the signature provider.
//!
//! The trust material is loaded once per [`TrustContext`]: the first successful
//! [`TrustContext::ensure`] copies the resolved resource into a private temporary
//! file and publishes the resulting [`TrustState`]. Later calls, concurrent or
//! not, return the published state without touching the filesystem.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, OnceLock, PoisonError};

use secrecy::SecretString;
use serde::Deserialize;
use tempfile::TempPath;
use thiserror::Error;

use crate::error::ErrorCode;

pub mod resource;

pub use resource::BundledResources;

pub const DEFAULT_STORE_TYPE: &str = "JKS";

static GLOBAL_CONTEXT: LazyLock<Arc<TrustContext>> =
    LazyLock::new(|| Arc::new(TrustContext::new()));

#[derive(Debug, Error)]
pub enum TrustStoreError {
    #[error("TrustStore resource not found: `{0}`")]
    ResourceNotFound(String),
    #[error("Error initializing truststore: `{0}`")]
    Io(#[from] std::io::Error),
}

impl TrustStoreError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ResourceNotFound(_) => ErrorCode::ResourceNotFound,
            Self::Io(_) => ErrorCode::TrustStore,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default = "default_resource")]
    pub resource: String,
    #[serde(default = "default_password")]
    pub password: SecretString,
    #[serde(default, rename = "type")]
    pub store_type: Option<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            resource: default_resource(),
            password: default_password(),
            store_type: None,
        }
    }
}

fn default_resource() -> String {
    "/truststore.jks".to_owned()
}

fn default_password() -> SecretString {
    SecretString::from(String::new())
}

#[derive(Debug)]
enum Location {
    Temporary(TempPath),
    External(PathBuf),
}

/// Trust material as seen by the transport layer.
#[derive(Debug)]
pub struct TrustState {
    location: Location,
    password: SecretString,
    store_type: String,
}

impl TrustState {
    /// Trust material established outside of this crate.
    pub fn external(path: PathBuf, password: SecretString, store_type: &str) -> Self {
        Self {
            location: Location::External(path),
            password,
            store_type: store_type.to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        match &self.location {
            Location::Temporary(path) => path,
            Location::External(path) => path,
        }
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn store_type(&self) -> &str {
        &self.store_type
    }
}

pub struct TrustContext {
    state: OnceLock<TrustState>,
    init_lock: Mutex<()>,
    temp_dir: Option<PathBuf>,
}

impl Default for TrustContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustContext {
    pub fn new() -> Self {
        Self {
            state: OnceLock::new(),
            init_lock: Mutex::new(()),
            temp_dir: None,
        }
    }

    /// Context placing its temporary trust store under `dir`.
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
            ..Self::new()
        }
    }

    /// Process-wide context.
    pub fn global() -> Arc<TrustContext> {
        GLOBAL_CONTEXT.clone()
    }

    pub fn state(&self) -> Option<&TrustState> {
        self.state.get()
    }

    /// Publishes externally established trust material.
    ///
    /// Returns `false` if the context was already initialized, in which case the
    /// existing state is kept.
    pub fn adopt(&self, state: TrustState) -> bool {
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.state.set(state).is_ok()
    }

    pub fn ensure(
        &self,
        params: &Params,
        bundled: &BundledResources,
    ) -> Result<&TrustState, TrustStoreError> {
        if let Some(state) = self.state.get() {
            return Ok(state);
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = self.state.get() {
            return Ok(state);
        }

        let state = self.load(params, bundled)?;
        Ok(self.state.get_or_init(|| state))
    }

    fn load(
        &self,
        params: &Params,
        bundled: &BundledResources,
    ) -> Result<TrustState, TrustStoreError> {
        let store_type = params
            .store_type
            .as_deref()
            .map(str::trim)
            .filter(|store_type| !store_type.is_empty())
            .unwrap_or(DEFAULT_STORE_TYPE);

        tracing::debug!(
            "Loading truststore (resource='{}', type='{}')...",
            params.resource,
            store_type
        );

        let content = resource::resolve(&params.resource, bundled).inspect_err(|error| {
            tracing::error!("Error initializing truststore from '{}': {error}", params.resource)
        })?;

        let suffix = format!(".{}", store_type.to_lowercase());
        let mut builder = tempfile::Builder::new();
        builder.prefix("truststore").suffix(&suffix);
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(&content)?;
        file.flush()?;

        let path = file.into_temp_path();
        tracing::info!("Truststore initialized at temporary location: {}", path.display());

        Ok(TrustState {
            location: Location::Temporary(path),
            password: params.password.clone(),
            store_type: store_type.to_owned(),
        })
    }
}
