use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use super::TrustStoreError;

/// Locator prefix restricting resolution to bundled resources.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Resources compiled into the application (usually via `include_bytes!`).
#[derive(Clone, Debug, Default)]
pub struct BundledResources {
    resources: HashMap<String, Cow<'static, [u8]>>,
}

impl BundledResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, content: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: &str, content: impl Into<Cow<'static, [u8]>>) {
        self.resources.insert(normalize(name), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.resources.get(&normalize(name)).map(AsRef::as_ref)
    }
}

fn normalize(name: &str) -> String {
    if name.starts_with('/') {
        name.to_owned()
    } else {
        format!("/{name}")
    }
}

/// Resolves `locator` in order: explicit `classpath:` prefix (bundled only),
/// existing filesystem path, bundled resource of the same name.
pub(crate) fn resolve<'a>(
    locator: &str,
    bundled: &'a BundledResources,
) -> Result<Cow<'a, [u8]>, TrustStoreError> {
    let locator = locator.trim();
    let not_found = || TrustStoreError::ResourceNotFound(locator.to_owned());

    if locator.is_empty() {
        return Err(not_found());
    }

    if let Some(name) = locator.strip_prefix(CLASSPATH_PREFIX) {
        return bundled.get(name).map(Cow::Borrowed).ok_or_else(not_found);
    }

    let path = Path::new(locator);
    if path.exists() {
        return Ok(Cow::Owned(std::fs::read(path)?));
    }

    bundled.get(locator).map(Cow::Borrowed).ok_or_else(not_found)
}
