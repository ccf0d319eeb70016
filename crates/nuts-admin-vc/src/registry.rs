//! # Template Registry
//!
//! Immutable map from credential type name to template. Built once at
//! start-up through [`TemplateRegistryBuilder`], which refuses duplicate
//! names instead of letting a later registration shadow an earlier one.
//! Only one definition per name is active in a registry; the name is the
//! one used at request time and may differ from the template's own
//! [`CredentialTemplate::type_name`].

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::template::CredentialTemplate;
use crate::templates::{
    NutsOrganizationCredential, NutsUraCredential2024, NutsUraCredentialV1, UraCredential,
};

/// Errors from building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A template was already registered under this name.
    #[error("credential template already registered: {0}")]
    DuplicateTemplate(String),
}

type Entry = (String, Arc<dyn CredentialTemplate>);

/// Read-only registry of credential templates.
#[derive(Clone)]
pub struct TemplateRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("type_names", &self.type_names())
            .finish()
    }
}

impl TemplateRegistry {
    /// Start building a registry.
    pub fn builder() -> TemplateRegistryBuilder {
        TemplateRegistryBuilder::default()
    }

    /// The templates the console ships with, each under its own type name.
    pub fn standard() -> Self {
        let templates: [Arc<dyn CredentialTemplate>; 4] = [
            Arc::new(NutsOrganizationCredential),
            Arc::new(NutsUraCredentialV1),
            Arc::new(NutsUraCredential2024),
            Arc::new(UraCredential),
        ];
        let entries = templates
            .into_iter()
            .map(|t| (t.type_name().to_string(), t))
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<Entry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Look up a template by type name.
    pub fn get(&self, type_name: &str) -> Option<&dyn CredentialTemplate> {
        self.index
            .get(type_name)
            .map(|&i| self.entries[i].1.as_ref())
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterate over `(name, template)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn CredentialTemplate)> {
        self.entries
            .iter()
            .map(|(name, t)| (name.as_str(), t.as_ref()))
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no templates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`TemplateRegistry`].
#[derive(Default)]
pub struct TemplateRegistryBuilder {
    entries: Vec<Entry>,
}

impl TemplateRegistryBuilder {
    /// Register `template` under `type_name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateTemplate`] if the name is taken.
    pub fn register<T>(mut self, type_name: impl Into<String>, template: T) -> Result<Self, RegistryError>
    where
        T: CredentialTemplate + 'static,
    {
        let type_name = type_name.into();
        if self.entries.iter().any(|(name, _)| *name == type_name) {
            return Err(RegistryError::DuplicateTemplate(type_name));
        }
        self.entries.push((type_name, Arc::new(template)));
        Ok(self)
    }

    /// Register `template` under its own [`CredentialTemplate::type_name`].
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateTemplate`] if the name is taken.
    pub fn register_template<T>(self, template: T) -> Result<Self, RegistryError>
    where
        T: CredentialTemplate + 'static,
    {
        let name = template.type_name().to_string();
        self.register(name, template)
    }

    /// Finish the registry.
    pub fn build(self) -> TemplateRegistry {
        TemplateRegistry::from_entries(self.entries)
    }
}
