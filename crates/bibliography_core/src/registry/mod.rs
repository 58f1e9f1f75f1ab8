//! Citation template registry.
//!
//! # Responsibility
//! - Own the catalogue of citation templates and look them up by name.
//! - Expose names in registration order for pickers.
//!
//! # Invariants
//! - Template names are unique.
//! - Registration is the only mutation; nothing is removed or replaced.
//! - A built registry is shared read-only (`Arc<TemplateRegistry>`).

mod catalog;

use crate::model::template::{CitationTemplate, TemplateError};
use log::{error, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another template already uses this name. Fatal at startup.
    DuplicateName(String),
    /// A template declaration is invalid. Fatal at startup.
    InvalidTemplate(TemplateError),
    /// No template has this name; persisted or remote data is corrupt.
    NotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "template already registered: {name}"),
            Self::InvalidTemplate(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "template not found: {name}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTemplate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TemplateError> for RegistryError {
    fn from(value: TemplateError) -> Self {
        Self::InvalidTemplate(value)
    }
}

/// Lookup table of citation templates.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<CitationTemplate>,
    by_name: HashMap<String, usize>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry of built-in citation styles.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for template in catalog::builtin_templates()? {
            registry.register(template)?;
        }
        info!(
            "event=registry_build module=registry status=ok templates={}",
            registry.len()
        );
        Ok(registry)
    }

    /// Adds one template.
    ///
    /// # Errors
    /// - `DuplicateName` when the name is already registered.
    pub fn register(&mut self, template: CitationTemplate) -> Result<(), RegistryError> {
        let name = template.name().to_string();
        if self.by_name.contains_key(&name) {
            error!("event=template_register module=registry status=error reason=duplicate_name");
            return Err(RegistryError::DuplicateName(name));
        }
        self.by_name.insert(name, self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Looks up a template by exact name.
    pub fn lookup(&self, name: &str) -> Result<&CitationTemplate, RegistryError> {
        self.by_name
            .get(name)
            .map(|index| &self.templates[*index])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns template names in registration order.
    pub fn all_names(&self) -> Vec<&str> {
        self.templates.iter().map(CitationTemplate::name).collect()
    }

    /// Iterates templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CitationTemplate> {
        self.templates.iter()
    }

    /// Filters names by case-insensitive substring, keeping registration order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.templates
            .iter()
            .map(CitationTemplate::name)
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Returns the first search hit, as picked when the search box is activated.
    pub fn first_match(&self, query: &str) -> Option<&CitationTemplate> {
        let needle = query.to_lowercase();
        self.templates
            .iter()
            .find(|template| template.name().to_lowercase().contains(&needle))
    }

    /// Templates a browser bookmark can be imported into.
    pub fn web_templates(&self) -> Vec<&CitationTemplate> {
        self.templates
            .iter()
            .filter(|template| template.web_fields().is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistryError, TemplateRegistry};
    use crate::format::Formatter;
    use crate::model::template::CitationTemplate;

    fn template(name: &str) -> CitationTemplate {
        CitationTemplate::declare(name, "Title:x", Formatter::basic("<i>{}</i>")).unwrap()
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut registry = TemplateRegistry::new();
        registry.register(template("Book")).unwrap();
        assert_eq!(
            registry.register(template("Book")),
            Err(RegistryError::DuplicateName("Book".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_reports_missing_names() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.lookup("Scroll").unwrap_err(),
            RegistryError::NotFound("Scroll".to_string())
        );
    }

    #[test]
    fn names_keep_registration_order() {
        let mut registry = TemplateRegistry::new();
        for name in ["Zine", "Atlas", "Map"] {
            registry.register(template(name)).unwrap();
        }
        assert_eq!(registry.all_names(), vec!["Zine", "Atlas", "Map"]);
        assert_eq!(registry.search("A"), vec!["Atlas", "Map"]);
        assert_eq!(registry.first_match("a").map(|t| t.name()), Some("Atlas"));
        assert!(registry.first_match("globe").is_none());
    }
}
