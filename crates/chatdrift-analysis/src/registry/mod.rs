//! Template registry: static, read-only catalog of known chat templates.
//!
//! Entries live in a `'static` slice defined in `builtin.rs`; there is no
//! initialization step and nothing is ever written after startup.

pub mod builtin;
pub mod types;

pub use types::{Template, TemplateField};

/// Read-only view over the built-in templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRegistry {
    templates: &'static [Template],
}

impl TemplateRegistry {
    /// The process-wide registry of built-in templates.
    pub fn builtin() -> Self {
        Self {
            templates: builtin::TEMPLATES,
        }
    }

    /// Look up a template by exact name.
    pub fn get(&self, name: &str) -> Option<&'static Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Look up a template by name, ignoring ASCII case and surrounding whitespace.
    pub fn resolve(&self, name: &str) -> Option<&'static Template> {
        let name = name.trim();
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All templates in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Template> {
        self.templates.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.templates.iter().map(|t| t.name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn as_slice(&self) -> &'static [Template] {
        self.templates
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
