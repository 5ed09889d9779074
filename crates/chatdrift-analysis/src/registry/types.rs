//! Core types for the template registry.

use std::fmt;

use serde::Serialize;

/// A chat template: the literal markers that delimit each conversational turn.
///
/// An empty prefix/suffix means the template places no marker there (e.g. the
/// assistant reply in LLaMA-2 follows `[/INST]` directly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Unique registry key (e.g., "chatml", "llama2").
    pub name: &'static str,
    pub bos_token: Option<&'static str>,
    pub eos_token: Option<&'static str>,
    pub user_prefix: &'static str,
    pub user_suffix: &'static str,
    pub assistant_prefix: &'static str,
    pub assistant_suffix: &'static str,
    pub system_prefix: Option<&'static str>,
    pub system_suffix: Option<&'static str>,
}

impl Template {
    /// Markers that must all be present for text to be attributed to this template.
    pub fn required_markers(&self) -> impl Iterator<Item = &'static str> {
        [
            self.bos_token,
            self.eos_token,
            Some(self.user_prefix),
            Some(self.user_suffix),
            Some(self.assistant_prefix),
            Some(self.assistant_suffix),
        ]
        .into_iter()
        .flatten()
        .filter(|m| !m.is_empty())
    }

    /// Markers that count as evidence when present but are not required.
    pub fn optional_markers(&self) -> impl Iterator<Item = &'static str> {
        [self.system_prefix, self.system_suffix]
            .into_iter()
            .flatten()
            .filter(|m| !m.is_empty())
    }

    /// Value of one structural field. Empty markers read as absent.
    pub fn field(&self, field: TemplateField) -> Option<&'static str> {
        let value = match field {
            TemplateField::BosToken => self.bos_token,
            TemplateField::EosToken => self.eos_token,
            TemplateField::UserPrefix => Some(self.user_prefix),
            TemplateField::UserSuffix => Some(self.user_suffix),
            TemplateField::AssistantPrefix => Some(self.assistant_prefix),
            TemplateField::AssistantSuffix => Some(self.assistant_suffix),
            TemplateField::SystemPrefix => self.system_prefix,
            TemplateField::SystemSuffix => self.system_suffix,
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn supports_system_prompt(&self) -> bool {
        self.field(TemplateField::SystemPrefix).is_some()
    }
}

/// The structural fields of a template, in comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    BosToken,
    EosToken,
    UserPrefix,
    UserSuffix,
    AssistantPrefix,
    AssistantSuffix,
    SystemPrefix,
    SystemSuffix,
}

impl TemplateField {
    pub const ALL: [TemplateField; 8] = [
        Self::BosToken,
        Self::EosToken,
        Self::UserPrefix,
        Self::UserSuffix,
        Self::AssistantPrefix,
        Self::AssistantSuffix,
        Self::SystemPrefix,
        Self::SystemSuffix,
    ];

    /// Attribute name as it appears in mismatch reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BosToken => "bos_token",
            Self::EosToken => "eos_token",
            Self::UserPrefix => "user_prefix",
            Self::UserSuffix => "user_suffix",
            Self::AssistantPrefix => "assistant_prefix",
            Self::AssistantSuffix => "assistant_suffix",
            Self::SystemPrefix => "system_prefix",
            Self::SystemSuffix => "system_suffix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Special-token fields (BOS/EOS) as opposed to turn delimiters.
    pub fn is_special_token(&self) -> bool {
        matches!(self, Self::BosToken | Self::EosToken)
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
