use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
}

impl Parameter {
    pub fn new(identifier: &str, default_value: Option<&str>) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::invalid_spec(
                identifier,
                "parameter identifier must not be empty",
            ));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            default_value: default_value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        })
    }

    /// Build a parameter from `name` or `name=default`.
    pub fn from_description(description: &str) -> Result<Self> {
        let (name, default_value) = match description.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (description, None),
        };

        if name.trim().is_empty() {
            return Err(Error::invalid_spec(description, "missing parameter identifier"));
        }

        Self::new(name, default_value)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// `NAME = default` or just `NAME`.
    pub fn declaration(&self) -> String {
        match &self.default_value {
            Some(value) => format!("{} = {}", self.identifier, value),
            None => self.identifier.clone(),
        }
    }

    /// Value passed in an instantiation override; the parameter's own name
    /// when it has no default.
    pub fn override_value(&self) -> &str {
        self.default_value.as_deref().unwrap_or(&self.identifier)
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.declaration())
    }
}
