use serde::{Serialize, Serializer};

use crate::{Error, PortDirection, Result};

/// Bus width of a port.
///
/// Two widths are equal when they render to the same bracketed text, so
/// `Bits(8)` equals `Literal("[7:0]")`.
#[derive(Debug, Clone)]
pub enum WidthDeclaration {
    /// `n` bits, rendered as `[n-1:0]`.
    Bits(u64),
    /// A full bracketed range supplied verbatim, e.g. `[WIDTH*2-1:0]`.
    Literal(String),
    /// A width given by a parameter, rendered as `[NAME-1:0]`.
    ParameterWidth(String),
}

impl WidthDeclaration {
    /// Positive integer first, then a bracketed literal, otherwise a
    /// parameter name. Callers reject zero and negative widths beforehand.
    pub fn normalize(token: &str) -> Self {
        let token = token.trim();
        match token.parse::<u64>() {
            Ok(bits) if bits > 0 => WidthDeclaration::Bits(bits),
            _ if token.starts_with('[') => WidthDeclaration::Literal(token.to_string()),
            _ => WidthDeclaration::ParameterWidth(token.to_string()),
        }
    }

    pub fn text(&self) -> String {
        match self {
            WidthDeclaration::Bits(bits) => format!("[{}:0]", bits.saturating_sub(1)),
            WidthDeclaration::Literal(text) => text.clone(),
            WidthDeclaration::ParameterWidth(name) => format!("[{}-1:0]", name),
        }
    }
}

impl std::fmt::Display for WidthDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for WidthDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for WidthDeclaration {}

impl std::hash::Hash for WidthDeclaration {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl Serialize for WidthDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Port {
    direction: PortDirection,
    identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<WidthDeclaration>,
}

impl Port {
    pub fn new(
        direction: PortDirection,
        identifier: &str,
        width: Option<WidthDeclaration>,
    ) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::invalid_spec(identifier, "port identifier must not be empty"));
        }
        if identifier.contains(char::is_whitespace) {
            return Err(Error::invalid_spec(
                identifier,
                "port identifier must not contain whitespace",
            ));
        }

        Ok(Self {
            direction,
            identifier: identifier.to_string(),
            width,
        })
    }

    /// Build a port from `name` or `name#width`, e.g. `data_i#MSG_BITS`.
    pub fn from_description(direction: PortDirection, description: &str) -> Result<Self> {
        let (name, width_token) = match description.split_once('#') {
            Some((name, width)) => (name, Some(width.trim())),
            None => (description, None),
        };

        if name.trim().is_empty() {
            return Err(Error::invalid_spec(description, "missing port identifier"));
        }

        let width = match width_token {
            Some("") | None => None,
            Some(token) if is_non_positive_integer(token) => {
                return Err(Error::invalid_spec(description, "port width must be positive"));
            }
            Some(token) => Some(WidthDeclaration::normalize(token)),
        };

        Self::new(direction, name, width).map_err(|err| match err {
            Error::InvalidSpec { reason, .. } => Error::invalid_spec(description, reason),
            other => other,
        })
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn width(&self) -> Option<&WidthDeclaration> {
        self.width.as_ref()
    }

    /// Name for the signal wired to this port, optionally without its
    /// direction suffix.
    pub fn connection_name(&self, strip_suffix: bool) -> &str {
        if strip_suffix {
            strip_direction_suffix(&self.identifier)
        } else {
            &self.identifier
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.width {
            Some(width) => write!(f, "{} {} {}", self.direction, width, self.identifier),
            None => write!(f, "{} {}", self.direction, self.identifier),
        }
    }
}

// Longest first so `_input` is not cut down to `_inp`.
const DIRECTION_SUFFIXES: [&str; 6] = ["_output", "_input", "_out", "_in", "_o", "_i"];

/// Remove one trailing direction suffix (`_i`, `_in`, `_input`, `_o`, `_out`,
/// `_output`). Identifiers that would become empty are returned unchanged.
pub fn strip_direction_suffix(identifier: &str) -> &str {
    DIRECTION_SUFFIXES
        .iter()
        .find_map(|suffix| identifier.strip_suffix(suffix))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(identifier)
}

fn is_non_positive_integer(token: &str) -> bool {
    token.parse::<i128>().map_or(false, |value| value <= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_integer_width() {
        let width = WidthDeclaration::normalize("8");
        assert!(matches!(width, WidthDeclaration::Bits(8)));
        assert_eq!(width.text(), "[7:0]");
        assert_eq!(WidthDeclaration::normalize("1").text(), "[0:0]");
    }

    #[test]
    fn test_normalize_literal_width() {
        let width = WidthDeclaration::normalize("[WIDTH*2-1:0]");
        assert!(matches!(width, WidthDeclaration::Literal(_)));
        assert_eq!(width.text(), "[WIDTH*2-1:0]");
    }

    #[test]
    fn test_normalize_parameter_width() {
        let width = WidthDeclaration::normalize("MSG_BITS");
        assert!(matches!(width, WidthDeclaration::ParameterWidth(ref name) if name == "MSG_BITS"));
        assert_eq!(width.text(), "[MSG_BITS-1:0]");
    }

    #[test]
    fn test_width_equality_uses_canonical_text() {
        assert_eq!(
            WidthDeclaration::Bits(8),
            WidthDeclaration::Literal("[7:0]".to_string())
        );
        assert_eq!(
            WidthDeclaration::ParameterWidth("N".to_string()),
            WidthDeclaration::Literal("[N-1:0]".to_string())
        );
        assert_ne!(WidthDeclaration::Bits(8), WidthDeclaration::Bits(4));
    }

    #[test]
    fn test_port_from_description() {
        let port = Port::from_description(PortDirection::Input, "data_i#MSG_BITS").unwrap();
        assert_eq!(port.identifier(), "data_i");
        assert_eq!(port.direction(), PortDirection::Input);
        assert_eq!(port.width().unwrap().text(), "[MSG_BITS-1:0]");

        let port = Port::from_description(PortDirection::Output, "btn_o#2").unwrap();
        assert_eq!(port.width().unwrap().text(), "[1:0]");

        let port = Port::from_description(PortDirection::Input, "clk").unwrap();
        assert!(port.width().is_none());

        let port = Port::from_description(PortDirection::Input, "clk#").unwrap();
        assert!(port.width().is_none());
    }

    #[test]
    fn test_port_from_description_splits_on_first_hash() {
        let port = Port::from_description(PortDirection::Inout, "bus#[3:0]#x").unwrap();
        assert_eq!(port.identifier(), "bus");
        assert_eq!(port.width().unwrap().text(), "[3:0]#x");
    }

    #[test]
    fn test_port_from_description_rejects_missing_identifier() {
        let err = Port::from_description(PortDirection::Input, "#8").unwrap_err();
        assert!(matches!(err, Error::InvalidSpec { ref description, .. } if description == "#8"));

        assert!(Port::from_description(PortDirection::Input, "").is_err());
        assert!(Port::from_description(PortDirection::Input, "a#0").is_err());
        assert!(Port::new(PortDirection::Output, "", None).is_err());
    }

    #[test]
    fn test_port_from_description_rejects_non_positive_width() {
        for description in ["a#0", "a#00", "a#-1", "a# -8 "] {
            let err = Port::from_description(PortDirection::Input, description).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSpec { ref reason, .. } if reason.contains("positive")),
                "{description}"
            );
        }

        let port = Port::from_description(PortDirection::Input, "a#08").unwrap();
        assert_eq!(port.width(), Some(&WidthDeclaration::Bits(8)));
    }

    #[test]
    fn test_strip_direction_suffix() {
        assert_eq!(strip_direction_suffix("data_i"), "data");
        assert_eq!(strip_direction_suffix("data_in"), "data");
        assert_eq!(strip_direction_suffix("data_input"), "data");
        assert_eq!(strip_direction_suffix("valid_o"), "valid");
        assert_eq!(strip_direction_suffix("valid_out"), "valid");
        assert_eq!(strip_direction_suffix("valid_output"), "valid");
        assert_eq!(strip_direction_suffix("clk"), "clk");
        assert_eq!(strip_direction_suffix("rst_n"), "rst_n");
        assert_eq!(strip_direction_suffix("_i"), "_i");
        // only one suffix is removed
        assert_eq!(strip_direction_suffix("x_in_o"), "x_in");
    }

    #[test]
    fn test_connection_name_keeps_stored_identifier() {
        let port = Port::from_description(PortDirection::Input, "uart_i").unwrap();
        assert_eq!(port.connection_name(true), "uart");
        assert_eq!(port.connection_name(false), "uart_i");
        assert_eq!(port.identifier(), "uart_i");
    }
}
