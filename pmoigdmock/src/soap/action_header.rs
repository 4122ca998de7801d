//! Parsing de l'en-tête `SOAPACTION`

use std::fmt;

use crate::errors::{IgdMockError, Result};

/// Nom de l'en-tête HTTP portant l'action SOAP
pub const SOAPACTION_HEADER: &str = "SOAPACTION";

/// Action SOAP identifiée par l'en-tête `SOAPACTION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionIdentifier {
    /// Type de service (ex: "urn:schemas-upnp-org:service:WANIPConnection:1")
    pub service_type: String,

    /// Nom de l'action, clé de dispatch (ex: "AddPortMapping")
    pub action_name: String,
}

impl ActionIdentifier {
    /// Parse une valeur d'en-tête de la forme `"<service-type>#<action-name>"`.
    ///
    /// Les guillemets sont obligatoires et le découpage se fait sur le premier `#`.
    ///
    /// # Errors
    ///
    /// [`IgdMockError::ProtocolViolation`] si les guillemets ou le `#` manquent.
    pub fn parse(header: &str) -> Result<Self> {
        let inner = header
            .trim()
            .strip_prefix('"')
            .and_then(|h| h.strip_suffix('"'))
            .ok_or_else(|| {
                IgdMockError::ProtocolViolation(format!(
                    "SOAPACTION header is not quoted: {}",
                    header
                ))
            })?;

        let (service_type, action_name) = inner.split_once('#').ok_or_else(|| {
            IgdMockError::ProtocolViolation(format!("SOAPACTION header has no '#': {}", header))
        })?;

        Ok(Self {
            service_type: service_type.to_string(),
            action_name: action_name.to_string(),
        })
    }
}

impl fmt::Display for ActionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}#{}\"", self.service_type, self.action_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_header() {
        let id = ActionIdentifier::parse(
            "\"urn:schemas-upnp-org:service:WANIPConnection:1#AddPortMapping\"",
        )
        .unwrap();
        assert_eq!(id.service_type, "urn:schemas-upnp-org:service:WANIPConnection:1");
        assert_eq!(id.action_name, "AddPortMapping");
    }

    #[test]
    fn test_split_on_first_hash() {
        let id = ActionIdentifier::parse("\"svc#Action#Extra\"").unwrap();
        assert_eq!(id.service_type, "svc");
        assert_eq!(id.action_name, "Action#Extra");
    }

    #[test]
    fn test_missing_quotes_is_protocol_violation() {
        let err = ActionIdentifier::parse("urn:svc#GetExternalIPAddress").unwrap_err();
        assert!(matches!(err, IgdMockError::ProtocolViolation(_)));
    }

    #[test]
    fn test_missing_hash_is_protocol_violation() {
        let err = ActionIdentifier::parse("\"GetExternalIPAddress\"").unwrap_err();
        assert!(matches!(err, IgdMockError::ProtocolViolation(_)));
    }

    #[test]
    fn test_display_round_trips_header_form() {
        let id = ActionIdentifier {
            service_type: "urn:x".to_string(),
            action_name: "DeletePortMapping".to_string(),
        };
        assert_eq!(id.to_string(), "\"urn:x#DeletePortMapping\"");
    }
}
