//! # Module SOAP - contrôle de l'IGD
//!
//! Ce module regroupe tout ce dont le faux IGD a besoin côté SOAP :
//!
//! - ✅ Parsing de l'en-tête `SOAPACTION` (`"service#Action"`)
//! - ✅ Parsing du corps XML des requêtes de contrôle
//! - ✅ Construction de réponses SOAP pour les hooks
//! - ✅ Construction de SOAP Faults UPnP (718, 714, ...)
//!
//! ## Architecture
//!
//! - [`ActionIdentifier`] : paire (service, action) extraite de l'en-tête
//! - [`SoapBodyDocument`] : corps XML parsé, avec l'action si c'est une enveloppe
//! - [`SoapAction`] : action UPnP extraite d'une enveloppe
//!
//! ## Example
//!
//! ```
//! use pmoigdmock::soap::{ActionIdentifier, build_soap_response};
//!
//! let id = ActionIdentifier::parse(
//!     "\"urn:schemas-upnp-org:service:WANIPConnection:1#GetExternalIPAddress\"",
//! ).unwrap();
//! assert_eq!(id.action_name, "GetExternalIPAddress");
//!
//! let xml = build_soap_response(
//!     "urn:schemas-upnp-org:service:WANIPConnection:1",
//!     "GetExternalIPAddress",
//!     vec![("NewExternalIPAddress".to_string(), "203.0.113.1".to_string())],
//! ).unwrap();
//! assert!(xml.contains("<NewExternalIPAddress>203.0.113.1</NewExternalIPAddress>"));
//! ```

mod action_header;
mod builder;
mod fault;
mod parser;

pub use action_header::{ActionIdentifier, SOAPACTION_HEADER};
pub use builder::{build_soap_request, build_soap_response};
pub use fault::build_soap_fault;
pub use parser::{SoapAction, SoapBodyDocument, SoapParseError, parse_soap_body};

/// Content-Type des réponses XML
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

/// Codes d'erreur UPnP standards et spécifiques à WANIPConnection
pub mod error_codes {
    /// Action invalide
    pub const INVALID_ACTION: u16 = 401;

    /// Arguments invalides
    pub const INVALID_ARGS: u16 = 402;

    /// Action échouée
    pub const ACTION_FAILED: u16 = 501;

    /// Valeur d'argument invalide
    pub const ARGUMENT_VALUE_INVALID: u16 = 600;

    /// Accès refusé
    pub const ACTION_NOT_AUTHORIZED: u16 = 606;

    /// Index de tableau invalide (GetGenericPortMappingEntry)
    pub const SPECIFIED_ARRAY_INDEX_INVALID: u16 = 713;

    /// Entrée inexistante (DeletePortMapping)
    pub const NO_SUCH_ENTRY_IN_ARRAY: u16 = 714;

    /// Conflit avec un mapping existant (AddPortMapping)
    pub const CONFLICT_IN_MAPPING_ENTRY: u16 = 718;

    /// Même port interne/externe exigé
    pub const SAME_PORT_VALUES_REQUIRED: u16 = 724;

    /// Seuls les baux permanents sont supportés
    pub const ONLY_PERMANENT_LEASES_SUPPORTED: u16 = 725;
}
