//! Parser du corps des requêtes de contrôle

use std::collections::HashMap;
use std::io::BufReader;
use xmltree::Element;

/// Action UPnP extraite d'une enveloppe SOAP
#[derive(Debug, Clone)]
pub struct SoapAction {
    /// Nom de l'action (ex: "AddPortMapping")
    pub name: String,

    /// Namespace de l'action (ex: "urn:schemas-upnp-org:service:WANIPConnection:1")
    pub namespace: Option<String>,

    /// Arguments de l'action
    pub args: HashMap<String, String>,
}

impl SoapAction {
    /// Valeur d'un argument, si présent
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }
}

/// Corps XML d'une requête de contrôle
#[derive(Debug, Clone)]
pub struct SoapBodyDocument {
    /// Élément racine du document
    pub root: Element,

    /// Action UPnP si le document est une enveloppe SOAP bien formée
    pub action: Option<SoapAction>,
}

/// Erreur de parsing SOAP
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("No action found in SOAP Body")]
    NoAction,
}

/// Parse le corps d'une requête de contrôle.
///
/// Seule la validité XML est exigée. L'extraction de l'action est
/// opportuniste : un document XML qui n'est pas une enveloppe donne
/// `action == None`.
pub fn parse_soap_body(xml: &[u8]) -> Result<SoapBodyDocument, SoapParseError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    let action = match extract_action(&root) {
        Ok(action) => Some(action),
        Err(e) => {
            tracing::trace!("Control body is XML but not a SOAP action: {}", e);
            None
        }
    };

    Ok(SoapBodyDocument { root, action })
}

/// Extrait l'action UPnP d'une enveloppe SOAP
fn extract_action(root: &Element) -> Result<SoapAction, SoapParseError> {
    if !root.name.ends_with("Envelope") {
        return Err(SoapParseError::MissingEnvelope);
    }

    let body = root
        .get_child("Body")
        .or_else(|| {
            root.children
                .iter()
                .find_map(|n| n.as_element().filter(|e| e.name.ends_with("Body")))
        })
        .ok_or(SoapParseError::MissingBody)?;

    // Format: <u:ActionName xmlns:u="service-urn">...</u:ActionName>
    let action_elem = body
        .children
        .iter()
        .find_map(|n| n.as_element())
        .ok_or(SoapParseError::NoAction)?;

    let mut args = HashMap::new();
    for child in &action_elem.children {
        if let Some(elem) = child.as_element() {
            let value = elem.get_text().unwrap_or_default().to_string();
            args.insert(elem.name.clone(), value);
        }
    }

    Ok(SoapAction {
        name: action_elem.name.clone(),
        namespace: action_elem.namespace.clone(),
        args,
    })
}
