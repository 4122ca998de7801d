//! Contexte d'une requête HTTP reçue par le faux IGD.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use std::sync::Arc;

use crate::soap::{ActionIdentifier, SoapAction, SoapBodyDocument};

/// Partie SOAP d'une requête de contrôle
#[derive(Debug, Clone)]
pub struct SoapRequest {
    /// Action identifiée par l'en-tête `SOAPACTION`
    pub identifier: ActionIdentifier,

    /// Corps XML parsé
    pub document: SoapBodyDocument,
}

/// Contexte transmis aux hooks HTTP.
///
/// Créé à la réception d'une requête et détruit une fois la réponse écrite.
/// La réponse elle-même est la valeur de retour du hook : le routeur l'écrit
/// exactement une fois.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Méthode HTTP
    pub method: Method,

    /// URL absolue de la requête (ex: "http://127.0.0.1:5431/dyndev/uuid:...")
    pub url: String,

    /// Chemin et query de la requête
    pub path: String,

    /// En-têtes de la requête
    pub headers: HeaderMap,

    /// Corps complet de la requête
    pub body: Bytes,

    /// Action SOAP, pour les requêtes de contrôle
    pub soap: Option<Arc<SoapRequest>>,
}

impl RequestContext {
    /// Nom de l'action SOAP, pour les requêtes de contrôle
    pub fn action_name(&self) -> Option<&str> {
        self.soap
            .as_ref()
            .map(|soap| soap.identifier.action_name.as_str())
    }

    /// Action extraite de l'enveloppe SOAP, si le corps en est une
    pub fn soap_action(&self) -> Option<&SoapAction> {
        self.soap.as_ref().and_then(|soap| soap.document.action.as_ref())
    }

    /// Valeur d'un argument de l'action SOAP
    pub fn soap_arg(&self, name: &str) -> Option<&str> {
        self.soap_action().and_then(|action| action.arg(name))
    }

    /// Corps de la requête en texte (UTF-8 approximatif)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Valeur textuelle d'un en-tête
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
