//! Réponse produite par un hook HTTP

use axum::body::{Body, Bytes};
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::soap::{XML_CONTENT_TYPE, build_soap_fault, build_soap_response};

/// Réponse HTTP décrite par un hook.
///
/// Le statut est un code brut : les codes UPnP (718, 714...) peuvent être
/// renvoyés tels quels comme statut HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl Default for HookResponse {
    fn default() -> Self {
        Self::ok()
    }
}

impl HookResponse {
    /// 200 OK sans corps
    pub fn ok() -> Self {
        Self::status(200)
    }

    /// Statut arbitraire sans corps
    pub fn status(code: u16) -> Self {
        Self {
            status: code,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 200 OK avec un corps XML
    pub fn xml(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::ok()
            .with_header(header::CONTENT_TYPE.as_str(), XML_CONTENT_TYPE)
            .with_body(body)
    }

    /// 200 OK avec une enveloppe `<action>Response` contenant `values`
    pub fn soap_response(service_urn: &str, action: &str, values: Vec<(String, String)>) -> Self {
        match build_soap_response(service_urn, action, values) {
            Ok(xml) => Self::xml(xml),
            Err(e) => {
                error!("❌ Failed to build SOAP response for {}: {}", action, e);
                Self::status(500)
            }
        }
    }

    /// 500 avec un SOAP Fault UPnP (`UPnPError`, code et description)
    pub fn soap_fault(error_code: u16, error_description: &str) -> Self {
        match build_soap_fault("s:Client", "UPnPError", Some((error_code, error_description))) {
            Ok(xml) => Self::xml(xml).with_status(500),
            Err(e) => {
                error!("❌ Failed to build SOAP fault {}: {}", error_code, e);
                Self::status(500)
            }
        }
    }

    /// Remplace le statut
    pub fn with_status(mut self, code: u16) -> Self {
        self.status = code;
        self
    }

    /// Remplace le corps
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Ajoute un en-tête
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Code de statut
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Corps, s'il y en a un
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// En-têtes ajoutés par le hook
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl IntoResponse for HookResponse {
    fn into_response(self) -> Response {
        let status = match StatusCode::from_u16(self.status) {
            Ok(status) => status,
            Err(_) => {
                error!("❌ Hook returned invalid HTTP status {}", self.status);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let body = match self.body {
            Some(bytes) => Body::from(bytes),
            None => Body::empty(),
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;

        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().append(name, value);
                }
                _ => warn!("⚠️ Skipping invalid response header {}: {}", name, value),
            }
        }

        response
    }
}
