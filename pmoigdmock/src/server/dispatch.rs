//! Dispatch des requêtes de contrôle SOAP vers les hooks

use std::sync::Arc;
use tracing::debug;

use crate::context::{RequestContext, SoapRequest};
use crate::errors::{IgdMockError, Result};
use crate::hooks::{HookRegistry, HookResponse, IgdAction};
use crate::soap::{ActionIdentifier, SOAPACTION_HEADER, parse_soap_body};

/// Extrait l'action de l'en-tête `SOAPACTION`
fn action_identifier(ctx: &RequestContext) -> Result<ActionIdentifier> {
    let header = ctx.header(SOAPACTION_HEADER).ok_or_else(|| {
        IgdMockError::ProtocolViolation(format!("missing {} header", SOAPACTION_HEADER))
    })?;
    ActionIdentifier::parse(header)
}

async fn invoke(
    registry: &HookRegistry,
    mut ctx: RequestContext,
    identifier: ActionIdentifier,
) -> Result<HookResponse> {
    let document = parse_soap_body(&ctx.body)?;

    debug!("🎬 SOAP action {}", identifier);
    if let Some(action) = &document.action {
        debug!("🎬 SOAP arguments: {:?}", action.args);
    }

    let known = IgdAction::from_name(&identifier.action_name);
    ctx.soap = Some(Arc::new(SoapRequest {
        identifier,
        document,
    }));

    match known {
        Some(action) => {
            let hook = registry.action(action);
            Ok(hook(ctx).await)
        }
        None => {
            debug!(
                "Unmodelled action {:?}, answering 200 OK",
                ctx.action_name()
            );
            Ok(HookResponse::ok())
        }
    }
}

/// Traite une requête de contrôle.
///
/// Renvoie le nom d'action lu dans l'en-tête (s'il a pu l'être) et la réponse
/// du hook, ou l'erreur de protocole rencontrée.
pub(crate) async fn dispatch_control(
    registry: &HookRegistry,
    ctx: RequestContext,
) -> (Option<String>, Result<HookResponse>) {
    let identifier = match action_identifier(&ctx) {
        Ok(identifier) => identifier,
        Err(e) => return (None, Err(e)),
    };

    let action_name = identifier.action_name.clone();
    let outcome = invoke(registry, ctx, identifier).await;
    (Some(action_name), outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{hook_fn, respond_with};
    use crate::soap::build_soap_request;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, HeaderValue, Method};

    const SERVICE: &str = "urn:schemas-upnp-org:service:WANIPConnection:1";

    fn control_context(header: Option<&str>, body: &str) -> RequestContext {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert("soapaction", HeaderValue::from_str(value).unwrap());
        }
        RequestContext {
            method: Method::POST,
            url: "http://127.0.0.1:5431/ctl".to_string(),
            path: "/ctl".to_string(),
            headers,
            body: Bytes::from(body.to_string()),
            soap: None,
        }
    }

    fn request(action: &str) -> RequestContext {
        let body = build_soap_request(SERVICE, action, &[]).unwrap();
        control_context(Some(&format!("\"{}#{}\"", SERVICE, action)), &body)
    }

    #[tokio::test]
    async fn test_known_action_uses_hook() {
        let registry = HookRegistry::new("<root/>");
        registry.set_action(
            IgdAction::GetGenericPortMappingEntry,
            respond_with(HookResponse::status(713)),
        );

        let (name, outcome) =
            dispatch_control(&registry, request("GetGenericPortMappingEntry")).await;
        assert_eq!(name.as_deref(), Some("GetGenericPortMappingEntry"));
        assert_eq!(outcome.unwrap().status_code(), 713);
    }

    #[tokio::test]
    async fn test_unknown_action_is_empty_ok() {
        let registry = HookRegistry::new("<root/>");
        let (name, outcome) = dispatch_control(&registry, request("GetStatusInfo")).await;
        assert_eq!(name.as_deref(), Some("GetStatusInfo"));
        assert_eq!(outcome.unwrap(), HookResponse::ok());
    }

    #[tokio::test]
    async fn test_hook_sees_parsed_soap() {
        let registry = HookRegistry::new("<root/>");
        registry.set_action(
            IgdAction::AddPortMapping,
            hook_fn(|ctx| async move {
                let port = ctx.soap_arg("NewExternalPort").unwrap_or("none").to_string();
                HookResponse::xml(port)
            }),
        );

        let body = build_soap_request(SERVICE, "AddPortMapping", &[("NewExternalPort", "1602")])
            .unwrap();
        let ctx = control_context(Some(&format!("\"{}#AddPortMapping\"", SERVICE)), &body);

        let (_, outcome) = dispatch_control(&registry, ctx).await;
        assert_eq!(outcome.unwrap().body().unwrap().as_ref(), b"1602");
    }

    #[tokio::test]
    async fn test_missing_header_is_protocol_violation() {
        let registry = HookRegistry::new("<root/>");
        let (name, outcome) = dispatch_control(&registry, control_context(None, "<x/>")).await;
        assert!(name.is_none());
        assert!(matches!(outcome, Err(IgdMockError::ProtocolViolation(_))));
    }

    #[tokio::test]
    async fn test_invalid_body_is_soap_error() {
        let registry = HookRegistry::new("<root/>");
        let ctx = control_context(
            Some(&format!("\"{}#DeletePortMapping\"", SERVICE)),
            "not xml at all",
        );
        let (name, outcome) = dispatch_control(&registry, ctx).await;
        assert_eq!(name.as_deref(), Some("DeletePortMapping"));
        assert!(matches!(outcome, Err(IgdMockError::SoapParse(_))));
    }
}
