//! Hooks de réponse du faux IGD.
//!
//! Chaque étape du protocole est servie par un hook remplaçable à chaud :
//!
//! ```text
//! découverte SSDP      → DiscoveryHook  (Fn() -> String)
//! GET description      → HttpHook
//! POST contrôle/action → HttpHook (un par IgdAction)
//! ```
//!
//! Un [`HttpHook`] reçoit le [`RequestContext`] et renvoie la [`HookResponse`]
//! à écrire. Le hook est libre de renvoyer n'importe quel statut ou corps, y
//! compris un corps invalide : le faux IGD ne le modifie jamais.
//!
//! # Examples
//!
//! ```
//! use pmoigdmock::hooks::{HookRegistry, HookResponse, IgdAction, hook_fn, respond_with};
//! use pmoigdmock::soap::error_codes;
//!
//! let registry = HookRegistry::new("<root/>");
//!
//! // Réponse fixe
//! registry.set_action(
//!     IgdAction::AddPortMapping,
//!     respond_with(HookResponse::status(error_codes::CONFLICT_IN_MAPPING_ENTRY)),
//! );
//!
//! // Réponse calculée à partir de la requête
//! registry.set_action(
//!     IgdAction::DeletePortMapping,
//!     hook_fn(|ctx| async move {
//!         match ctx.soap_arg("NewExternalPort") {
//!             Some("1700") => HookResponse::ok(),
//!             _ => HookResponse::soap_fault(error_codes::NO_SUCH_ENTRY_IN_ARRAY, "NoSuchEntryInArray"),
//!         }
//!     }),
//! );
//! ```

mod registry;
mod response;

pub use registry::HookRegistry;
pub use response::HookResponse;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::RequestContext;

/// Future renvoyé par un [`HttpHook`]
pub type HookFuture = Pin<Box<dyn Future<Output = HookResponse> + Send>>;

/// Hook d'une étape HTTP (description ou action SOAP)
pub type HttpHook = Arc<dyn Fn(RequestContext) -> HookFuture + Send + Sync>;

/// Hook de découverte : produit le texte brut de la réponse SSDP
pub type DiscoveryHook = Arc<dyn Fn() -> String + Send + Sync>;

/// Actions SOAP modélisées par le faux IGD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgdAction {
    GetExternalIPAddress,
    AddPortMapping,
    GetGenericPortMappingEntry,
    DeletePortMapping,
}

impl IgdAction {
    /// Toutes les actions modélisées
    pub const ALL: [IgdAction; 4] = [
        IgdAction::GetExternalIPAddress,
        IgdAction::AddPortMapping,
        IgdAction::GetGenericPortMappingEntry,
        IgdAction::DeletePortMapping,
    ];

    /// Nom SOAP de l'action
    pub fn name(&self) -> &'static str {
        match self {
            IgdAction::GetExternalIPAddress => "GetExternalIPAddress",
            IgdAction::AddPortMapping => "AddPortMapping",
            IgdAction::GetGenericPortMappingEntry => "GetGenericPortMappingEntry",
            IgdAction::DeletePortMapping => "DeletePortMapping",
        }
    }

    /// Action correspondant à un nom SOAP (comparaison exacte)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

impl fmt::Display for IgdAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Construit un [`HttpHook`] à partir d'une closure asynchrone
pub fn hook_fn<F, Fut>(f: F) -> HttpHook
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResponse> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Hook renvoyant toujours la même réponse
pub fn respond_with(response: HookResponse) -> HttpHook {
    hook_fn(move |_ctx| std::future::ready(response.clone()))
}

/// Hook par défaut : 200 OK sans corps
pub fn ok_hook() -> HttpHook {
    respond_with(HookResponse::ok())
}

/// Macro pour écrire un [`HttpHook`] sans capture.
///
/// Le bloc est placé dans un `async move` ; pour capturer un état partagé,
/// utiliser [`hook_fn`].
///
/// ```
/// use pmoigdmock::http_hook;
/// use pmoigdmock::hooks::HookResponse;
///
/// let hook = http_hook!(|ctx| {
///     tokio::time::sleep(std::time::Duration::from_millis(10)).await;
///     HookResponse::xml(format!("<echo>{}</echo>", ctx.path))
/// });
/// ```
#[macro_export]
macro_rules! http_hook {
    (|$ctx:ident| $body:block) => {
        $crate::hooks::hook_fn(|$ctx: $crate::context::RequestContext| async move $body)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in IgdAction::ALL {
            assert_eq!(IgdAction::from_name(action.name()), Some(action));
            assert_eq!(action.to_string(), action.name());
        }
    }

    #[test]
    fn test_unknown_action_name() {
        assert_eq!(IgdAction::from_name("GetStatusInfo"), None);
        assert_eq!(IgdAction::from_name("addportmapping"), None);
    }
}
