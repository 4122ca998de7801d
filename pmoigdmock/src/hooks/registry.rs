//! Registre des hooks de réponse

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{DiscoveryHook, HookResponse, HttpHook, IgdAction, ok_hook, respond_with};
use crate::config::MockIgdConfig;
use crate::description::description_document;

/// Registre des comportements du faux IGD, un emplacement par étape.
///
/// Les emplacements sont remplaçables pendant toute la vie du serveur. Une
/// lecture clone l'`Arc` du hook puis relâche le verrou : un remplacement est
/// visible dès l'invocation suivante et n'affecte jamais une requête déjà en
/// cours de traitement.
pub struct HookRegistry {
    default_description: HttpHook,
    discovery: RwLock<Option<DiscoveryHook>>,
    description: RwLock<HttpHook>,
    actions: RwLock<HashMap<IgdAction, HttpHook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("discovery_overridden", &self.discovery.read().is_some())
            .field("actions", &self.actions.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

fn default_actions() -> HashMap<IgdAction, HttpHook> {
    IgdAction::ALL
        .into_iter()
        .map(|action| (action, ok_hook()))
        .collect()
}

impl HookRegistry {
    /// Crée un registre dont le hook de description sert `description_document`
    pub fn new(description_document: impl Into<String>) -> Self {
        let default_description = respond_with(HookResponse::xml(description_document));
        Self {
            description: RwLock::new(default_description.clone()),
            default_description,
            discovery: RwLock::new(None),
            actions: RwLock::new(default_actions()),
        }
    }

    /// Crée un registre servant le document de description de `config`
    pub fn for_config(config: &MockIgdConfig) -> Self {
        Self::new(description_document(config))
    }

    // ========== Découverte ==========

    /// Remplace la réponse de découverte
    pub fn set_discovery<F>(&self, hook: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        debug!("🔧 Discovery hook replaced");
        *self.discovery.write() = Some(Arc::new(hook));
    }

    /// Revient à la réponse de découverte par défaut
    pub fn reset_discovery(&self) {
        *self.discovery.write() = None;
    }

    /// Hook de découverte installé, `None` pour la réponse par défaut
    pub fn discovery(&self) -> Option<DiscoveryHook> {
        self.discovery.read().clone()
    }

    // ========== Description ==========

    /// Remplace le hook de description
    pub fn set_description(&self, hook: HttpHook) {
        debug!("🔧 Description hook replaced");
        *self.description.write() = hook;
    }

    /// Revient au document de description par défaut
    pub fn reset_description(&self) {
        *self.description.write() = self.default_description.clone();
    }

    /// Hook de description courant
    pub fn description(&self) -> HttpHook {
        self.description.read().clone()
    }

    // ========== Actions SOAP ==========

    /// Remplace le hook d'une action
    pub fn set_action(&self, action: IgdAction, hook: HttpHook) {
        debug!("🔧 Hook replaced for {}", action);
        self.actions.write().insert(action, hook);
    }

    /// Revient au 200 OK par défaut pour une action
    pub fn reset_action(&self, action: IgdAction) {
        self.actions.write().insert(action, ok_hook());
    }

    /// Hook courant d'une action
    pub fn action(&self, action: IgdAction) -> HttpHook {
        self.actions
            .read()
            .get(&action)
            .cloned()
            .unwrap_or_else(ok_hook)
    }

    /// Remet tous les emplacements à leur valeur par défaut
    pub fn reset_all(&self) {
        self.reset_discovery();
        self.reset_description();
        *self.actions.write() = default_actions();
    }
}
