//! # Module Server - cycle de vie du faux IGD
//!
//! [`MockIgdServer`] possède les deux transports du faux IGD :
//!
//! - un thread bloquant qui répond aux requêtes de découverte UDP ;
//! - une tâche tokio qui sert le routeur HTTP (axum), une requête à la fois.
//!
//! Les deux boucles partagent le [`HookRegistry`] et un jeton d'annulation
//! créé par [`MockIgdServer::start`] et déclenché par [`MockIgdServer::stop`]
//! (ou par le `Drop`).
//!
//! ## Exemple
//!
//! ```no_run
//! use pmoigdmock::{HookResponse, IgdAction, MockIgdConfig, MockIgdServer};
//! use pmoigdmock::hooks::respond_with;
//!
//! # #[tokio::main]
//! # async fn main() -> pmoigdmock::Result<()> {
//! let config = MockIgdConfig::default()
//!     .with_bind("127.0.0.1:0".parse().unwrap())
//!     .with_discovery_port(0);
//!
//! let mut server = MockIgdServer::new(config);
//! server.start().await?;
//!
//! server.hooks().set_action(
//!     IgdAction::GetExternalIPAddress,
//!     respond_with(HookResponse::soap_response(
//!         &server.config().service_urn(),
//!         "GetExternalIPAddress",
//!         vec![("NewExternalIPAddress".to_string(), "203.0.113.1".to_string())],
//!     )),
//! );
//!
//! // ... exercer le client NAT sur server.discovery_addr() ...
//!
//! server.stop().await;
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::MockIgdConfig;
use crate::errors::{IgdMockError, Result};
use crate::hooks::HookRegistry;
use crate::journal::RequestJournal;
use crate::ssdp::{DiscoveryResponder, default_discovery_reply};
use router::{RouterState, build_router};

/// Attente maximale de l'arrêt gracieux du listener HTTP
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Adresses et tâches d'un serveur démarré
struct Running {
    config: MockIgdConfig,
    token: CancellationToken,
    http_addr: SocketAddr,
    discovery_addr: SocketAddr,
    http_task: JoinHandle<()>,
    discovery_thread: thread::JoinHandle<()>,
}

/// Faux Internet Gateway Device
pub struct MockIgdServer {
    config: MockIgdConfig,
    registry: Arc<HookRegistry>,
    journal: Arc<RequestJournal>,
    running: Option<Running>,
}

impl Default for MockIgdServer {
    fn default() -> Self {
        Self::new(MockIgdConfig::default())
    }
}

impl MockIgdServer {
    /// Crée un serveur non démarré, hooks par défaut
    pub fn new(config: MockIgdConfig) -> Self {
        let registry = Arc::new(HookRegistry::for_config(&config));
        Self {
            config,
            registry,
            journal: Arc::new(RequestJournal::new()),
            running: None,
        }
    }

    /// Lie les deux transports et lance leurs boucles.
    ///
    /// Si le port HTTP configuré vaut 0, la configuration effective (et donc
    /// le `Location` annoncé) utilise le port réellement obtenu.
    ///
    /// # Errors
    ///
    /// [`IgdMockError::AlreadyStarted`] si le serveur tourne déjà,
    /// [`IgdMockError::Io`] si l'un des deux binds échoue.
    pub async fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Err(IgdMockError::AlreadyStarted);
        }

        let listener = tokio::net::TcpListener::bind(self.config.bind()).await?;
        let http_addr = listener.local_addr()?;
        let config = self.config.clone().with_bind(http_addr);

        let responder = DiscoveryResponder::bind(&config)?;
        let discovery_addr = responder.local_addr();

        let token = CancellationToken::new();

        let discovery_thread = responder.spawn(
            Arc::clone(&self.registry),
            Arc::clone(&self.journal),
            default_discovery_reply(&config),
            token.clone(),
        )?;

        let state = Arc::new(RouterState::new(
            config.clone(),
            Arc::clone(&self.registry),
            Arc::clone(&self.journal),
        ));
        let router = build_router(state);
        let shutdown = token.clone();
        let http_task = tokio::spawn(async move {
            let served = axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await;
            if let Err(e) = served {
                error!("❌ HTTP listener failed: {}", e);
            }
            info!("👋 HTTP listener on {} stopped", http_addr);
        });

        info!(
            "✅ Mock IGD running: description at {}, control at {}, discovery on {}",
            config.description_url(),
            config.control_url(),
            discovery_addr
        );

        self.running = Some(Running {
            config,
            token,
            http_addr,
            discovery_addr,
            http_task,
            discovery_thread,
        });
        Ok(())
    }

    /// Arrête les deux boucles et libère les sockets.
    ///
    /// Sans effet si le serveur n'est pas démarré. Une requête bloquée dans
    /// un hook au-delà du délai d'arrêt est abandonnée.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        info!("🛑 Stopping mock IGD");
        running.token.cancel();

        let mut http_task = running.http_task;
        if tokio::time::timeout(STOP_TIMEOUT, &mut http_task)
            .await
            .is_err()
        {
            warn!("⚠️ HTTP listener did not stop in time, aborting it");
            http_task.abort();
        }

        let discovery_thread = running.discovery_thread;
        if let Ok(Err(_)) = tokio::task::spawn_blocking(move || discovery_thread.join()).await {
            error!("❌ Discovery responder thread panicked");
        }
    }

    /// Vrai entre `start()` et `stop()`
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Registre des hooks, modifiable à tout moment
    pub fn hooks(&self) -> &HookRegistry {
        &self.registry
    }

    /// Journal des échanges
    pub fn journal(&self) -> &RequestJournal {
        &self.journal
    }

    /// Configuration effective (port réel une fois démarré)
    pub fn config(&self) -> &MockIgdConfig {
        self.running
            .as_ref()
            .map(|running| &running.config)
            .unwrap_or(&self.config)
    }

    /// Adresse HTTP liée, une fois démarré
    pub fn http_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.http_addr)
    }

    /// Adresse UDP de découverte liée, une fois démarré
    pub fn discovery_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.discovery_addr)
    }

    /// Préfixe HTTP (ex: "http://127.0.0.1:5431/")
    pub fn prefix(&self) -> String {
        self.config().prefix()
    }

    /// URL absolue de la description
    pub fn description_url(&self) -> String {
        self.config().description_url()
    }

    /// URL absolue de contrôle
    pub fn control_url(&self) -> String {
        self.config().control_url()
    }
}

impl Drop for MockIgdServer {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            info!("🛑 Mock IGD dropped, cancelling its loops");
            running.token.cancel();
        }
    }
}
