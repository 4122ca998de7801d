//! # pmoigdmock - Faux Internet Gateway Device UPnP
//!
//! Double de test d'un routeur UPnP IGD, pour exercer un client de traversée
//! NAT sans matériel réel. Le faux IGD parle les trois étapes du protocole :
//!
//! 1. **Découverte SSDP** : chaque datagramme UDP reçoit une réponse
//!    `HTTP/1.1 200 OK` dont le `Location` désigne la description.
//! 2. **Description** : un GET sur le chemin de description renvoie le
//!    document XML du device.
//! 3. **Contrôle SOAP** : un POST sur le chemin de contrôle est dispatché
//!    selon l'en-tête `SOAPACTION` vers le hook de l'action.
//!
//! Chaque étape est servie par un hook remplaçable à chaud (voir [`hooks`]),
//! ce qui permet à un test de simuler des réponses valides, des codes
//! d'erreur UPnP ou des documents volontairement invalides.
//!
//! ## Modules
//!
//! - [`config`] : adressage du device simulé (YAML, environnement)
//! - [`ssdp`] : répondeur de découverte UDP
//! - [`server`] : cycle de vie, routeur HTTP et dispatch SOAP
//! - [`hooks`] : registre des comportements
//! - [`soap`] : parsing et construction des enveloppes SOAP
//! - [`journal`] : trace des échanges pour les assertions des tests
//! - [`logs`] : initialisation de `tracing`

pub mod config;
pub mod context;
pub mod description;
pub mod errors;
pub mod hooks;
pub mod journal;
pub mod logs;
pub mod server;
pub mod soap;
pub mod ssdp;

pub use config::MockIgdConfig;
pub use context::RequestContext;
pub use errors::{IgdMockError, Result};
pub use hooks::{HookRegistry, HookResponse, IgdAction, hook_fn, respond_with};
pub use journal::RequestJournal;
pub use server::MockIgdServer;
