//! # Module SSDP - découverte du faux IGD
//!
//! Le faux IGD répond en unicast à tout datagramme reçu sur le port de
//! découverte, quel que soit son contenu. Il n'envoie jamais de NOTIFY.
//!
//! ## Fonctionnalités
//!
//! - ✅ Réponse unicast à chaque requête (M-SEARCH ou autre)
//! - ✅ Réponse produite par le hook de découverte courant, relu à chaque requête
//! - ✅ Arrêt sur datagramme vide ou sur annulation du serveur
//! - ✅ IPv4 et IPv6, abonnement multicast optionnel
//!
//! ## Constants SSDP
//!
//! - **Multicast Address**: 239.255.255.250:1900 / [ff02::c]:1900
//! - **Max-Age**: 1800 secondes par défaut

mod reply;
mod responder;

pub use reply::{default_discovery_reply, discovery_reply};
pub use responder::DiscoveryResponder;

/// Adresse multicast SSDP IPv4
pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250";

/// Adresse multicast SSDP IPv6 (link-local)
pub const SSDP_MULTICAST_ADDR_V6: &str = "ff02::c";

/// Port SSDP
pub const SSDP_PORT: u16 = 1900;
