//! Journal des échanges servis par le faux IGD.
//!
//! Les tests s'en servent pour vérifier ce que le client a réellement envoyé
//! et pour détecter les défauts de protocole (en-tête SOAPACTION mal formé,
//! corps XML invalide), qui ne font pas échouer la requête côté serveur.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Branche de routage empruntée par une requête HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// GET sur le chemin de description
    Description,
    /// Requête de contrôle, avec le nom d'action si l'en-tête a pu être lu
    Control { action: Option<String> },
    /// Chemin inconnu (500)
    Unmatched,
}

/// Entrée du journal : une requête HTTP et son statut final
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub method: String,
    pub path: String,
    pub route: Route,
    pub status: u16,
}

/// Journal partagé entre les boucles et le test
#[derive(Debug, Default)]
pub struct RequestJournal {
    entries: Mutex<Vec<JournalEntry>>,
    defects: Mutex<Vec<String>>,
    discovery_replies: AtomicUsize,
}

impl RequestJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, entry: JournalEntry) {
        self.entries.lock().push(entry);
    }

    pub(crate) fn record_defect(&self, defect: String) {
        self.defects.lock().push(defect);
    }

    pub(crate) fn record_discovery_reply(&self) {
        self.discovery_replies.fetch_add(1, Ordering::SeqCst);
    }

    /// Requêtes HTTP servies, dans l'ordre d'arrivée
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().clone()
    }

    /// Défauts de protocole observés
    pub fn defects(&self) -> Vec<String> {
        self.defects.lock().clone()
    }

    /// Nombre de réponses de découverte envoyées
    pub fn discovery_replies(&self) -> usize {
        self.discovery_replies.load(Ordering::SeqCst)
    }

    /// Noms des actions SOAP reçues, dans l'ordre
    pub fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|entry| match &entry.route {
                Route::Control { action } => action.clone(),
                _ => None,
            })
            .collect()
    }

    /// Vide le journal
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.defects.lock().clear();
        self.discovery_replies.store(0, Ordering::SeqCst);
    }
}
