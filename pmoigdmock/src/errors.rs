//! Erreurs du faux IGD.

use thiserror::Error;

use crate::soap::SoapParseError;

/// Erreurs levées par le faux IGD.
///
/// Les variantes [`IgdMockError::ProtocolViolation`] et [`IgdMockError::SoapParse`]
/// signalent un client sous test qui ne respecte pas le protocole : ce sont des
/// défauts, jamais rattrapés silencieusement.
#[derive(Error, Debug)]
pub enum IgdMockError {
    /// Erreur d'entrée/sortie (bind, socket...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration invalide
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fichier YAML illisible
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// En-tête SOAPACTION absent ou mal formé
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// Corps de requête de contrôle qui n'est pas du XML valide
    #[error("SOAP body error: {0}")]
    SoapParse(#[from] SoapParseError),

    /// Corps de requête illisible
    #[error("Failed to read request body: {0}")]
    Body(String),

    /// `start()` appelé sur un serveur déjà démarré
    #[error("Mock IGD server already started")]
    AlreadyStarted,
}

/// Résultat spécialisé du crate.
pub type Result<T> = std::result::Result<T, IgdMockError>;
