//! # Configuration du faux IGD
//!
//! La configuration décrit l'adressage fixe du device simulé : préfixe d'écoute,
//! type de service, chemin de la description et chemin de contrôle.
//!
//! Elle est immuable : les méthodes `with_*` renvoient une nouvelle valeur.
//! Le chemin de contrôle est dérivé de l'UUID du device et du type de service,
//! [`MockIgdConfig::with_service_type`] met donc à jour les deux ensemble.
//!
//! ## Chargement
//!
//! ```no_run
//! use pmoigdmock::MockIgdConfig;
//!
//! // Valeurs par défaut (127.0.0.1:5431, WANIPConnection:1)
//! let config = MockIgdConfig::default();
//!
//! // Depuis un fichier YAML, les clés absentes gardent leur valeur par défaut
//! let config = MockIgdConfig::load("igd.yaml")?;
//!
//! // Depuis l'environnement (PMOIGD_CONFIG, PMOIGD_CONFIG__BIND, ...)
//! let config = MockIgdConfig::from_env()?;
//! # Ok::<(), pmoigdmock::IgdMockError>(())
//! ```

use serde::Deserialize;
use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{IgdMockError, Result};

/// UUID du device racine simulé
pub const DEVICE_UUID: &str = "0000e068-20a0-00e0-20a0-48a802086048";

/// UUID utilisé dans le chemin de la description
pub const DESCRIPTION_UUID: &str = "0000e068-20a0-00e0-20a0-48a8000808e0";

/// Type de service par défaut
pub const DEFAULT_SERVICE_TYPE: &str = "WANIPConnection:1";

/// Préfixe des URN de service UPnP
pub const SERVICE_URN_PREFIX: &str = "urn:schemas-upnp-org:service:";

/// Chaîne `Server` annoncée dans les réponses de découverte
pub const DEFAULT_SERVER_HEADER: &str = "Custom/1.0 UPnP/1.0 Proc/Ver";

/// Variable d'environnement désignant le fichier YAML de configuration
pub const ENV_CONFIG_FILE: &str = "PMOIGD_CONFIG";

/// Préfixe des variables d'environnement de surcharge
pub const ENV_PREFIX: &str = "PMOIGD_CONFIG__";

const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5431);
const DEFAULT_MAX_AGE: u32 = 1800;

/// Chemin de description par défaut
pub fn default_description_path() -> String {
    format!("/dyndev/uuid:{}", DESCRIPTION_UUID)
}

/// Chemin de contrôle dérivé du type de service
pub fn derive_control_path(service_type: &str) -> String {
    format!("/uuid:{}/{}", DEVICE_UUID, service_type)
}

/// Configuration immuable du faux IGD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockIgdConfig {
    bind: SocketAddr,
    service_type: String,
    description_path: String,
    control_path: String,
    discovery_port: u16,
    discovery_ip: Option<IpAddr>,
    join_multicast: bool,
    server_header: String,
    max_age: u32,
    description_document: Option<String>,
}

impl Default for MockIgdConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            description_path: default_description_path(),
            control_path: derive_control_path(DEFAULT_SERVICE_TYPE),
            discovery_port: crate::ssdp::SSDP_PORT,
            discovery_ip: None,
            join_multicast: false,
            server_header: DEFAULT_SERVER_HEADER.to_string(),
            max_age: DEFAULT_MAX_AGE,
            description_document: None,
        }
    }
}

/// Forme YAML de la configuration, toutes les clés sont optionnelles
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    bind: Option<SocketAddr>,
    service_type: Option<String>,
    description_path: Option<String>,
    control_path: Option<String>,
    discovery_port: Option<u16>,
    discovery_ip: Option<IpAddr>,
    join_multicast: Option<bool>,
    server_header: Option<String>,
    max_age: Option<u32>,
    description_document: Option<String>,
}

impl MockIgdConfig {
    /// Configuration par défaut avec un autre type de service
    pub fn new(service_type: impl Into<String>) -> Self {
        Self::default().with_service_type(service_type)
    }

    /// Parse une configuration YAML.
    ///
    /// Un `control_path` absent est dérivé de `service_type`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        let mut config = match file.service_type {
            Some(st) => Self::new(st),
            None => Self::default(),
        };

        if let Some(bind) = file.bind {
            config.bind = bind;
        }
        if let Some(path) = file.description_path {
            config.description_path = path;
        }
        if let Some(path) = file.control_path {
            config.control_path = path;
        }
        if let Some(port) = file.discovery_port {
            config.discovery_port = port;
        }
        config.discovery_ip = file.discovery_ip.or(config.discovery_ip);
        if let Some(join) = file.join_multicast {
            config.join_multicast = join;
        }
        if let Some(server) = file.server_header {
            config.server_header = server;
        }
        if let Some(max_age) = file.max_age {
            config.max_age = max_age;
        }
        config.description_document = file.description_document;

        config.validate()?;
        Ok(config)
    }

    /// Charge une configuration YAML depuis un fichier
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| {
            IgdMockError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        info!("✅ Mock IGD configuration loaded from {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Charge la configuration depuis l'environnement.
    ///
    /// - `PMOIGD_CONFIG` : fichier YAML (sinon valeurs par défaut)
    /// - `PMOIGD_CONFIG__BIND` : adresse d'écoute HTTP
    /// - `PMOIGD_CONFIG__DISCOVERY_PORT` : port UDP de découverte
    pub fn from_env() -> Result<Self> {
        let config = match env::var(ENV_CONFIG_FILE) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        config.with_overrides(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Applique les surcharges `BIND` et `DISCOVERY_PORT` fournies par `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("BIND") {
            debug!("Overriding bind address with {}", bind);
            self.bind = bind
                .parse()
                .map_err(|e| IgdMockError::Config(format!("invalid BIND '{}': {}", bind, e)))?;
        }
        if let Some(port) = lookup("DISCOVERY_PORT") {
            debug!("Overriding discovery port with {}", port);
            self.discovery_port = port.parse().map_err(|e| {
                IgdMockError::Config(format!("invalid DISCOVERY_PORT '{}': {}", port, e))
            })?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("description_path", &self.description_path),
            ("control_path", &self.control_path),
        ] {
            if !path.starts_with('/') {
                return Err(IgdMockError::Config(format!(
                    "{} must start with '/': {}",
                    name, path
                )));
            }
        }
        if self.description_path == self.control_path {
            return Err(IgdMockError::Config(
                "description_path and control_path must differ".to_string(),
            ));
        }
        Ok(())
    }

    // ========== Builders ==========

    /// Change l'adresse d'écoute HTTP
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Change le type de service et re-dérive le chemin de contrôle
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self.control_path = derive_control_path(&self.service_type);
        self
    }

    /// Change le chemin servant la description
    pub fn with_description_path(mut self, path: impl Into<String>) -> Self {
        self.description_path = path.into();
        self
    }

    /// Change le port UDP de découverte (0 = port éphémère)
    pub fn with_discovery_port(mut self, port: u16) -> Self {
        self.discovery_port = port;
        self
    }

    /// Change l'adresse IP d'écoute UDP
    pub fn with_discovery_ip(mut self, ip: IpAddr) -> Self {
        self.discovery_ip = Some(ip);
        self
    }

    /// Active l'abonnement au groupe multicast SSDP
    pub fn with_multicast_join(mut self, join: bool) -> Self {
        self.join_multicast = join;
        self
    }

    /// Remplace le document de description généré
    pub fn with_description_document(mut self, document: impl Into<String>) -> Self {
        self.description_document = Some(document.into());
        self
    }

    // ========== Accès en lecture ==========

    /// Adresse d'écoute HTTP
    pub fn bind(&self) -> SocketAddr {
        self.bind
    }

    /// Type de service (ex: "WANIPConnection:1")
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Chemin servant la description
    pub fn description_path(&self) -> &str {
        &self.description_path
    }

    /// Chemin acceptant les requêtes de contrôle
    pub fn control_path(&self) -> &str {
        &self.control_path
    }

    /// Port UDP de découverte
    pub fn discovery_port(&self) -> u16 {
        self.discovery_port
    }

    /// Adresse UDP d'écoute : IP configurée, sinon l'adresse non spécifiée
    /// de la même famille que l'adresse HTTP
    pub fn discovery_bind(&self) -> SocketAddr {
        let ip = self.discovery_ip.unwrap_or(match self.bind.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        });
        SocketAddr::new(ip, self.discovery_port)
    }

    /// Abonnement au groupe multicast SSDP
    pub fn join_multicast(&self) -> bool {
        self.join_multicast
    }

    /// Chaîne `Server` des réponses de découverte
    pub fn server_header(&self) -> &str {
        &self.server_header
    }

    /// Durée de validité annoncée (secondes)
    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Document de description imposé par la configuration
    pub fn description_document(&self) -> Option<&str> {
        self.description_document.as_deref()
    }

    /// Préfixe d'écoute (ex: "http://127.0.0.1:5431/")
    pub fn prefix(&self) -> String {
        format!("{}/", self.base_url())
    }

    /// URL de base sans slash final (ex: "http://[::1]:5431")
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind)
    }

    /// URL absolue de la description
    pub fn description_url(&self) -> String {
        format!("{}{}", self.base_url(), self.description_path)
    }

    /// URL absolue de contrôle
    pub fn control_url(&self) -> String {
        format!("{}{}", self.base_url(), self.control_path)
    }

    /// URN du service (ex: "urn:schemas-upnp-org:service:WANIPConnection:1")
    pub fn service_urn(&self) -> String {
        format!("{}{}", SERVICE_URN_PREFIX, self.service_type)
    }

    /// USN annoncé par la découverte
    pub fn usn(&self) -> String {
        format!("uuid:{}::{}", DEVICE_UUID, self.service_urn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MockIgdConfig::default();
        assert_eq!(config.service_type(), "WANIPConnection:1");
        assert_eq!(config.prefix(), "http://127.0.0.1:5431/");
        assert_eq!(
            config.description_url(),
            "http://127.0.0.1:5431/dyndev/uuid:0000e068-20a0-00e0-20a0-48a8000808e0"
        );
        assert_eq!(
            config.control_url(),
            "http://127.0.0.1:5431/uuid:0000e068-20a0-00e0-20a0-48a802086048/WANIPConnection:1"
        );
        assert_eq!(config.discovery_bind(), "0.0.0.0:1900".parse().unwrap());
    }

    #[test]
    fn test_service_type_rederives_control_path() {
        let config = MockIgdConfig::default().with_service_type("WANPPPConnection:1");
        assert_eq!(
            config.control_path(),
            "/uuid:0000e068-20a0-00e0-20a0-48a802086048/WANPPPConnection:1"
        );
        assert_eq!(
            config.usn(),
            "uuid:0000e068-20a0-00e0-20a0-48a802086048::urn:schemas-upnp-org:service:WANPPPConnection:1"
        );
    }

    #[test]
    fn test_ipv6_prefix_and_discovery_family() {
        let config = MockIgdConfig::default().with_bind("[::1]:5431".parse().unwrap());
        assert_eq!(config.prefix(), "http://[::1]:5431/");
        assert!(config.discovery_bind().is_ipv6());
    }

    #[test]
    fn test_yaml_partial() {
        let config = MockIgdConfig::from_yaml_str(
            "bind: \"[::1]:6000\"\nservice_type: WANIPConnection:2\ndiscovery_port: 0\n",
        )
        .unwrap();
        assert_eq!(config.bind(), "[::1]:6000".parse().unwrap());
        assert_eq!(config.control_path(), derive_control_path("WANIPConnection:2"));
        assert_eq!(config.discovery_port(), 0);
        assert_eq!(config.description_path(), default_description_path());
    }

    #[test]
    fn test_yaml_empty_gives_defaults() {
        assert_eq!(
            MockIgdConfig::from_yaml_str("").unwrap(),
            MockIgdConfig::default()
        );
    }

    #[test]
    fn test_yaml_rejects_relative_path() {
        let err = MockIgdConfig::from_yaml_str("control_path: control\n").unwrap_err();
        assert!(matches!(err, IgdMockError::Config(_)));
    }

    #[test]
    fn test_yaml_rejects_unknown_key() {
        let err = MockIgdConfig::from_yaml_str("prefixe: nope\n").unwrap_err();
        assert!(matches!(err, IgdMockError::Yaml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"max_age: 60\njoin_multicast: true\n").unwrap();

        let config = MockIgdConfig::load(file.path()).unwrap();
        assert_eq!(config.max_age(), 60);
        assert!(config.join_multicast());
    }

    #[test]
    fn test_overrides() {
        let config = MockIgdConfig::default()
            .with_overrides(|key| match key {
                "BIND" => Some("127.0.0.1:7000".to_string()),
                "DISCOVERY_PORT" => Some("0".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.bind().port(), 7000);
        assert_eq!(config.discovery_port(), 0);

        let err = MockIgdConfig::default()
            .with_overrides(|key| (key == "BIND").then(|| "nowhere".to_string()))
            .unwrap_err();
        assert!(matches!(err, IgdMockError::Config(_)));
    }
}
