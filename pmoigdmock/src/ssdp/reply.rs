//! Texte des réponses de découverte

use crate::config::{DEVICE_UUID, MockIgdConfig, SERVICE_URN_PREFIX};

/// Construit une réponse de découverte SSDP.
///
/// Les lignes sont séparées par `\r\n`, sans terminateur final.
pub fn discovery_reply(server: &str, location: &str, max_age: u32, service_type: &str) -> String {
    [
        "HTTP/1.1 200 OK".to_string(),
        format!("Server: {}", server),
        "EXT:".to_string(),
        format!("Location: {}", location),
        format!("Cache-Control:max-age={}", max_age),
        format!("ST:{}{}", SERVICE_URN_PREFIX, service_type),
        format!(
            "USN:uuid:{}::{}{}",
            DEVICE_UUID, SERVICE_URN_PREFIX, service_type
        ),
    ]
    .join("\r\n")
}

/// Réponse de découverte par défaut pour une configuration
pub fn default_discovery_reply(config: &MockIgdConfig) -> String {
    discovery_reply(
        config.server_header(),
        &config.description_url(),
        config.max_age(),
        config.service_type(),
    )
}
