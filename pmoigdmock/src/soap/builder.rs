//! Construction d'enveloppes SOAP

use xmltree::{Element, XMLNode};

pub(crate) const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub(crate) const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

pub(crate) fn build_soap_envelope_with_body(body_child: Element) -> Result<String, xmltree::Error> {
    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(body_child));

    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert("s:encodingStyle".to_string(), SOAP_ENCODING_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn action_element(name: String, service_urn: &str, values: Vec<(String, String)>) -> Element {
    let mut elem = Element::new(&name);
    elem.attributes
        .insert("xmlns:u".to_string(), service_urn.to_string());

    for (key, value) in values {
        let mut child = Element::new(&key);
        child.children.push(XMLNode::Text(value));
        elem.children.push(XMLNode::Element(child));
    }

    elem
}

/// Construit une réponse SOAP UPnP
///
/// # Arguments
///
/// * `service_urn` - URN du service (ex: "urn:schemas-upnp-org:service:WANIPConnection:1")
/// * `action` - Nom de l'action (ex: "GetExternalIPAddress")
/// * `values` - Valeurs de retour, dans l'ordre
pub fn build_soap_response(
    service_urn: &str,
    action: &str,
    values: Vec<(String, String)>,
) -> Result<String, xmltree::Error> {
    let elem = action_element(format!("u:{}Response", action), service_urn, values);
    build_soap_envelope_with_body(elem)
}

/// Construit une requête SOAP UPnP, telle qu'un client l'enverrait
pub fn build_soap_request(
    service_urn: &str,
    action: &str,
    args: &[(&str, &str)],
) -> Result<String, xmltree::Error> {
    let values = args
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let elem = action_element(format!("u:{}", action), service_urn, values);
    build_soap_envelope_with_body(elem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::parse_soap_body;

    #[test]
    fn test_build_external_ip_response() {
        let xml = build_soap_response(
            "urn:schemas-upnp-org:service:WANIPConnection:1",
            "GetExternalIPAddress",
            vec![("NewExternalIPAddress".to_string(), "203.0.113.1".to_string())],
        )
        .unwrap();

        assert!(xml.contains("GetExternalIPAddressResponse"));
        assert!(xml.contains("<NewExternalIPAddress>203.0.113.1</NewExternalIPAddress>"));
        assert!(xml.contains("xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\""));
    }

    #[test]
    fn test_request_is_parsed_back_as_action() {
        let xml = build_soap_request(
            "urn:schemas-upnp-org:service:WANIPConnection:1",
            "DeletePortMapping",
            &[("NewExternalPort", "1700"), ("NewProtocol", "UDP")],
        )
        .unwrap();

        let action = parse_soap_body(xml.as_bytes()).unwrap().action.unwrap();
        assert_eq!(action.name, "DeletePortMapping");
        assert_eq!(action.arg("NewProtocol"), Some("UDP"));
    }
}
