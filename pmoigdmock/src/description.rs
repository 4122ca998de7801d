//! Document de description du device simulé.
//!
//! Le document par défaut décrit un `InternetGatewayDevice:1` minimal avec un
//! unique service, dont le `controlURL` est le chemin de contrôle configuré.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::config::{DEVICE_UUID, MockIgdConfig};

const IGD_DEVICE_TYPE: &str = "urn:schemas-upnp-org:device:InternetGatewayDevice:1";

fn text_element(name: &str, text: impl Into<String>) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text.into()));
    elem
}

fn service_element(config: &MockIgdConfig) -> Element {
    let mut service = Element::new("service");
    service
        .children
        .push(XMLNode::Element(text_element("serviceType", config.service_urn())));

    let service_name = config
        .service_type()
        .split(':')
        .next()
        .unwrap_or_default()
        .to_string();
    service.children.push(XMLNode::Element(text_element(
        "serviceId",
        format!("urn:upnp-org:serviceId:{}", service_name),
    )));
    service.children.push(XMLNode::Element(text_element(
        "controlURL",
        config.control_path(),
    )));
    service.children.push(XMLNode::Element(text_element(
        "eventSubURL",
        format!("{}/event", config.control_path()),
    )));
    service.children.push(XMLNode::Element(text_element(
        "SCPDURL",
        format!("{}/scpd.xml", config.control_path()),
    )));
    service
}

/// Génère l'élément XML racine de la description
pub fn description_element(config: &MockIgdConfig) -> Element {
    let mut root = Element::new("root");
    root.attributes.insert(
        "xmlns".to_string(),
        "urn:schemas-upnp-org:device-1-0".to_string(),
    );

    // specVersion
    let mut spec = Element::new("specVersion");
    spec.children.push(XMLNode::Element(text_element("major", "1")));
    spec.children.push(XMLNode::Element(text_element("minor", "0")));
    root.children.push(XMLNode::Element(spec));

    let mut device = Element::new("device");
    device
        .children
        .push(XMLNode::Element(text_element("deviceType", IGD_DEVICE_TYPE)));
    device
        .children
        .push(XMLNode::Element(text_element("friendlyName", "PMO Mock IGD")));
    device
        .children
        .push(XMLNode::Element(text_element("manufacturer", "PMOMusic")));
    device
        .children
        .push(XMLNode::Element(text_element("modelName", "pmoigdmock")));
    device.children.push(XMLNode::Element(text_element(
        "UDN",
        format!("uuid:{}", DEVICE_UUID),
    )));

    let mut service_list = Element::new("serviceList");
    service_list
        .children
        .push(XMLNode::Element(service_element(config)));
    device.children.push(XMLNode::Element(service_list));

    root.children.push(XMLNode::Element(device));
    root
}

/// Document de description servi par défaut : celui de la configuration
/// s'il existe, sinon le document généré.
pub fn description_document(config: &MockIgdConfig) -> String {
    if let Some(doc) = config.description_document() {
        return doc.to_string();
    }

    let config_xml = EmitterConfig::new()
        .perform_indent(true)
        .indent_string("  ");

    let mut xml_output = Vec::new();
    if let Err(e) = description_element(config).write_with_config(&mut xml_output, config_xml) {
        tracing::error!("❌ Failed to serialize device description XML: {}", e);
        return String::new();
    }

    let mut xml = String::from_utf8_lossy(&xml_output).into_owned();
    if !xml.starts_with("<?xml") {
        xml.insert_str(0, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    xml
}
