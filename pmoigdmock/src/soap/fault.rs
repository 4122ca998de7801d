//! SOAP Faults pour UPnP

use xmltree::{Element, XMLNode};

use super::builder::SOAP_ENVELOPE_NS;

fn text_element(name: &str, text: String) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text));
    elem
}

/// Construit un SOAP Fault XML
///
/// # Arguments
///
/// * `fault_code` - Code du fault (ex: "s:Client")
/// * `fault_string` - Message d'erreur (ex: "UPnPError")
/// * `upnp_error` - Code et description UPnP optionnels (ex: `(718, "ConflictInMappingEntry")`)
pub fn build_soap_fault(
    fault_code: &str,
    fault_string: &str,
    upnp_error: Option<(u16, &str)>,
) -> Result<String, xmltree::Error> {
    let mut fault = Element::new("s:Fault");
    fault
        .children
        .push(XMLNode::Element(text_element("faultcode", fault_code.to_string())));
    fault.children.push(XMLNode::Element(text_element(
        "faultstring",
        fault_string.to_string(),
    )));

    if let Some((code, desc)) = upnp_error {
        let mut upnp = Element::new("UPnPError");
        upnp.attributes.insert(
            "xmlns".to_string(),
            "urn:schemas-upnp-org:control-1-0".to_string(),
        );
        upnp.children
            .push(XMLNode::Element(text_element("errorCode", code.to_string())));
        upnp.children.push(XMLNode::Element(text_element(
            "errorDescription",
            desc.to_string(),
        )));

        let mut detail = Element::new("detail");
        detail.children.push(XMLNode::Element(upnp));
        fault.children.push(XMLNode::Element(detail));
    }

    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(fault));

    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::error_codes;

    #[test]
    fn test_build_simple_fault() {
        let xml = build_soap_fault("s:Client", "Invalid Action", None).unwrap();

        assert!(xml.contains("<s:Fault>"));
        assert!(xml.contains("<faultcode>s:Client</faultcode>"));
        assert!(xml.contains("<faultstring>Invalid Action</faultstring>"));
        assert!(!xml.contains("UPnPError"));
    }

    #[test]
    fn test_build_conflict_fault() {
        let xml = build_soap_fault(
            "s:Client",
            "UPnPError",
            Some((
                error_codes::CONFLICT_IN_MAPPING_ENTRY,
                "ConflictInMappingEntry",
            )),
        )
        .unwrap();

        assert!(xml.contains("<detail>"));
        assert!(xml.contains("<errorCode>718</errorCode>"));
        assert!(xml.contains("<errorDescription>ConflictInMappingEntry</errorDescription>"));
    }
}
