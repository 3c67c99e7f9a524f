// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Element, GML_NAMESPACE, XLINK_NAMESPACE};
use crate::config::WriterConfig;
use crate::error::Error;

/// Stem of the prefixes bound to namespaces other than GML and XLink.
const FOREIGN_PREFIX: &str = "ns";

/// Writes `root` as a complete document into `inner`.
pub(crate) fn write_document<W: Write>(
    root: &Element,
    inner: W,
    config: &WriterConfig,
) -> Result<W, Error> {
    let mut writer = match config.indent {
        Some(width) => Writer::new_with_indent(inner, b' ', width),
        None => Writer::new(inner),
    };

    if config.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    write_element(&mut writer, root, true)?;
    Ok(writer.into_inner())
}

/// Foreign namespaces used by one element's name and attributes, each bound
/// to `ns<index>` on that element. No default namespace is ever declared, so
/// unqualified children stay in no namespace.
#[derive(Default)]
struct Prefixes<'a> {
    bound: Vec<&'a str>,
}

impl<'a> Prefixes<'a> {
    fn qualify(&mut self, namespace: Option<&'a str>, name: &str) -> String {
        match namespace {
            None => name.to_string(),
            Some(GML_NAMESPACE) => format!("gml:{name}"),
            Some(XLINK_NAMESPACE) => format!("xlink:{name}"),
            Some(other) => {
                let index = match self.bound.iter().position(|&ns| ns == other) {
                    Some(index) => index,
                    None => {
                        self.bound.push(other);
                        self.bound.len() - 1
                    }
                };
                format!("{FOREIGN_PREFIX}{index}:{name}")
            }
        }
    }

    fn declare(&self, start: &mut BytesStart<'_>) {
        for (index, namespace) in self.bound.iter().enumerate() {
            let key = format!("xmlns:{FOREIGN_PREFIX}{index}");
            start.push_attribute((key.as_str(), *namespace));
        }
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    root: bool,
) -> Result<(), Error> {
    let mut prefixes = Prefixes::default();
    let name = prefixes.qualify(element.namespace.as_deref(), &element.name);

    let mut start = BytesStart::new(name.as_str());
    if root {
        start.push_attribute(("xmlns:gml", GML_NAMESPACE));
        start.push_attribute(("xmlns:xlink", XLINK_NAMESPACE));
    }

    for attribute in &element.attributes {
        let key = prefixes.qualify(attribute.namespace.as_deref(), &attribute.name);
        start.push_attribute((key.as_str(), attribute.value.as_str()));
    }
    prefixes.declare(&mut start);

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::xml::read_document;

    fn compact() -> WriterConfig {
        WriterConfig {
            indent: None,
            declaration: false,
        }
    }

    #[test]
    fn binds_prefixes_on_the_root() {
        let mut root = Element::gml("Point");
        root.set_attribute_ns(GML_NAMESPACE, "id", "p1");
        root.push(Element::gml("pos").with_text("1 2"));

        let bytes = write_document(&root, Vec::new(), &compact()).unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert_eq!(
            xml,
            "<gml:Point xmlns:gml=\"http://www.opengis.net/gml\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\" gml:id=\"p1\">\
             <gml:pos>1 2</gml:pos></gml:Point>"
        );
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let mut root = Element::gml("description");
        root.set_attribute_ns(XLINK_NAMESPACE, "title", "a \"quoted\" <title>");
        root.text = "fish & chips".to_string();

        let bytes = write_document(&root, Vec::new(), &compact()).unwrap();
        let back = read_document(&bytes, &ReaderConfig::default()).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn foreign_subtree_keeps_unqualified_children() {
        let mut root = Element::new(Some("urn:app"), "Result");
        root.push(Element::new(None, "plain").with_text("1"));
        let mut nested = Element::new(Some("urn:app"), "inner");
        nested.push(Element::new(None, "leaf").with_text("2"));
        root.push(nested);

        let bytes = write_document(&root, Vec::new(), &compact()).unwrap();
        let back = read_document(&bytes, &ReaderConfig::default()).unwrap();

        assert_eq!(back.children[0].namespace, None);
        assert_eq!(back.children[1].namespace.as_deref(), Some("urn:app"));
        assert_eq!(back.children[1].children[0].namespace, None);
        assert_eq!(back, root);
    }

    #[test]
    fn attributes_from_several_namespaces_keep_theirs() {
        let mut root = Element::gml("Point");
        root.set_attribute_ns("urn:a", "x", "1");
        root.set_attribute_ns("urn:b", "x", "2");
        root.set_attribute_ns("urn:b", "y", "3");

        let bytes = write_document(&root, Vec::new(), &compact()).unwrap();
        let xml = String::from_utf8(bytes.clone()).unwrap();
        assert!(xml.contains("ns0:x=\"1\" ns1:x=\"2\" ns1:y=\"3\""));

        let back = read_document(&bytes, &ReaderConfig::default()).unwrap();
        let keys: Vec<_> = back
            .attributes
            .iter()
            .map(|a| (a.namespace.as_deref(), a.name.as_str()))
            .collect();
        assert_eq!(
            keys,
            [(Some("urn:a"), "x"), (Some("urn:b"), "x"), (Some("urn:b"), "y")]
        );
        assert_eq!(back, root);
    }

    #[test]
    fn writes_the_declaration_when_configured() {
        let bytes =
            write_document(&Element::gml("Point"), Vec::new(), &WriterConfig::default()).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }
}
