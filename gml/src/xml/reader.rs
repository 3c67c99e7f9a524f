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

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::{Attribute, Element};
use crate::config::ReaderConfig;
use crate::error::Error;

/// Reads the root element of a document with all its descendants.
pub(crate) fn read_document(data: &[u8], config: &ReaderConfig) -> Result<Element, Error> {
    let mut reader = NsReader::from_reader(data);
    reader.config_mut().trim_text(config.trim_text);

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let root = start_element(&reader, &e)?;
                return read_content(&mut reader, root);
            }
            Event::Empty(e) => return start_element(&reader, &e),
            Event::Eof => return Err(Error::MissingField("root element")),
            _ => continue,
        }
    }
}

/// Reads the content of `element` up to and including its end tag.
pub(super) fn read_content<R: BufRead>(
    reader: &mut NsReader<R>,
    element: Element,
) -> Result<Element, Error> {
    let mut buf = Vec::new();
    let mut stack = vec![element];

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child = start_element(reader, &e)?;
                stack.push(child);
            }
            Event::Empty(e) => {
                let child = start_element(reader, &e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(child);
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(&c)?);
                }
            }
            Event::End(_) => {
                let done = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(done),
                    None => return Ok(done),
                }
            }
            Event::Eof => return Err(Error::Xml("unexpected end of document".to_string())),
            _ => continue,
        }
    }
}

/// Creates an element from a start tag, resolving element and attribute
/// namespaces. Namespace declarations are not kept as attributes.
pub(super) fn start_element<R>(reader: &NsReader<R>, start: &BytesStart) -> Result<Element, Error> {
    let (ns, local) = reader.resolve_element(start.name());
    let mut element = Element {
        namespace: namespace(ns)?,
        name: std::str::from_utf8(local.as_ref())?.to_string(),
        ..Default::default()
    };

    for attribute in start.attributes() {
        let attribute = attribute?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }

        let (ns, local) = reader.resolve_attribute(attribute.key);
        element.attributes.push(Attribute {
            namespace: namespace(ns)?,
            name: std::str::from_utf8(local.as_ref())?.to_string(),
            value: attribute.unescape_value()?.into_owned(),
        });
    }

    Ok(element)
}

fn namespace(result: ResolveResult<'_>) -> Result<Option<String>, Error> {
    match result {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(Error::Xml(format!(
            "unknown namespace prefix: {}",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}
