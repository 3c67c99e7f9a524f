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

//! A namespace-resolved XML element tree.
//!
//! Documents are read into [`Element`]s with all prefixes resolved to their
//! namespace URI, which makes decoding independent of the prefixes a producer
//! happened to choose. The writer binds the GML and XLink namespaces to the
//! `gml` and `xlink` prefixes on the root element.

use std::fmt;

mod members;
mod reader;
mod writer;

pub use members::Members;
pub(crate) use reader::read_document;
pub(crate) use writer::write_document;

/// The GML 3.1.1 namespace.
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// The XLink namespace.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// An attribute with its resolved namespace.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Namespace URI, `None` for unqualified attributes.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    pub value: String,
}

/// An element with its resolved namespace, attributes, child elements and
/// text content.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Namespace URI, `None` if the element is in no namespace.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    /// Concatenated character data directly inside this element.
    pub text: String,
}

impl Element {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an element in the GML namespace.
    pub fn gml(name: &str) -> Self {
        Self::new(Some(GML_NAMESPACE), name)
    }

    /// Returns `true` if the element has the namespace and local name.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }

    /// Returns `true` if the element is in the GML namespace.
    pub fn is_gml(&self) -> bool {
        self.namespace.as_deref() == Some(GML_NAMESPACE)
    }

    /// Returns the value of an unqualified attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns the value of a namespace-qualified attribute.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an unqualified attribute, replacing a previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.set(None, name, value.into());
    }

    /// Sets a namespace-qualified attribute, replacing a previous value.
    pub fn set_attribute_ns(&mut self, namespace: &str, name: &str, value: impl Into<String>) {
        self.set(Some(namespace), name, value.into());
    }

    fn set(&mut self, namespace: Option<&str>, name: &str, value: String) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.as_deref() == namespace && a.name == name)
        {
            Some(attribute) => attribute.value = value,
            None => self.attributes.push(Attribute {
                namespace: namespace.map(str::to_string),
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Returns the first GML child element with the local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(GML_NAMESPACE, name))
    }

    /// Returns all GML child elements with the local name in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |c| c.is(GML_NAMESPACE, name))
    }

    /// Returns all child elements in document order.
    pub fn elements(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the text content without surrounding whitespace.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)?;
        let text = self.text();
        if !text.is_empty() {
            write!(f, " {text}")?;
        }
        Ok(())
    }
}
