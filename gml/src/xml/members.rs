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

use std::marker::PhantomData;

use log::trace;
use quick_xml::events::Event;
use quick_xml::reader::NsReader;

use super::reader::{read_content, start_element};
use crate::config::ReaderConfig;
use crate::error::Error;
use crate::registry::{Kind, Variant};

/// Streaming iterator over the members of a family found in a document.
///
/// Yields every outermost GML element whose kind substitutes for the
/// family's group, in document order. Other elements are descended into, so
/// members nested in arbitrary wrappers (feature members, application
/// schema elements) are found too. Once a member is yielded its subtree is
/// consumed; members nested inside it are part of its value.
///
/// # Examples
///
/// ```
/// use gml::geometry::Geometry;
/// use gml::xml::Members;
///
/// let xml = br#"
///   <app:Airports xmlns:app="urn:example:app" xmlns:gml="http://www.opengis.net/gml">
///     <app:arp><gml:Point gml:id="a"><gml:pos>52.3 13.5</gml:pos></gml:Point></app:arp>
///     <app:name>Schoenefeld</app:name>
///     <app:arp><gml:Point gml:id="b"><gml:pos>50.0 8.6</gml:pos></gml:Point></app:arp>
///   </app:Airports>"#;
///
/// let points: Vec<Geometry> = Members::new(&xml[..]).collect::<Result<_, _>>().unwrap();
/// assert_eq!(points.len(), 2);
/// ```
pub struct Members<'a, T> {
    reader: NsReader<&'a [u8]>,
    buf: Vec<u8>,
    family: PhantomData<T>,
}

impl<'a, T: Variant> Members<'a, T> {
    /// Creates a new `Members` iterator from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, &ReaderConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: &ReaderConfig) -> Self {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().trim_text(config.trim_text);
        Self {
            reader,
            buf: Vec::new(),
            family: PhantomData,
        }
    }
}

impl<T: Variant> Iterator for Members<'_, T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            let (start, empty) = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => (e.into_owned(), false),
                Ok(Event::Empty(e)) => (e.into_owned(), true),
                Ok(Event::Eof) => return None,
                Err(e) => return Some(Err(e.into())),
                _ => continue,
            };

            let element = match start_element(&self.reader, &start) {
                Ok(element) => element,
                Err(e) => return Some(Err(e)),
            };

            let kind = Kind::from_element(&element.name)
                .filter(|kind| element.is_gml() && kind.substitutes(T::GROUP));
            let Some(kind) = kind else {
                trace!("skipping <{}>", element.name);
                continue;
            };

            let result = if empty {
                T::decode(kind, &element)
            } else {
                read_content(&mut self.reader, element).and_then(|el| T::decode(kind, &el))
            };

            return Some(result);
        }
    }
}
