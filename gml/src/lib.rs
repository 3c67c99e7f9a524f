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

//! GML 3.1.1 object model.
//!
//! This crate provides Rust types for the geometry, feature and temporal
//! elements of the Geography Markup Language together with their XML
//! encoding. Every element that may stand in for an abstract element
//! (`gml:Point` for `gml:_Geometry`, `gml:Arc` for `gml:_CurveSegment`) is a
//! variant of a closed enum. Decoding looks up the element name in a static
//! [registry] and rejects names outside the expected substitution group.
//!
//! # Examples
//!
//! Read a point, move it and write it back:
//!
//! ```
//! use gml::geometry::Geometry;
//! use gml::registry::{Kind, Variant};
//!
//! # fn main() -> Result<(), gml::Error> {
//! let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml" srsName="EPSG:4326">
//!                <gml:pos>10.0 52.0</gml:pos>
//!              </gml:Point>"#;
//!
//! let mut geometry: Geometry = gml::from_str(xml)?;
//! assert_eq!(geometry.kind(), Kind::Point);
//!
//! if let Geometry::Point(point) = &mut geometry {
//!     point.pos.ordinates[0] += 1.0;
//! }
//!
//! let written = gml::to_string(&geometry)?;
//! assert!(written.contains("<gml:pos>11 52</gml:pos>"));
//! #     Ok(())
//! # }
//! ```
//!
//! An element of the wrong group is an error, not a silent fallback:
//!
//! ```
//! use gml::segment::CurveSegment;
//!
//! let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml"><gml:pos>1 2</gml:pos></gml:Point>"#;
//! let result = gml::from_str::<CurveSegment>(xml);
//! assert!(matches!(result, Err(gml::Error::UnsupportedVariant { .. })));
//! ```
//!
//! # Axis order
//!
//! Positions keep their ordinates in document order. Helpers that take or
//! return two ordinates (`DirectPosition::xy`, `Envelope::expand_to`,
//! `FeatureCollection::compute_bounds`) read index 0 as `x` and index 1 as
//! `y` and never swap axes, whatever the CRS declares.
//!
//! # Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for the model.
//! - `geo`: conversions into [`geo`](https://docs.rs/geo) types.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

pub mod base;
pub mod config;
pub mod crs;
pub mod envelope;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod ops;
pub mod patch;
pub mod primitives;
pub mod property;
pub mod registry;
pub mod segment;
pub mod temporal;
pub mod xml;

pub(crate) mod codec;
pub(crate) mod display;

#[cfg(feature = "geo")]
#[cfg_attr(docsrs, doc(cfg(feature = "geo")))]
pub mod interop;

use std::io::Write;

use log::debug;

pub use config::{ReaderConfig, WriterConfig};
pub use envelope::{BoundingShape, Envelope, LegacyEnvelope};
pub use error::Error;
pub use primitives::{
    Code, Coordinates, DirectPosition, DirectPositionList, Measure, Positions, SrsReference,
};
pub use property::{ArrayProperty, Members, Property, XLink};
pub use registry::{Group, Head, Kind, Variant};

/// Decodes a document whose root element is a member of `T`.
///
/// # Errors
///
/// Returns [`Error::Xml`] for malformed XML and
/// [`Error::UnsupportedVariant`] if the root element is not a member of `T`.
pub fn from_str<T: Variant>(xml: &str) -> Result<T, Error> {
    from_slice(xml.as_bytes())
}

/// Decodes a document from bytes with the default [`ReaderConfig`].
pub fn from_slice<T: Variant>(data: &[u8]) -> Result<T, Error> {
    from_slice_with(data, &ReaderConfig::default())
}

pub fn from_slice_with<T: Variant>(data: &[u8], config: &ReaderConfig) -> Result<T, Error> {
    let root = xml::read_document(data, config)?;
    debug!("decoding <{}> as {}", root.name, T::GROUP.element());
    codec::decode_element(&root)
}

/// Encodes `value` as a standalone document with the default
/// [`WriterConfig`].
pub fn to_string<T: Variant>(value: &T) -> Result<String, Error> {
    to_string_with(value, &WriterConfig::default())
}

pub fn to_string_with<T: Variant>(value: &T, config: &WriterConfig) -> Result<String, Error> {
    let bytes = to_writer(value, Vec::new(), config)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encodes `value` into `writer` and hands the writer back.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<T: Variant, W: Write>(
    value: &T,
    writer: W,
    config: &WriterConfig,
) -> Result<W, Error> {
    let element = value.encode();
    debug!("encoding {:?} as <{}>", value.kind(), element.name);
    xml::write_document(&element, writer, config)
}
