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

//! Conversion between model values and [`Element`]s.
//!
//! Each payload struct implements [`Content`], which writes its attributes
//! and children into an element already named after the value's kind and
//! reads them back. The family enums generated by the registry macros
//! dispatch to these impls. Payloads shared by several kinds (e.g.
//! `ArcString` for `Arc` and `Circle`) receive the kind to pick the
//! kind-specific details.

mod feature;
mod geometry;
mod patch;
mod segment;
mod temporal;

use std::str::FromStr;

use crate::base::{
    AbstractFeature, AbstractGeometry, AbstractGml, AbstractTimePrimitive, RelatedTime,
};
use crate::envelope::{BoundingShape, Envelope};
use crate::error::Error;
use crate::feature::Location;
use crate::primitives::{
    Code, Coordinates, Description, DirectPosition, DirectPositionList, Measure, PositionMember,
    Positions, SrsReference,
};
use crate::property::{Actuate, ArrayProperty, Members, Property, Show, XLink, SIMPLE_LINK};
use crate::registry::{self, Kind, Variant};
use crate::xml::{Element, GML_NAMESPACE, XLINK_NAMESPACE};

/// The attributes and children of a payload.
pub(crate) trait Content: Sized {
    /// Writes the content into `element`, which is named after `kind`.
    fn write(&self, kind: Kind, element: &mut Element);

    /// Reads the content of an element named after `kind`.
    fn read(kind: Kind, element: &Element) -> Result<Self, Error>;
}

pub(crate) fn parse<T: FromStr>(field: &'static str, text: &str) -> Result<T, Error> {
    text.trim()
        .parse()
        .map_err(|_| Error::invalid(field, text.trim()))
}

pub(crate) fn parse_doubles(field: &'static str, text: &str) -> Result<Vec<f64>, Error> {
    text.split_whitespace().map(|v| parse(field, v)).collect()
}

/// Joins ordinates with single spaces.
pub(crate) fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses an optional unqualified attribute.
pub(crate) fn attribute<T: FromStr>(
    element: &Element,
    name: &'static str,
) -> Result<Option<T>, Error> {
    element.attribute(name).map(|v| parse(name, v)).transpose()
}

/// Returns the required GML child.
pub(crate) fn required<'a>(element: &'a Element, name: &'static str) -> Result<&'a Element, Error> {
    element.child(name).ok_or(Error::MissingField(name))
}

/// Parses the text of an optional GML child.
pub(crate) fn child_value<T: FromStr>(
    element: &Element,
    name: &'static str,
) -> Result<Option<T>, Error> {
    element
        .child(name)
        .map(|child| parse(name, child.text()))
        .transpose()
}

pub(crate) fn text_element(name: &str, text: impl Into<String>) -> Element {
    Element::gml(name).with_text(text)
}

/// Returns the first child element, which holds the value of a property.
pub(crate) fn value_of(element: &Element) -> Option<&Element> {
    element.elements().next()
}

/// Decodes an element as a member of the family `T`.
///
/// The element must be in the GML namespace and its kind must substitute
/// for the family's group.
pub(crate) fn decode_element<T: Variant>(element: &Element) -> Result<T, Error> {
    if !element.is_gml() {
        return Err(Error::unsupported(
            element.name.clone(),
            T::GROUP.element(),
        ));
    }
    registry::unwrap(&element.name, element)
}

// coordinate reference

pub(crate) fn write_srs(srs: &SrsReference, element: &mut Element) {
    if let Some(name) = &srs.srs_name {
        element.set_attribute("srsName", name.clone());
    }
    if let Some(dimension) = srs.srs_dimension {
        element.set_attribute("srsDimension", dimension.to_string());
    }
    if !srs.axis_labels.is_empty() {
        element.set_attribute("axisLabels", srs.axis_labels.join(" "));
    }
    if !srs.uom_labels.is_empty() {
        element.set_attribute("uomLabels", srs.uom_labels.join(" "));
    }
}

fn labels(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub(crate) fn read_srs(element: &Element) -> Result<SrsReference, Error> {
    Ok(SrsReference {
        srs_name: element.attribute("srsName").map(str::to_string),
        srs_dimension: attribute(element, "srsDimension")?,
        axis_labels: labels(element.attribute("axisLabels")),
        uom_labels: labels(element.attribute("uomLabels")),
    })
}

// positions

pub(crate) fn pos_element(name: &str, pos: &DirectPosition) -> Element {
    let mut element = text_element(name, join(&pos.ordinates));
    write_srs(&pos.srs, &mut element);
    element
}

pub(crate) fn read_pos(element: &Element) -> Result<DirectPosition, Error> {
    Ok(DirectPosition {
        ordinates: parse_doubles("pos", element.text())?,
        srs: read_srs(element)?,
    })
}

/// Reads a GML 2 `coord` element with `X`, `Y` and `Z` children.
pub(crate) fn read_coord(element: &Element) -> Result<DirectPosition, Error> {
    let mut ordinates = Vec::with_capacity(3);
    for axis in ["X", "Y", "Z"] {
        match element.child(axis) {
            Some(value) => ordinates.push(parse("coord", value.text())?),
            None => break,
        }
    }
    if ordinates.is_empty() {
        return Err(Error::MissingField("X"));
    }
    Ok(DirectPosition::new(ordinates))
}

pub(crate) fn coordinates_element(coordinates: &Coordinates) -> Element {
    let defaults = Coordinates::default();
    let mut element = text_element("coordinates", coordinates.text.clone());
    if coordinates.decimal != defaults.decimal {
        element.set_attribute("decimal", coordinates.decimal.clone());
    }
    if coordinates.cs != defaults.cs {
        element.set_attribute("cs", coordinates.cs.clone());
    }
    if coordinates.ts != defaults.ts {
        element.set_attribute("ts", coordinates.ts.clone());
    }
    element
}

pub(crate) fn read_coordinates(element: &Element) -> Coordinates {
    let defaults = Coordinates::default();
    let separator = |name: &str, default: String| {
        element
            .attribute(name)
            .map_or(default, str::to_string)
    };
    Coordinates {
        text: element.text().to_string(),
        decimal: separator("decimal", defaults.decimal),
        cs: separator("cs", defaults.cs),
        ts: separator("ts", defaults.ts),
    }
}

pub(crate) fn write_positions(positions: &Positions, element: &mut Element) {
    match positions {
        Positions::List(list) => {
            let mut pos_list = text_element("posList", join(&list.values));
            write_srs(&list.srs, &mut pos_list);
            if let Some(count) = list.count {
                pos_list.set_attribute("count", count.to_string());
            }
            element.push(pos_list);
        }
        Positions::Points(members) => {
            for member in members {
                match member {
                    PositionMember::Pos(pos) => element.push(pos_element("pos", pos)),
                    PositionMember::Point(point) => {
                        element.push(property_element("pointProperty", point))
                    }
                }
            }
        }
        Positions::Coordinates(coordinates) => element.push(coordinates_element(coordinates)),
    }
}

/// Reads the positions among the children of `element`. Missing positions
/// read as an empty `posList`.
pub(crate) fn read_positions(element: &Element) -> Result<Positions, Error> {
    if let Some(list) = element.child("posList") {
        return Ok(Positions::List(DirectPositionList {
            values: parse_doubles("posList", list.text())?,
            srs: read_srs(list)?,
            count: attribute(list, "count")?,
        }));
    }

    if let Some(coordinates) = element.child("coordinates") {
        return Ok(Positions::Coordinates(read_coordinates(coordinates)));
    }

    let mut members = Vec::new();
    for child in element.elements().filter(|c| c.is_gml()) {
        match child.name.as_str() {
            "pos" => members.push(PositionMember::Pos(read_pos(child)?)),
            "coord" => members.push(PositionMember::Pos(read_coord(child)?)),
            "pointProperty" | "pointRep" => {
                members.push(PositionMember::Point(read_property(child)?))
            }
            _ => {}
        }
    }

    if members.is_empty() {
        Ok(Positions::default())
    } else {
        Ok(Positions::Points(members))
    }
}

// measures, codes and descriptions

pub(crate) fn measure_element(name: &str, measure: &Measure) -> Element {
    let mut element = text_element(name, measure.value.to_string());
    element.set_attribute("uom", measure.uom.clone());
    element
}

pub(crate) fn read_measure(element: &Element) -> Result<Measure, Error> {
    Ok(Measure {
        value: parse("measure", element.text())?,
        uom: element.attribute("uom").unwrap_or_default().to_string(),
    })
}

pub(crate) fn code_element(name: &str, code: &Code) -> Element {
    let mut element = text_element(name, code.value.clone());
    if let Some(space) = &code.code_space {
        element.set_attribute("codeSpace", space.clone());
    }
    element
}

pub(crate) fn read_code(element: &Element) -> Code {
    Code {
        value: element.text().to_string(),
        code_space: element.attribute("codeSpace").map(str::to_string),
    }
}

fn description_element(description: &Description) -> Element {
    match description {
        Description::Text(text) => text_element("description", text.clone()),
        Description::Reference(link) => {
            let mut element = Element::gml("description");
            write_xlink(link, &mut element);
            element
        }
    }
}

fn read_description(element: &Element) -> Result<Description, Error> {
    Ok(match read_xlink(element)? {
        Some(link) => Description::Reference(link),
        None => Description::Text(element.text().to_string()),
    })
}

// xlink and properties

pub(crate) fn write_xlink(link: &XLink, element: &mut Element) {
    element.set_attribute_ns(XLINK_NAMESPACE, "href", link.href.clone());
    let optional = [
        ("role", &link.role),
        ("arcrole", &link.arcrole),
        ("title", &link.title),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            element.set_attribute_ns(XLINK_NAMESPACE, name, value.clone());
        }
    }
    if let Some(show) = link.show {
        element.set_attribute_ns(XLINK_NAMESPACE, "show", show.as_str());
    }
    if let Some(actuate) = link.actuate {
        element.set_attribute_ns(XLINK_NAMESPACE, "actuate", actuate.as_str());
    }
    if link.link_type != SIMPLE_LINK {
        element.set_attribute_ns(XLINK_NAMESPACE, "type", link.link_type.clone());
    }
    if let Some(schema) = &link.remote_schema {
        element.set_attribute_ns(GML_NAMESPACE, "remoteSchema", schema.clone());
    }
}

/// Reads the XLink attributes, `None` if there is no `xlink:href`.
pub(crate) fn read_xlink(element: &Element) -> Result<Option<XLink>, Error> {
    let Some(href) = element.attribute_ns(XLINK_NAMESPACE, "href") else {
        return Ok(None);
    };
    let xlink = |name| element.attribute_ns(XLINK_NAMESPACE, name).map(str::to_string);

    Ok(Some(XLink {
        href: href.to_string(),
        role: xlink("role"),
        arcrole: xlink("arcrole"),
        title: xlink("title"),
        show: element
            .attribute_ns(XLINK_NAMESPACE, "show")
            .map(str::parse::<Show>)
            .transpose()?,
        actuate: element
            .attribute_ns(XLINK_NAMESPACE, "actuate")
            .map(str::parse::<Actuate>)
            .transpose()?,
        link_type: xlink("type").unwrap_or_else(|| SIMPLE_LINK.to_string()),
        remote_schema: element
            .attribute_ns(GML_NAMESPACE, "remoteSchema")
            .map(str::to_string),
    }))
}

pub(crate) fn property_element<T: Variant>(name: &str, property: &Property<T>) -> Element {
    let mut element = Element::gml(name);
    match property {
        Property::Inline(value) => element.push(value.encode()),
        Property::Reference(link) => write_xlink(link, &mut element),
    }
    element
}

/// Reads a property: the inline value if the element has a child, the
/// reference otherwise.
pub(crate) fn read_property<T: Variant>(element: &Element) -> Result<Property<T>, Error> {
    match value_of(element) {
        Some(value) => Ok(Property::inline(decode_element(value)?)),
        None => read_xlink(element)?
            .map(Property::Reference)
            .ok_or(Error::MissingField("xlink:href")),
    }
}

pub(crate) fn array_element<T: Variant>(name: &str, array: &ArrayProperty<T>) -> Element {
    let mut element = Element::gml(name);
    for value in array {
        element.push(value.encode());
    }
    element
}

pub(crate) fn read_array<T: Variant>(element: &Element) -> Result<ArrayProperty<T>, Error> {
    element.elements().map(decode_element::<T>).collect()
}

pub(crate) fn write_members<T: Variant>(
    members: &Members<T>,
    element: &mut Element,
    member: &str,
    array: &str,
) {
    for property in &members.member {
        element.push(property_element(member, property));
    }
    if let Some(values) = &members.members {
        element.push(array_element(array, values));
    }
}

pub(crate) fn read_members<T: Variant>(
    element: &Element,
    member: &str,
    array: &str,
) -> Result<Members<T>, Error> {
    Ok(Members {
        member: element
            .children_named(member)
            .map(read_property::<T>)
            .collect::<Result<_, _>>()?,
        members: element.child(array).map(read_array::<T>).transpose()?,
    })
}

// abstract levels

pub(crate) fn write_gml(gml: &AbstractGml, element: &mut Element) {
    if let Some(id) = &gml.id {
        element.set_attribute_ns(GML_NAMESPACE, "id", id.clone());
    }
    if let Some(description) = &gml.description {
        element.push(description_element(description));
    }
    for name in &gml.names {
        element.push(code_element("name", name));
    }
}

pub(crate) fn read_gml(element: &Element) -> Result<AbstractGml, Error> {
    let id = element
        .attribute_ns(GML_NAMESPACE, "id")
        .or_else(|| element.attribute("fid"));

    Ok(AbstractGml {
        id: id.map(str::to_string),
        description: element
            .child("description")
            .map(read_description)
            .transpose()?,
        names: element.children_named("name").map(read_code).collect(),
    })
}

pub(crate) fn write_geometry(geometry: &AbstractGeometry, element: &mut Element) {
    write_gml(&geometry.gml, element);
    write_srs(&geometry.srs, element);
}

pub(crate) fn read_geometry(element: &Element) -> Result<AbstractGeometry, Error> {
    Ok(AbstractGeometry {
        gml: read_gml(element)?,
        srs: read_srs(element)?,
    })
}

pub(crate) fn write_feature(feature: &AbstractFeature, element: &mut Element) {
    write_gml(&feature.gml, element);

    if let Some(shape) = &feature.bounded_by {
        let mut bounded_by = Element::gml("boundedBy");
        match shape {
            BoundingShape::Envelope(envelope) => bounded_by.push(envelope.encode()),
            BoundingShape::Null(reason) => bounded_by.push(text_element("Null", reason.clone())),
        }
        element.push(bounded_by);
    }

    if let Some(location) = &feature.location {
        let mut property = Element::gml("location");
        match location {
            Location::Geometry(Property::Inline(geometry)) => property.push(geometry.encode()),
            Location::Geometry(Property::Reference(link)) => write_xlink(link, &mut property),
            Location::Keyword(code) => property.push(code_element("LocationKeyWord", code)),
            Location::Text(text) => property.push(text_element("LocationString", text.clone())),
            Location::Null(reason) => property.push(text_element("Null", reason.clone())),
        }
        element.push(property);
    }
}

fn read_bounded_by(element: &Element) -> Result<BoundingShape, Error> {
    let value = value_of(element).ok_or(Error::MissingField("Envelope"))?;
    if value.is(GML_NAMESPACE, "Null") {
        Ok(BoundingShape::Null(value.text().to_string()))
    } else {
        decode_element::<Envelope>(value).map(BoundingShape::Envelope)
    }
}

fn read_location(element: &Element) -> Result<Location, Error> {
    let Some(value) = value_of(element) else {
        return read_xlink(element)?
            .map(|link| Location::Geometry(Property::Reference(link)))
            .ok_or(Error::MissingField("xlink:href"));
    };

    if !value.is_gml() {
        return Err(Error::unsupported(value.name.clone(), "location"));
    }
    Ok(match value.name.as_str() {
        "LocationKeyWord" => Location::Keyword(read_code(value)),
        "LocationString" => Location::Text(value.text().to_string()),
        "Null" => Location::Null(value.text().to_string()),
        _ => Location::Geometry(Property::inline(decode_element(value)?)),
    })
}

pub(crate) fn read_feature(element: &Element) -> Result<AbstractFeature, Error> {
    Ok(AbstractFeature {
        gml: read_gml(element)?,
        bounded_by: element
            .child("boundedBy")
            .map(read_bounded_by)
            .transpose()?,
        location: element.child("location").map(read_location).transpose()?,
    })
}

pub(crate) fn write_time(time: &AbstractTimePrimitive, element: &mut Element) {
    write_gml(&time.gml, element);
    for related in &time.related_time {
        let mut property = property_element("relatedTime", &related.time);
        if let Some(position) = &related.relative_position {
            property.set_attribute("relativePosition", position.clone());
        }
        element.push(property);
    }
}

pub(crate) fn read_time(element: &Element) -> Result<AbstractTimePrimitive, Error> {
    let related_time = element
        .children_named("relatedTime")
        .map(|related| {
            Ok(RelatedTime {
                relative_position: related.attribute("relativePosition").map(str::to_string),
                time: read_property(related)?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(AbstractTimePrimitive {
        gml: read_gml(element)?,
        related_time,
    })
}
