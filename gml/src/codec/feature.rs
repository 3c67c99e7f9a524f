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

use super::{
    code_element, decode_element, pos_element, property_element, read_code, read_coord,
    read_coordinates, read_feature, read_members, read_pos, read_property, read_srs, read_xlink,
    required, text_element, value_of, write_feature, write_members, write_srs, write_xlink,
    Content,
};
use crate::envelope::{Envelope, LegacyEnvelope};
use crate::error::Error;
use crate::feature::{
    AnyFeature, DirectedObservation, Direction, FeatureCollection, Observation, Target,
};
use crate::property::Property;
use crate::registry::{Group, Head, Kind, Variant};
use crate::xml::Element;

impl Content for Envelope {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_srs(&self.srs, element);
        element.push(pos_element("lowerCorner", &self.lower_corner));
        element.push(pos_element("upperCorner", &self.upper_corner));
    }

    /// Reads `lowerCorner` and `upperCorner`, or one of the legacy forms:
    /// two `pos`, two `coord` or a `coordinates` string.
    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        let mut envelope = if let Some(lower) = element.child("lowerCorner") {
            Envelope::new(read_pos(lower)?, read_pos(required(element, "upperCorner")?)?)
        } else if let Some(coordinates) = element.child("coordinates") {
            Envelope::try_from(LegacyEnvelope::Coordinates(read_coordinates(coordinates)))?
        } else {
            let mut positions = element
                .children_named("pos")
                .map(read_pos)
                .collect::<Result<Vec<_>, _>>()?;
            if positions.is_empty() {
                positions = element
                    .children_named("coord")
                    .map(read_coord)
                    .collect::<Result<_, _>>()?;
            }
            if positions.is_empty() {
                return Err(Error::MissingField("lowerCorner"));
            }
            Envelope::try_from(LegacyEnvelope::Positions(positions))?
        };

        envelope.srs = read_srs(element)?;
        Ok(envelope)
    }
}

impl Content for FeatureCollection {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_feature(&self.feature, element);
        write_members(&self.members, element, "featureMember", "featureMembers");
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            feature: read_feature(element)?,
            members: read_members(element, "featureMember", "featureMembers")?,
        })
    }
}

fn target_element(target: &Target) -> Element {
    let mut element = Element::gml("target");
    match target {
        Target::Feature(feature) => element.push(feature.encode()),
        Target::Geometry(geometry) => element.push(geometry.encode()),
        Target::Reference(link) => write_xlink(link, &mut element),
    }
    element
}

/// Reads a target as a feature if its element substitutes for `_Feature`,
/// as a geometry otherwise.
fn read_target(element: &Element) -> Result<Target, Error> {
    let Some(value) = value_of(element) else {
        return read_xlink(element)?
            .map(Target::Reference)
            .ok_or(Error::MissingField("xlink:href"));
    };

    let is_feature = Kind::from_element(&value.name)
        .is_some_and(|kind| kind.substitutes(Group::Abstract(Head::Feature)));
    if is_feature {
        decode_element::<AnyFeature>(value).map(|f| Target::Feature(Box::new(f)))
    } else {
        decode_element(value).map(|g| Target::Geometry(Box::new(g)))
    }
}

fn result_element(result: &Property<Element>) -> Element {
    let mut element = Element::gml("resultOf");
    match result {
        Property::Inline(value) => element.push(value.as_ref().clone()),
        Property::Reference(link) => write_xlink(link, &mut element),
    }
    element
}

fn read_result(element: &Element) -> Result<Property<Element>, Error> {
    match value_of(element) {
        Some(value) => Ok(Property::inline(value.clone())),
        None => read_xlink(element)?
            .map(Property::Reference)
            .ok_or(Error::MissingField("xlink:href")),
    }
}

impl Content for Observation {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_feature(&self.feature, element);
        if let Some(time) = &self.valid_time {
            element.push(property_element("validTime", time));
        }
        if let Some(using) = &self.using {
            element.push(property_element("using", using));
        }
        if let Some(target) = &self.target {
            element.push(target_element(target));
        }
        if let Some(result) = &self.result_of {
            element.push(result_element(result));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            feature: read_feature(element)?,
            valid_time: element.child("validTime").map(read_property).transpose()?,
            using: element.child("using").map(read_property).transpose()?,
            target: element
                .child("target")
                .or_else(|| element.child("subject"))
                .map(read_target)
                .transpose()?,
            result_of: element.child("resultOf").map(read_result).transpose()?,
        })
    }
}

fn direction_element(direction: &Direction) -> Element {
    let value = match direction {
        Direction::Vector(vector) => {
            let mut value = Element::gml("DirectionVector");
            value.push(pos_element("vector", vector));
            value
        }
        Direction::CompassPoint(point) => text_element("CompassPoint", point.clone()),
        Direction::Keyword(code) => code_element("DirectionKeyword", code),
        Direction::Text(text) => text_element("DirectionString", text.clone()),
    };

    let mut element = Element::gml("direction");
    element.push(value);
    element
}

fn read_direction(element: &Element) -> Result<Direction, Error> {
    let value = value_of(element).ok_or(Error::MissingField("DirectionVector"))?;
    if !value.is_gml() {
        return Err(Error::unsupported(value.name.clone(), "direction"));
    }

    match value.name.as_str() {
        "DirectionVector" => Ok(Direction::Vector(read_pos(required(value, "vector")?)?)),
        "CompassPoint" => Ok(Direction::CompassPoint(value.text().to_string())),
        "DirectionKeyword" => Ok(Direction::Keyword(read_code(value))),
        "DirectionString" => Ok(Direction::Text(value.text().to_string())),
        other => Err(Error::unsupported(other, "direction")),
    }
}

impl Content for DirectedObservation {
    fn write(&self, kind: Kind, element: &mut Element) {
        self.observation.write(kind, element);
        if let Some(direction) = &self.direction {
            element.push(direction_element(direction));
        }
    }

    fn read(kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            observation: Observation::read(kind, element)?,
            direction: element.child("direction").map(read_direction).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ReaderConfig;
    use crate::envelope::Envelope;
    use crate::error::Error;
    use crate::feature::{AnyFeature, Direction, Target};
    use crate::primitives::DirectPosition;
    use crate::property::Property;
    use crate::registry::{self, Kind, Variant};
    use crate::xml::read_document;

    fn envelope(xml: &[u8]) -> Result<Envelope, Error> {
        let root = read_document(xml, &ReaderConfig::default())?;
        registry::unwrap(&root.name, &root)
    }

    fn feature(xml: &[u8]) -> Result<AnyFeature, Error> {
        let root = read_document(xml, &ReaderConfig::default())?;
        registry::unwrap(&root.name, &root)
    }

    #[test]
    fn envelope_from_corners() {
        let env = envelope(
            br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml" srsName="EPSG:4326">
                  <gml:lowerCorner>1 2</gml:lowerCorner>
                  <gml:upperCorner>3 4</gml:upperCorner>
                </gml:Envelope>"#,
        )
        .unwrap();
        assert_eq!(env.lower_corner, DirectPosition::xy(1.0, 2.0));
        assert_eq!(env.upper_corner, DirectPosition::xy(3.0, 4.0));
        assert_eq!(env.srs.srs_name.as_deref(), Some("EPSG:4326"));
    }

    #[test]
    fn envelope_from_legacy_forms() {
        let expected = Envelope::xy((1.0, 2.0), (3.0, 4.0));

        let from_pos = envelope(
            br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml">
                  <gml:pos>1 2</gml:pos><gml:pos>3 4</gml:pos>
                </gml:Envelope>"#,
        );
        assert_eq!(from_pos, Ok(expected.clone()));

        let from_coord = envelope(
            br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml">
                  <gml:coord><gml:X>1</gml:X><gml:Y>2</gml:Y></gml:coord>
                  <gml:coord><gml:X>3</gml:X><gml:Y>4</gml:Y></gml:coord>
                </gml:Envelope>"#,
        );
        assert_eq!(from_coord, Ok(expected.clone()));

        let from_coordinates = envelope(
            br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml">
                  <gml:coordinates>1,2 3,4</gml:coordinates>
                </gml:Envelope>"#,
        );
        assert_eq!(from_coordinates, Ok(expected.clone()));

        // legacy forms are written back as corners
        let written = expected.encode();
        assert!(written.child("lowerCorner").is_some());
        assert!(written.child("pos").is_none());
    }

    #[test]
    fn envelope_needs_both_corners() {
        let missing_upper = envelope(
            br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml">
                  <gml:lowerCorner>1 2</gml:lowerCorner>
                </gml:Envelope>"#,
        );
        assert_eq!(missing_upper, Err(Error::MissingField("upperCorner")));

        let empty = envelope(br#"<gml:Envelope xmlns:gml="http://www.opengis.net/gml"/>"#);
        assert_eq!(empty, Err(Error::MissingField("lowerCorner")));
    }

    #[test]
    fn observation_target_is_split_by_kind() {
        let observation = feature(
            br##"<gml:Observation xmlns:gml="http://www.opengis.net/gml"
                    xmlns:xlink="http://www.w3.org/1999/xlink">
                  <gml:validTime xlink:href="#t1"/>
                  <gml:target><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:target>
                  <gml:resultOf><reading xmlns="urn:example">42</reading></gml:resultOf>
                </gml:Observation>"##,
        )
        .unwrap();

        let AnyFeature::Observation(observation) = &observation else {
            panic!("expected an Observation");
        };
        assert!(matches!(&observation.target, Some(Target::Geometry(g)) if g.kind() == Kind::Point));
        assert_eq!(
            observation.valid_time.as_ref().and_then(Property::href),
            Some("#t1")
        );
        let result = observation.result_of.as_ref().and_then(Property::get_inline);
        assert_eq!(result.map(|e| e.text()), Some("42"));

        let nested = feature(
            br#"<gml:Observation xmlns:gml="http://www.opengis.net/gml">
                  <gml:target><gml:Observation/></gml:target>
                </gml:Observation>"#,
        )
        .unwrap();
        let AnyFeature::Observation(nested) = &nested else {
            panic!("expected an Observation");
        };
        assert!(matches!(nested.target, Some(Target::Feature(_))));
    }

    #[test]
    fn directed_observation_reads_compass_point() {
        let observation = feature(
            br#"<gml:DirectedObservation xmlns:gml="http://www.opengis.net/gml">
                  <gml:direction><gml:CompassPoint>NNE</gml:CompassPoint></gml:direction>
                </gml:DirectedObservation>"#,
        )
        .unwrap();

        let AnyFeature::DirectedObservation(directed) = &observation else {
            panic!("expected a DirectedObservation");
        };
        assert_eq!(directed.direction, Some(Direction::CompassPoint("NNE".into())));
        assert!(observation.kind().substitutes(registry::Group::Concrete(Kind::Observation)));
    }
}
