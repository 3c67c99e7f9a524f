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
    array_element, decode_element, measure_element, pos_element, property_element, read_array,
    read_coord, read_coordinates, read_geometry, read_measure, read_members, read_pos,
    read_positions, read_property, required, value_of, write_geometry, write_members,
    write_positions, Content,
};
use crate::error::Error;
use crate::geometry::{
    Aggregate, AnyCurve, AnyRing, AnySurface, CompositeCurve, CompositeSurface, Curve,
    LineString, LinearRing, OrientableCurve, OrientableSurface, Point, Polygon, Ring, Sign,
    Surface, Tin,
};
use crate::patch::SurfacePatch;
use crate::registry::{Group, Kind, Variant};
use crate::segment::LineStringSegment;
use crate::xml::Element;

impl Content for Point {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        element.push(pos_element("pos", &self.pos));
    }

    /// Also accepts the GML 2 `coord` and `coordinates` forms.
    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        let pos = if let Some(pos) = element.child("pos") {
            read_pos(pos)?
        } else if let Some(coord) = element.child("coord") {
            read_coord(coord)?
        } else if let Some(coordinates) = element.child("coordinates") {
            read_coordinates(coordinates)
                .to_positions()?
                .into_iter()
                .next()
                .ok_or(Error::MissingField("pos"))?
        } else {
            return Err(Error::MissingField("pos"));
        };

        Ok(Self {
            geometry: read_geometry(element)?,
            pos,
        })
    }
}

impl Content for LineString {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        write_positions(&self.positions, element);
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            positions: read_positions(element)?,
        })
    }
}

impl Content for LinearRing {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        write_positions(&self.positions, element);
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            positions: read_positions(element)?,
        })
    }
}

impl Content for Curve {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        element.push(array_element("segments", &self.segments));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            segments: read_array(required(element, "segments")?)?,
        })
    }
}

fn write_orientation(orientation: Sign, element: &mut Element) {
    if orientation == Sign::Negative {
        element.set_attribute("orientation", orientation.as_str());
    }
}

fn read_orientation(element: &Element) -> Result<Sign, Error> {
    match element.attribute("orientation") {
        None | Some("+") => Ok(Sign::Positive),
        Some("-") => Ok(Sign::Negative),
        Some(other) => Err(Error::invalid("orientation", other)),
    }
}

impl Content for OrientableCurve {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        write_orientation(self.orientation, element);
        element.push(property_element("baseCurve", &self.base_curve));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            base_curve: read_property(required(element, "baseCurve")?)?,
            orientation: read_orientation(element)?,
        })
    }
}

impl Content for CompositeCurve {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        for member in &self.curve_members {
            element.push(property_element("curveMember", member));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            curve_members: element
                .children_named("curveMember")
                .map(read_property::<AnyCurve>)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl Content for Ring {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        for member in &self.curve_members {
            element.push(property_element("curveMember", member));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            curve_members: element
                .children_named("curveMember")
                .map(read_property::<AnyCurve>)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Writes a ring property such as `exterior`, which holds its ring inline.
pub(super) fn ring_element(name: &str, ring: &AnyRing) -> Element {
    let mut element = Element::gml(name);
    element.push(ring.encode());
    element
}

pub(super) fn read_ring(element: &Element) -> Result<AnyRing, Error> {
    value_of(element)
        .ok_or(Error::MissingField("_Ring"))
        .and_then(decode_element::<AnyRing>)
}

/// Reads the exterior ring, also from the GML 2 `outerBoundaryIs`.
pub(super) fn read_exterior(element: &Element) -> Result<Option<AnyRing>, Error> {
    element
        .child("exterior")
        .or_else(|| element.child("outerBoundaryIs"))
        .map(read_ring)
        .transpose()
}

/// Reads the interior rings, also from the GML 2 `innerBoundaryIs`.
pub(super) fn read_interiors(element: &Element) -> Result<Vec<AnyRing>, Error> {
    element
        .children_named("interior")
        .chain(element.children_named("innerBoundaryIs"))
        .map(read_ring)
        .collect()
}

impl Content for Polygon {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        if let Some(exterior) = &self.exterior {
            element.push(ring_element("exterior", exterior));
        }
        for interior in &self.interiors {
            element.push(ring_element("interior", interior));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            exterior: read_exterior(element)?,
            interiors: read_interiors(element)?,
        })
    }
}

/// Returns the patch container of a surface kind and the patch kind it is
/// restricted to.
fn patch_container(kind: Kind) -> (&'static str, Option<Kind>) {
    match kind {
        Kind::PolyhedralSurface => ("polygonPatches", Some(Kind::PolygonPatch)),
        Kind::TriangulatedSurface | Kind::Tin => ("trianglePatches", Some(Kind::Triangle)),
        _ => ("patches", None),
    }
}

impl Content for Surface {
    fn write(&self, kind: Kind, element: &mut Element) {
        let (container, _) = patch_container(kind);
        write_geometry(&self.geometry, element);
        element.push(array_element(container, &self.patches));
    }

    fn read(kind: Kind, element: &Element) -> Result<Self, Error> {
        let (container, restriction) = patch_container(kind);
        let patches = read_array::<SurfacePatch>(required(element, container)?)?;

        if let Some(allowed) = restriction {
            if let Some(patch) = patches
                .iter()
                .find(|p| !p.kind().substitutes(Group::Concrete(allowed)))
            {
                return Err(Error::unsupported(
                    patch.kind().element(),
                    allowed.element(),
                ));
            }
        }

        Ok(Self {
            geometry: read_geometry(element)?,
            patches,
        })
    }
}

fn line_array_element(name: &str, lines: &[LineStringSegment]) -> Element {
    let mut element = Element::gml(name);
    for line in lines {
        let mut segment = Element::gml(Kind::LineStringSegment.element());
        line.write(Kind::LineStringSegment, &mut segment);
        element.push(segment);
    }
    element
}

fn read_line_array(element: &Element) -> Result<Vec<LineStringSegment>, Error> {
    element
        .children_named(Kind::LineStringSegment.element())
        .map(|segment| LineStringSegment::read(Kind::LineStringSegment, segment))
        .collect()
}

impl Content for Tin {
    fn write(&self, kind: Kind, element: &mut Element) {
        self.surface.write(kind, element);
        for lines in &self.stop_lines {
            element.push(line_array_element("stopLines", lines));
        }
        for lines in &self.break_lines {
            element.push(line_array_element("breakLines", lines));
        }
        element.push(measure_element("maxLength", &self.max_length));

        let mut control_point = Element::gml("controlPoint");
        write_positions(&self.control_point, &mut control_point);
        element.push(control_point);
    }

    fn read(kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            surface: Surface::read(kind, element)?,
            stop_lines: element
                .children_named("stopLines")
                .map(read_line_array)
                .collect::<Result<_, _>>()?,
            break_lines: element
                .children_named("breakLines")
                .map(read_line_array)
                .collect::<Result<_, _>>()?,
            max_length: element
                .child("maxLength")
                .map(read_measure)
                .transpose()?
                .unwrap_or_default(),
            control_point: read_positions(required(element, "controlPoint")?)?,
        })
    }
}

impl Content for OrientableSurface {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        write_orientation(self.orientation, element);
        element.push(property_element("baseSurface", &self.base_surface));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            base_surface: read_property(required(element, "baseSurface")?)?,
            orientation: read_orientation(element)?,
        })
    }
}

impl Content for CompositeSurface {
    fn write(&self, _kind: Kind, element: &mut Element) {
        write_geometry(&self.geometry, element);
        for member in &self.surface_members {
            element.push(property_element("surfaceMember", member));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            geometry: read_geometry(element)?,
            surface_members: element
                .children_named("surfaceMember")
                .map(read_property::<AnySurface>)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Returns the single and array member element names of an aggregate kind.
fn member_names(kind: Kind) -> (&'static str, &'static str) {
    match kind {
        Kind::MultiPoint => ("pointMember", "pointMembers"),
        Kind::MultiCurve => ("curveMember", "curveMembers"),
        Kind::MultiSurface => ("surfaceMember", "surfaceMembers"),
        _ => ("geometryMember", "geometryMembers"),
    }
}

impl<T: Variant> Content for Aggregate<T> {
    fn write(&self, kind: Kind, element: &mut Element) {
        let (member, array) = member_names(kind);
        write_geometry(&self.geometry, element);
        write_members(&self.members, element, member, array);
    }

    fn read(kind: Kind, element: &Element) -> Result<Self, Error> {
        let (member, array) = member_names(kind);
        Ok(Self {
            geometry: read_geometry(element)?,
            members: read_members(element, member, array)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ReaderConfig;
    use crate::error::Error;
    use crate::geometry::{AnyRing, Geometry};
    use crate::primitives::{DirectPosition, Positions};
    use crate::registry::{self, Kind, Variant};
    use crate::xml::read_document;

    fn decode(xml: &[u8]) -> Result<Geometry, Error> {
        let root = read_document(xml, &ReaderConfig::default())?;
        registry::unwrap(&root.name, &root)
    }

    #[test]
    fn point_from_gml2_coordinates() {
        let geometry = decode(
            br#"<gml:Point xmlns:gml="http://www.opengis.net/gml" srsName="EPSG:4326">
                  <gml:coordinates>13.5,52.3</gml:coordinates>
                </gml:Point>"#,
        )
        .unwrap();

        let Geometry::Point(point) = geometry else {
            panic!("expected a Point");
        };
        assert_eq!(point.pos, DirectPosition::xy(13.5, 52.3));
        assert_eq!(point.geometry.srs.srs_name.as_deref(), Some("EPSG:4326"));
    }

    #[test]
    fn polygon_from_gml2_boundaries() {
        let geometry = decode(
            br#"<gml:Polygon xmlns:gml="http://www.opengis.net/gml">
                  <gml:outerBoundaryIs>
                    <gml:LinearRing><gml:coordinates>0,0 4,0 4,4 0,0</gml:coordinates></gml:LinearRing>
                  </gml:outerBoundaryIs>
                  <gml:innerBoundaryIs>
                    <gml:LinearRing><gml:coordinates>1,1 2,1 2,2 1,1</gml:coordinates></gml:LinearRing>
                  </gml:innerBoundaryIs>
                </gml:Polygon>"#,
        )
        .unwrap();

        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected a Polygon");
        };
        assert_eq!(polygon.interiors.len(), 1);
        let Some(AnyRing::LinearRing(ring)) = polygon.exterior else {
            panic!("expected a LinearRing");
        };
        assert!(matches!(ring.positions, Positions::Coordinates(_)));
        assert_eq!(ring.positions.to_direct_positions().unwrap().len(), 4);
    }

    #[test]
    fn polyhedral_surface_only_takes_polygon_patches() {
        let result = decode(
            br#"<gml:PolyhedralSurface xmlns:gml="http://www.opengis.net/gml">
                  <gml:polygonPatches>
                    <gml:Triangle>
                      <gml:exterior>
                        <gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing>
                      </gml:exterior>
                    </gml:Triangle>
                  </gml:polygonPatches>
                </gml:PolyhedralSurface>"#,
        );
        assert_eq!(
            result,
            Err(Error::unsupported("Triangle", "PolygonPatch"))
        );
    }

    #[test]
    fn ring_in_exterior_must_be_a_ring() {
        let result = decode(
            br#"<gml:Polygon xmlns:gml="http://www.opengis.net/gml">
                  <gml:exterior>
                    <gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString>
                  </gml:exterior>
                </gml:Polygon>"#,
        );
        assert_eq!(result, Err(Error::unsupported("LineString", "_Ring")));
    }

    #[test]
    fn multi_point_reads_both_member_forms() {
        let geometry = decode(
            br##"<gml:MultiPoint xmlns:gml="http://www.opengis.net/gml"
                    xmlns:xlink="http://www.w3.org/1999/xlink">
                  <gml:pointMember><gml:Point><gml:pos>1 1</gml:pos></gml:Point></gml:pointMember>
                  <gml:pointMember xlink:href="#p2"/>
                  <gml:pointMembers>
                    <gml:Point><gml:pos>3 3</gml:pos></gml:Point>
                    <gml:Point><gml:pos>4 4</gml:pos></gml:Point>
                  </gml:pointMembers>
                </gml:MultiPoint>"##,
        )
        .unwrap();

        assert_eq!(geometry.kind(), Kind::MultiPoint);
        let Geometry::MultiPoint(multi) = geometry else {
            panic!("expected a MultiPoint");
        };
        assert_eq!(multi.members.member.len(), 2);
        assert_eq!(multi.members.member[1].href(), Some("#p2"));
        assert_eq!(multi.members.iter().count(), 3);
    }
}
