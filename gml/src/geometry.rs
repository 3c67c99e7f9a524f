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

//! The `_Geometry` family.
//!
//! Concrete geometries are plain structs holding an [`AbstractGeometry`].
//! [`Geometry`] accepts every member of `_Geometry`; [`AnyCurve`],
//! [`AnySurface`] and [`AnyRing`] accept the members of the narrower
//! groups and convert to and from `Geometry`.
//!
//! ```
//! use gml::geometry::{AnyCurve, Geometry, LineString, Point};
//! use gml::{Error, Positions};
//!
//! let line = Geometry::LineString(LineString::new(Positions::xy(&[(0.0, 0.0), (3.0, 4.0)])));
//! assert!(AnyCurve::try_from(line).is_ok());
//!
//! let point = Geometry::Point(Point::xy(1.0, 2.0));
//! assert!(matches!(AnyCurve::try_from(point), Err(Error::UnsupportedVariant { .. })));
//! ```

use std::fmt;

use crate::base::AbstractGeometry;
use crate::display::{display_fields, FieldWriter, Fields};
use crate::error::Error;
use crate::patch::SurfacePatch;
use crate::primitives::{DirectPosition, Measure, Positions};
use crate::property::{ArrayProperty, Members, Property};
use crate::registry::{Group, Head, Kind, Variant};
use crate::segment::{CurveSegment, LineStringSegment};
use crate::xml::Element;

/// Orientation of a curve or surface relative to its base.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub geometry: AbstractGeometry,
    pub pos: DirectPosition,
}

impl Point {
    pub fn new(pos: DirectPosition) -> Self {
        Self {
            geometry: AbstractGeometry::default(),
            pos,
        }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(DirectPosition::xy(x, y))
    }
}

impl Fields for Point {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.field("pos", &self.pos)
    }
}

display_fields!(Point => "Point");

/// Points stand on their own in `pointMember` and `pointProperty`.
impl Variant for Point {
    const GROUP: Group = Group::Concrete(Kind::Point);

    fn kind(&self) -> Kind {
        Kind::Point
    }

    fn encode(&self) -> Element {
        let mut element = Element::gml(Kind::Point.element());
        crate::codec::Content::write(self, Kind::Point, &mut element);
        element
    }

    fn decode(kind: Kind, element: &Element) -> Result<Self, Error> {
        <Self as crate::codec::Content>::read(kind, element)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString {
    pub geometry: AbstractGeometry,
    pub positions: Positions,
}

impl LineString {
    pub fn new(positions: Positions) -> Self {
        Self {
            geometry: AbstractGeometry::default(),
            positions,
        }
    }
}

impl Fields for LineString {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.field("positions", &self.positions)
    }
}

/// A curve made of segments.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    pub geometry: AbstractGeometry,
    pub segments: ArrayProperty<CurveSegment>,
}

impl Fields for Curve {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("segment", self.segments.get_all())
    }
}

#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientableCurve {
    pub geometry: AbstractGeometry,
    pub base_curve: Property<AnyCurve>,
    pub orientation: Sign,
}

impl Fields for OrientableCurve {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.field("baseCurve", &self.base_curve)?;
        w.field("orientation", &self.orientation)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeCurve {
    pub geometry: AbstractGeometry,
    pub curve_members: Vec<Property<AnyCurve>>,
}

impl Fields for CompositeCurve {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("curveMember", &self.curve_members)
    }
}

/// A closed line string.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRing {
    pub geometry: AbstractGeometry,
    pub positions: Positions,
}

impl LinearRing {
    pub fn new(positions: Positions) -> Self {
        Self {
            geometry: AbstractGeometry::default(),
            positions,
        }
    }
}

impl Fields for LinearRing {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.field("positions", &self.positions)
    }
}

/// A closed sequence of curves.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    pub geometry: AbstractGeometry,
    pub curve_members: Vec<Property<AnyCurve>>,
}

impl Fields for Ring {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("curveMember", &self.curve_members)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub geometry: AbstractGeometry,
    pub exterior: Option<AnyRing>,
    pub interiors: Vec<AnyRing>,
}

impl Polygon {
    pub fn new(exterior: AnyRing) -> Self {
        Self {
            geometry: AbstractGeometry::default(),
            exterior: Some(exterior),
            interiors: Vec::new(),
        }
    }
}

impl Fields for Polygon {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.opt("exterior", &self.exterior)?;
        w.list("interior", &self.interiors)
    }
}

/// A surface made of patches. Also the payload of `PolyhedralSurface` and
/// `TriangulatedSurface`, which restrict the patch kinds.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    pub geometry: AbstractGeometry,
    pub patches: ArrayProperty<SurfacePatch>,
}

impl Fields for Surface {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("patch", self.patches.get_all())
    }
}

/// A triangulated irregular network.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tin {
    /// The triangles.
    pub surface: Surface,
    /// Lines across which no triangle may be formed.
    pub stop_lines: Vec<Vec<LineStringSegment>>,
    /// Lines every triangulation must respect.
    pub break_lines: Vec<Vec<LineStringSegment>>,
    /// Maximum edge length of a triangle.
    pub max_length: Measure,
    /// The points the network is built from.
    pub control_point: Positions,
}

impl Fields for Tin {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.surface.fields(w)?;
        if !self.stop_lines.is_empty() {
            w.field("stopLines", &self.stop_lines.len())?;
        }
        if !self.break_lines.is_empty() {
            w.field("breakLines", &self.break_lines.len())?;
        }
        w.field("maxLength", &self.max_length)?;
        w.field("controlPoint", &self.control_point)
    }
}

#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientableSurface {
    pub geometry: AbstractGeometry,
    pub base_surface: Property<AnySurface>,
    pub orientation: Sign,
}

impl Fields for OrientableSurface {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.field("baseSurface", &self.base_surface)?;
        w.field("orientation", &self.orientation)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeSurface {
    pub geometry: AbstractGeometry,
    pub surface_members: Vec<Property<AnySurface>>,
}

impl Fields for CompositeSurface {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("surfaceMember", &self.surface_members)
    }
}

/// An aggregate of geometries of one family.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggregate<T> {
    pub geometry: AbstractGeometry,
    pub members: Members<T>,
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Self {
            geometry: AbstractGeometry::default(),
            members: Members::default(),
        }
    }
}

impl<T: fmt::Display> Fields for Aggregate<T> {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.geometry.fields(w)?;
        w.list("member", &self.members.member)?;
        if let Some(array) = &self.members.members {
            w.list("members", array.get_all())?;
        }
        Ok(())
    }
}

pub type MultiPoint = Aggregate<Point>;
pub type MultiCurve = Aggregate<AnyCurve>;
pub type MultiSurface = Aggregate<AnySurface>;
pub type MultiGeometry = Aggregate<Geometry>;

family! {
    /// Any member of `_Geometry`.
    pub enum Geometry in (Group::Abstract(Head::Geometry)) {
        Point(Point),
        LineString(LineString),
        Curve(Curve),
        OrientableCurve(OrientableCurve),
        CompositeCurve(CompositeCurve),
        Polygon(Polygon),
        Surface(Surface),
        PolyhedralSurface(Surface),
        TriangulatedSurface(Surface),
        Tin(Tin),
        OrientableSurface(OrientableSurface),
        CompositeSurface(CompositeSurface),
        LinearRing(LinearRing),
        Ring(Ring),
        MultiPoint(MultiPoint),
        MultiCurve(MultiCurve),
        MultiSurface(MultiSurface),
        MultiGeometry(MultiGeometry),
    }
}

family! {
    /// Any member of `_Curve`.
    pub enum AnyCurve in (Group::Abstract(Head::Curve)) {
        LineString(LineString),
        Curve(Curve),
        OrientableCurve(OrientableCurve),
        CompositeCurve(CompositeCurve),
    }
}

family! {
    /// Any member of `_Surface`.
    pub enum AnySurface in (Group::Abstract(Head::Surface)) {
        Polygon(Polygon),
        Surface(Surface),
        PolyhedralSurface(Surface),
        TriangulatedSurface(Surface),
        Tin(Tin),
        OrientableSurface(OrientableSurface),
        CompositeSurface(CompositeSurface),
    }
}

family! {
    /// Any member of `_Ring`.
    pub enum AnyRing in (Group::Abstract(Head::Ring)) {
        LinearRing(LinearRing),
        Ring(Ring),
    }
}

narrow!(AnyCurve => Geometry { LineString, Curve, OrientableCurve, CompositeCurve });
narrow!(AnySurface => Geometry {
    Polygon,
    Surface,
    PolyhedralSurface,
    TriangulatedSurface,
    Tin,
    OrientableSurface,
    CompositeSurface,
});
narrow!(AnyRing => Geometry { LinearRing, Ring });

impl Geometry {
    /// Returns the abstract geometry level of the value.
    pub fn geometry(&self) -> &AbstractGeometry {
        match self {
            Self::Point(v) => &v.geometry,
            Self::LineString(v) => &v.geometry,
            Self::Curve(v) => &v.geometry,
            Self::OrientableCurve(v) => &v.geometry,
            Self::CompositeCurve(v) => &v.geometry,
            Self::Polygon(v) => &v.geometry,
            Self::Surface(v) | Self::PolyhedralSurface(v) | Self::TriangulatedSurface(v) => {
                &v.geometry
            }
            Self::Tin(v) => &v.surface.geometry,
            Self::OrientableSurface(v) => &v.geometry,
            Self::CompositeSurface(v) => &v.geometry,
            Self::LinearRing(v) => &v.geometry,
            Self::Ring(v) => &v.geometry,
            Self::MultiPoint(v) => &v.geometry,
            Self::MultiCurve(v) => &v.geometry,
            Self::MultiSurface(v) => &v.geometry,
            Self::MultiGeometry(v) => &v.geometry,
        }
    }

    /// Returns the `gml:id` of the value.
    pub fn id(&self) -> Option<&str> {
        self.geometry().gml.id.as_deref()
    }

    /// Returns the coordinate dimension: `srsDimension` if set, otherwise the
    /// ordinate count of the first contained position, otherwise 2.
    ///
    /// Containers look through their rings, segments, patches and members,
    /// so a polygon of 3-D rings is 3-D.
    pub fn dimension(&self) -> usize {
        self.position_dimension().unwrap_or(2)
    }
}

/// Coordinate dimension of a value: the declared `srsDimension`, or the
/// ordinate count of the first position it contains.
pub(crate) trait PositionDimension {
    fn position_dimension(&self) -> Option<usize>;
}

fn declared_dimension(geometry: &AbstractGeometry) -> Option<usize> {
    geometry
        .srs
        .srs_dimension
        .map(|d| d as usize)
        .filter(|&d| d > 0)
}

impl<T: PositionDimension> PositionDimension for Property<T> {
    fn position_dimension(&self) -> Option<usize> {
        self.get_inline().and_then(T::position_dimension)
    }
}

impl<T: PositionDimension> PositionDimension for [T] {
    fn position_dimension(&self) -> Option<usize> {
        self.iter().find_map(T::position_dimension)
    }
}

impl PositionDimension for Point {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry)
            .or_else(|| Some(self.pos.ordinates.len()).filter(|&d| d > 0))
    }
}

impl PositionDimension for LineString {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.positions.dimension())
    }
}

impl PositionDimension for LinearRing {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.positions.dimension())
    }
}

impl PositionDimension for Curve {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.segments.get_all().position_dimension())
    }
}

impl PositionDimension for OrientableCurve {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.base_curve.position_dimension())
    }
}

impl PositionDimension for CompositeCurve {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.curve_members.position_dimension())
    }
}

impl PositionDimension for Ring {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.curve_members.position_dimension())
    }
}

impl PositionDimension for Polygon {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| {
            self.exterior
                .as_ref()
                .and_then(AnyRing::position_dimension)
                .or_else(|| self.interiors.position_dimension())
        })
    }
}

impl PositionDimension for Surface {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.patches.get_all().position_dimension())
    }
}

impl PositionDimension for Tin {
    fn position_dimension(&self) -> Option<usize> {
        self.surface
            .position_dimension()
            .or_else(|| self.control_point.dimension())
    }
}

impl PositionDimension for OrientableSurface {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.base_surface.position_dimension())
    }
}

impl PositionDimension for CompositeSurface {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry).or_else(|| self.surface_members.position_dimension())
    }
}

impl<T: PositionDimension> PositionDimension for Aggregate<T> {
    fn position_dimension(&self) -> Option<usize> {
        declared_dimension(&self.geometry)
            .or_else(|| self.members.iter().find_map(T::position_dimension))
    }
}

impl PositionDimension for Geometry {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::Point(v) => v.position_dimension(),
            Self::LineString(v) => v.position_dimension(),
            Self::Curve(v) => v.position_dimension(),
            Self::OrientableCurve(v) => v.position_dimension(),
            Self::CompositeCurve(v) => v.position_dimension(),
            Self::Polygon(v) => v.position_dimension(),
            Self::Surface(v) | Self::PolyhedralSurface(v) | Self::TriangulatedSurface(v) => {
                v.position_dimension()
            }
            Self::Tin(v) => v.position_dimension(),
            Self::OrientableSurface(v) => v.position_dimension(),
            Self::CompositeSurface(v) => v.position_dimension(),
            Self::LinearRing(v) => v.position_dimension(),
            Self::Ring(v) => v.position_dimension(),
            Self::MultiPoint(v) => v.position_dimension(),
            Self::MultiCurve(v) => v.position_dimension(),
            Self::MultiSurface(v) => v.position_dimension(),
            Self::MultiGeometry(v) => v.position_dimension(),
        }
    }
}

impl PositionDimension for AnyCurve {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::LineString(v) => v.position_dimension(),
            Self::Curve(v) => v.position_dimension(),
            Self::OrientableCurve(v) => v.position_dimension(),
            Self::CompositeCurve(v) => v.position_dimension(),
        }
    }
}

impl PositionDimension for AnySurface {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::Polygon(v) => v.position_dimension(),
            Self::Surface(v) | Self::PolyhedralSurface(v) | Self::TriangulatedSurface(v) => {
                v.position_dimension()
            }
            Self::Tin(v) => v.position_dimension(),
            Self::OrientableSurface(v) => v.position_dimension(),
            Self::CompositeSurface(v) => v.position_dimension(),
        }
    }
}

impl PositionDimension for AnyRing {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::LinearRing(v) => v.position_dimension(),
            Self::Ring(v) => v.position_dimension(),
        }
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl TryFrom<Geometry> for Point {
    type Error = Error;

    fn try_from(geometry: Geometry) -> Result<Self, Self::Error> {
        match geometry {
            Geometry::Point(point) => Ok(point),
            other => Err(Error::unsupported(other.kind().element(), "Point")),
        }
    }
}
