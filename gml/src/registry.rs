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

//! The closed set of GML elements and their substitution groups.
//!
//! Every concrete element this crate understands is a [`Kind`]. Each kind
//! substitutes for exactly one [`Group`]: either an abstract head such as
//! `_Curve` or another concrete element (e.g. `Tin` substitutes for
//! `TriangulatedSurface`). Following these links yields the full chain up to
//! the root of the family.
//!
//! Values are encoded under the element name of their kind. Because every
//! family is a closed enum, a value always knows its own kind and no ordered
//! type test is involved in choosing the element name:
//!
//! ```
//! use gml::registry::{self, Group, Head, Kind};
//! use gml::geometry::{Geometry, Tin};
//!
//! let tin = Geometry::Tin(Tin::default());
//! let tagged = registry::wrap(&tin);
//! assert_eq!(tagged.tag(), "Tin");
//!
//! // a Tin is still accepted wherever a TriangulatedSurface or a _Surface is
//! assert!(Kind::Tin.substitutes(Group::Concrete(Kind::TriangulatedSurface)));
//! assert!(Kind::Tin.substitutes(Group::Abstract(Head::Surface)));
//! ```

use log::trace;

use crate::error::Error;
use crate::xml::{Element, GML_NAMESPACE};

/// An abstract substitution-group head.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Head {
    Gml,
    Geometry,
    GeometricPrimitive,
    Curve,
    Surface,
    Ring,
    GeometricAggregate,
    CurveSegment,
    SurfacePatch,
    ParametricCurveSurface,
    GriddedSurface,
    Feature,
    TimeObject,
    TimePrimitive,
    TimeGeometricPrimitive,
}

impl Head {
    /// Returns the name of the abstract element.
    pub const fn element(self) -> &'static str {
        match self {
            Self::Gml => "_GML",
            Self::Geometry => "_Geometry",
            Self::GeometricPrimitive => "_GeometricPrimitive",
            Self::Curve => "_Curve",
            Self::Surface => "_Surface",
            Self::Ring => "_Ring",
            Self::GeometricAggregate => "_GeometricAggregate",
            Self::CurveSegment => "_CurveSegment",
            Self::SurfacePatch => "_SurfacePatch",
            Self::ParametricCurveSurface => "_ParametricCurveSurface",
            Self::GriddedSurface => "_GriddedSurface",
            Self::Feature => "_Feature",
            Self::TimeObject => "_TimeObject",
            Self::TimePrimitive => "_TimePrimitive",
            Self::TimeGeometricPrimitive => "_TimeGeometricPrimitive",
        }
    }

    /// Returns the head this head itself substitutes for.
    pub const fn parent(self) -> Option<Head> {
        match self {
            Self::Gml | Self::CurveSegment | Self::SurfacePatch => None,
            Self::Geometry | Self::Feature | Self::TimeObject => Some(Self::Gml),
            Self::GeometricPrimitive | Self::Ring | Self::GeometricAggregate => {
                Some(Self::Geometry)
            }
            Self::Curve | Self::Surface => Some(Self::GeometricPrimitive),
            Self::ParametricCurveSurface => Some(Self::SurfacePatch),
            Self::GriddedSurface => Some(Self::ParametricCurveSurface),
            Self::TimePrimitive => Some(Self::TimeObject),
            Self::TimeGeometricPrimitive => Some(Self::TimePrimitive),
        }
    }
}

/// The target of a substitution: an abstract head or a concrete element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    Abstract(Head),
    Concrete(Kind),
}

impl Group {
    /// Returns the element name of the group.
    pub const fn element(self) -> &'static str {
        match self {
            Self::Abstract(head) => head.element(),
            Self::Concrete(kind) => kind.element(),
        }
    }

    /// Returns the group this group substitutes for.
    pub const fn parent(self) -> Option<Group> {
        match self {
            Self::Abstract(head) => match head.parent() {
                Some(parent) => Some(Group::Abstract(parent)),
                None => None,
            },
            Self::Concrete(kind) => kind.substitution_group(),
        }
    }
}

registry! {
    // _Geometry
    Point => "Point" in (abstract GeometricPrimitive),
    LineString => "LineString" in (abstract Curve),
    Curve => "Curve" in (abstract Curve),
    OrientableCurve => "OrientableCurve" in (abstract Curve),
    CompositeCurve => "CompositeCurve" in (abstract Curve),
    Polygon => "Polygon" in (abstract Surface),
    Surface => "Surface" in (abstract Surface),
    PolyhedralSurface => "PolyhedralSurface" in (concrete Surface),
    TriangulatedSurface => "TriangulatedSurface" in (concrete Surface),
    Tin => "Tin" in (concrete TriangulatedSurface),
    OrientableSurface => "OrientableSurface" in (abstract Surface),
    CompositeSurface => "CompositeSurface" in (abstract Surface),
    LinearRing => "LinearRing" in (abstract Ring),
    Ring => "Ring" in (abstract Ring),
    MultiPoint => "MultiPoint" in (abstract GeometricAggregate),
    MultiCurve => "MultiCurve" in (abstract GeometricAggregate),
    MultiSurface => "MultiSurface" in (abstract GeometricAggregate),
    MultiGeometry => "MultiGeometry" in (abstract GeometricAggregate),

    // _CurveSegment
    LineStringSegment => "LineStringSegment" in (abstract CurveSegment),
    ArcString => "ArcString" in (abstract CurveSegment),
    Arc => "Arc" in (concrete ArcString),
    Circle => "Circle" in (concrete Arc),
    ArcStringByBulge => "ArcStringByBulge" in (abstract CurveSegment),
    ArcByBulge => "ArcByBulge" in (concrete ArcStringByBulge),
    ArcByCenterPoint => "ArcByCenterPoint" in (abstract CurveSegment),
    CircleByCenterPoint => "CircleByCenterPoint" in (concrete ArcByCenterPoint),
    CubicSpline => "CubicSpline" in (abstract CurveSegment),
    BSpline => "BSpline" in (abstract CurveSegment),
    Bezier => "Bezier" in (concrete BSpline),
    Clothoid => "Clothoid" in (abstract CurveSegment),
    GeodesicString => "GeodesicString" in (abstract CurveSegment),
    Geodesic => "Geodesic" in (concrete GeodesicString),
    OffsetCurve => "OffsetCurve" in (abstract CurveSegment),

    // _SurfacePatch
    PolygonPatch => "PolygonPatch" in (abstract SurfacePatch),
    Triangle => "Triangle" in (abstract SurfacePatch),
    Rectangle => "Rectangle" in (abstract SurfacePatch),
    Cone => "Cone" in (abstract GriddedSurface),
    Cylinder => "Cylinder" in (abstract GriddedSurface),
    Sphere => "Sphere" in (abstract GriddedSurface),

    // _Feature
    FeatureCollection => "FeatureCollection" in (abstract Feature),
    Observation => "Observation" in (abstract Feature),
    DirectedObservation => "DirectedObservation" in (concrete Observation),

    // _TimePrimitive
    TimeInstant => "TimeInstant" in (abstract TimeGeometricPrimitive),
    TimePeriod => "TimePeriod" in (abstract TimeGeometricPrimitive),

    Envelope => "Envelope" in (root),
}

impl Kind {
    /// Returns `true` if this element may appear where `group` is expected.
    ///
    /// An element always substitutes for itself; otherwise its substitution
    /// chain is followed up to the root.
    pub fn substitutes(self, group: Group) -> bool {
        if group == Group::Concrete(self) {
            return true;
        }

        let mut current = self.substitution_group();
        while let Some(g) = current {
            if g == group {
                return true;
            }
            current = g.parent();
        }

        false
    }

    /// Returns the nearest abstract head in the substitution chain.
    pub fn head(self) -> Option<Head> {
        let mut current = self.substitution_group();
        while let Some(g) = current {
            if let Group::Abstract(head) = g {
                return Some(head);
            }
            current = g.parent();
        }
        None
    }

    /// Returns the length of the substitution chain.
    ///
    /// Deeper kinds are more specific: `Tin` is deeper than
    /// `TriangulatedSurface`, which is deeper than `Surface`.
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut current = self.substitution_group();
        while let Some(g) = current {
            depth += 1;
            current = g.parent();
        }
        depth
    }

    /// Returns the registry entry for this kind.
    pub const fn info(self) -> VariantInfo {
        VariantInfo {
            kind: self,
            element: self.element(),
            namespace: GML_NAMESPACE,
            substitution_group: self.substitution_group(),
        }
    }
}

/// A registry entry describing one concrete element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VariantInfo {
    pub kind: Kind,
    pub element: &'static str,
    pub namespace: &'static str,
    pub substitution_group: Option<Group>,
}

impl VariantInfo {
    /// Returns the abstract head of the element.
    pub fn head(&self) -> Option<Head> {
        self.kind.head()
    }
}

/// A closed family of GML values that knows how to encode itself.
///
/// Families are enums with one variant per [`Kind`] they accept.
/// [`decode`](Variant::decode) is only called with kinds that substitute for
/// [`GROUP`](Variant::GROUP); [`unwrap`] takes care of that check.
pub trait Variant: Sized {
    /// The group every member of this family substitutes for.
    const GROUP: Group;

    /// Returns the kind of this value.
    fn kind(&self) -> Kind;

    /// Encodes the value as an element named after its kind.
    fn encode(&self) -> Element;

    /// Decodes the content of `element` as a value of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `kind` is not part of this family or the element
    /// content is invalid.
    fn decode(kind: Kind, element: &Element) -> Result<Self, Error>;
}

/// A value tagged with the element it is serialized as.
#[derive(Copy, Clone, Debug)]
pub struct Tagged<'a, T> {
    pub info: VariantInfo,
    pub value: &'a T,
}

impl<T: Variant> Tagged<'_, T> {
    /// Returns the element name.
    pub fn tag(&self) -> &'static str {
        self.info.element
    }

    /// Encodes the value.
    pub fn to_element(&self) -> Element {
        self.value.encode()
    }
}

/// Tags the value with its element name.
pub fn wrap<T: Variant>(value: &T) -> Tagged<'_, T> {
    Tagged {
        info: value.kind().info(),
        value,
    }
}

/// Tags the value for a slot that only accepts members of `slot`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVariant`] if the value's kind does not
/// substitute for `slot`.
pub fn wrap_into<T: Variant>(value: &T, slot: Group) -> Result<Tagged<'_, T>, Error> {
    let kind = value.kind();
    if kind.substitutes(slot) {
        Ok(wrap(value))
    } else {
        Err(Error::unsupported(kind.element(), slot.element()))
    }
}

/// Decodes `payload` as the family member named by `tag`.
///
/// The tag may carry a namespace prefix, only its local part is looked up.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVariant`] if the tag names no registered
/// element or an element outside the family `T`.
pub fn unwrap<T: Variant>(tag: &str, payload: &Element) -> Result<T, Error> {
    let local = tag.rsplit(':').next().unwrap_or(tag);
    let kind = Kind::from_element(local)
        .filter(|kind| kind.substitutes(T::GROUP))
        .ok_or_else(|| Error::unsupported(local, T::GROUP.element()))?;

    trace!("dispatching <{local}> as {kind:?}");
    T::decode(kind, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_name_maps_back_to_its_kind() {
        for &kind in Kind::ALL {
            assert_eq!(Kind::from_element(kind.element()), Some(kind));
        }
        assert_eq!(Kind::from_element("_Geometry"), None);
        assert_eq!(Kind::from_element("pointMember"), None);
    }

    #[test]
    fn substitution_follows_concrete_and_abstract_links() {
        assert!(Kind::Circle.substitutes(Group::Concrete(Kind::Arc)));
        assert!(Kind::Circle.substitutes(Group::Concrete(Kind::ArcString)));
        assert!(Kind::Circle.substitutes(Group::Abstract(Head::CurveSegment)));
        assert!(!Kind::ArcString.substitutes(Group::Concrete(Kind::Arc)));

        assert!(Kind::Cone.substitutes(Group::Abstract(Head::SurfacePatch)));
        assert!(Kind::LinearRing.substitutes(Group::Abstract(Head::Geometry)));
        assert!(!Kind::LinearRing.substitutes(Group::Abstract(Head::Curve)));
        assert!(Kind::TimePeriod.substitutes(Group::Abstract(Head::Gml)));
        assert!(!Kind::Envelope.substitutes(Group::Abstract(Head::Gml)));
    }

    #[test]
    fn depth_orders_specific_before_general() {
        assert!(Kind::Tin.depth() > Kind::TriangulatedSurface.depth());
        assert!(Kind::TriangulatedSurface.depth() > Kind::Surface.depth());
        assert_eq!(Kind::Envelope.depth(), 0);
        assert_eq!(Kind::LineStringSegment.depth(), 1);
    }

    #[test]
    fn head_is_the_nearest_abstract_group() {
        assert_eq!(Kind::Tin.head(), Some(Head::Surface));
        assert_eq!(Kind::Circle.head(), Some(Head::CurveSegment));
        assert_eq!(Kind::Sphere.head(), Some(Head::GriddedSurface));
        assert_eq!(Kind::Envelope.head(), None);
        assert_eq!(Kind::Point.info().namespace, GML_NAMESPACE);
    }
}
