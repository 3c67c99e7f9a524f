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

//! The `_CurveSegment` family.
//!
//! Segments that restrict another segment type share its payload: `Arc` and
//! `Circle` are `ArcString`s, `ArcByBulge` is an `ArcStringByBulge`,
//! `CircleByCenterPoint` is an `ArcByCenterPoint`, `Bezier` is a `BSpline`
//! and `Geodesic` is a `GeodesicString`. The enum variant carries the
//! identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::base::AbstractCurveSegment;
use crate::display::{FieldWriter, Fields};
use crate::error::Error;
use crate::geometry::{AnyCurve, PositionDimension};
use crate::primitives::{hash_f64, hash_ordinates, DirectPosition, Measure, Positions};
use crate::property::Property;
use crate::registry::{Group, Head, Kind};

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStringSegment {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
}

impl LineStringSegment {
    pub fn new(positions: Positions) -> Self {
        Self {
            segment: AbstractCurveSegment::default(),
            positions,
        }
    }
}

impl Fields for LineStringSegment {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)
    }
}

/// Circular arcs through three points each. Payload of `ArcString`, `Arc`
/// and `Circle`.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcString {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
    pub num_arc: Option<u32>,
}

impl ArcString {
    pub fn new(positions: Positions) -> Self {
        Self {
            segment: AbstractCurveSegment::default(),
            positions,
            num_arc: None,
        }
    }
}

impl Fields for ArcString {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)?;
        w.opt("numArc", &self.num_arc)
    }
}

/// Arcs given by their end points and a bulge. Payload of
/// `ArcStringByBulge` and `ArcByBulge`.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcStringByBulge {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
    pub num_arc: Option<u32>,
    /// One bulge per arc.
    pub bulge: Vec<f64>,
    /// One normal vector per arc.
    pub normal: Vec<DirectPosition>,
}

impl Hash for ArcStringByBulge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segment.hash(state);
        self.positions.hash(state);
        self.num_arc.hash(state);
        hash_ordinates(&self.bulge, state);
        self.normal.hash(state);
    }
}

impl Fields for ArcStringByBulge {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)?;
        w.opt("numArc", &self.num_arc)?;
        w.ordinates("bulge", &self.bulge)?;
        w.list("normal", &self.normal)
    }
}

/// An arc given by its center and radius. Payload of `ArcByCenterPoint` and
/// `CircleByCenterPoint`.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcByCenterPoint {
    pub segment: AbstractCurveSegment,
    /// The center point.
    pub positions: Positions,
    pub num_arc: Option<u32>,
    pub radius: Measure,
    pub start_angle: Option<Measure>,
    pub end_angle: Option<Measure>,
}

impl Fields for ArcByCenterPoint {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("center", &self.positions)?;
        w.opt("numArc", &self.num_arc)?;
        w.field("radius", &self.radius)?;
        w.opt("startAngle", &self.start_angle)?;
        w.opt("endAngle", &self.end_angle)
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicSpline {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
    pub vector_at_start: DirectPosition,
    pub vector_at_end: DirectPosition,
}

impl CubicSpline {
    /// The degree of a cubic spline.
    pub const DEGREE: u32 = 3;
}

impl Fields for CubicSpline {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)?;
        w.field("vectorAtStart", &self.vector_at_start)?;
        w.field("vectorAtEnd", &self.vector_at_end)
    }
}

/// `polynomialSpline` or `rationalSpline`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplineInterpolation {
    #[default]
    PolynomialSpline,
    RationalSpline,
}

impl SplineInterpolation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PolynomialSpline => "polynomialSpline",
            Self::RationalSpline => "rationalSpline",
        }
    }
}

impl FromStr for SplineInterpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polynomialSpline" => Ok(Self::PolynomialSpline),
            "rationalSpline" => Ok(Self::RationalSpline),
            _ => Err(Error::invalid("interpolation", s)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnotType {
    Uniform,
    QuasiUniform,
    PiecewiseBezier,
}

impl KnotType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::QuasiUniform => "quasiUniform",
            Self::PiecewiseBezier => "piecewiseBezier",
        }
    }
}

impl FromStr for KnotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "quasiUniform" => Ok(Self::QuasiUniform),
            "piecewiseBezier" => Ok(Self::PiecewiseBezier),
            _ => Err(Error::invalid("knotType", s)),
        }
    }
}

impl fmt::Display for KnotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knot {
    pub value: f64,
    pub multiplicity: u32,
    pub weight: f64,
}

impl Hash for Knot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.value, state);
        self.multiplicity.hash(state);
        hash_f64(self.weight, state);
    }
}

impl fmt::Display for Knot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} w{}", self.value, self.multiplicity, self.weight)
    }
}

/// Payload of `BSpline` and `Bezier`.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BSpline {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
    pub degree: u32,
    pub knots: Vec<Knot>,
    pub interpolation: SplineInterpolation,
    pub is_polynomial: Option<bool>,
    pub knot_type: Option<KnotType>,
}

impl Fields for BSpline {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)?;
        w.field("degree", &self.degree)?;
        w.list("knot", &self.knots)?;
        w.opt("isPolynomial", &self.is_polynomial)?;
        w.opt("knotType", &self.knot_type)
    }
}

/// Payload of `GeodesicString` and `Geodesic`.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodesicString {
    pub segment: AbstractCurveSegment,
    pub positions: Positions,
}

impl Fields for GeodesicString {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("positions", &self.positions)
    }
}

/// A location with a local frame of reference.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffinePlacement {
    pub location: DirectPosition,
    pub ref_directions: Vec<DirectPosition>,
    pub in_dimension: u32,
    pub out_dimension: u32,
}

impl fmt::Display for AffinePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f, "AffinePlacement")?;
        w.field("location", &self.location)?;
        w.list("refDirection", &self.ref_directions)?;
        w.field("inDimension", &self.in_dimension)?;
        w.field("outDimension", &self.out_dimension)
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clothoid {
    pub segment: AbstractCurveSegment,
    pub ref_location: AffinePlacement,
    pub scale_factor: f64,
    pub start_parameter: f64,
    pub end_parameter: f64,
}

impl Hash for Clothoid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segment.hash(state);
        self.ref_location.hash(state);
        hash_f64(self.scale_factor, state);
        hash_f64(self.start_parameter, state);
        hash_f64(self.end_parameter, state);
    }
}

impl Fields for Clothoid {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("refLocation", &self.ref_location)?;
        w.field("scaleFactor", &self.scale_factor)?;
        w.field("startParameter", &self.start_parameter)?;
        w.field("endParameter", &self.end_parameter)
    }
}

/// A curve at a constant distance from a base curve.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetCurve {
    pub segment: AbstractCurveSegment,
    pub offset_base: Property<AnyCurve>,
    pub distance: Measure,
    pub ref_direction: Option<DirectPosition>,
}

impl Fields for OffsetCurve {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.segment.fields(w)?;
        w.field("offsetBase", &self.offset_base)?;
        w.field("distance", &self.distance)?;
        w.opt("refDirection", &self.ref_direction)
    }
}

family! {
    /// Any member of `_CurveSegment`.
    pub enum CurveSegment in (Group::Abstract(Head::CurveSegment)) {
        LineStringSegment(LineStringSegment),
        ArcString(ArcString),
        Arc(ArcString),
        Circle(ArcString),
        ArcStringByBulge(ArcStringByBulge),
        ArcByBulge(ArcStringByBulge),
        ArcByCenterPoint(ArcByCenterPoint),
        CircleByCenterPoint(ArcByCenterPoint),
        CubicSpline(CubicSpline),
        BSpline(BSpline),
        Bezier(BSpline),
        Clothoid(Clothoid),
        GeodesicString(GeodesicString),
        Geodesic(GeodesicString),
        OffsetCurve(OffsetCurve),
    }
}

/// Returns the fixed `interpolation` attribute of a segment kind, `None`
/// for kinds without one.
pub(crate) const fn fixed_interpolation(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::LineStringSegment => Some("linear"),
        Kind::ArcString | Kind::Arc | Kind::Circle => Some("circularArc3Points"),
        Kind::ArcStringByBulge | Kind::ArcByBulge => Some("circularArc2PointWithBulge"),
        Kind::ArcByCenterPoint | Kind::CircleByCenterPoint => {
            Some("circularArcCenterPointWithRadius")
        }
        Kind::CubicSpline => Some("cubicSpline"),
        Kind::GeodesicString | Kind::Geodesic => Some("geodesic"),
        _ => None,
    }
}

impl CurveSegment {
    /// Returns the interpolation method of the segment.
    pub fn interpolation(&self) -> Option<&'static str> {
        match self {
            Self::BSpline(spline) | Self::Bezier(spline) => Some(spline.interpolation.as_str()),
            other => {
                use crate::registry::Variant;
                fixed_interpolation(other.kind())
            }
        }
    }

    /// Returns the continuity counts of the segment.
    pub fn segment(&self) -> &AbstractCurveSegment {
        match self {
            Self::LineStringSegment(v) => &v.segment,
            Self::ArcString(v) | Self::Arc(v) | Self::Circle(v) => &v.segment,
            Self::ArcStringByBulge(v) | Self::ArcByBulge(v) => &v.segment,
            Self::ArcByCenterPoint(v) | Self::CircleByCenterPoint(v) => &v.segment,
            Self::CubicSpline(v) => &v.segment,
            Self::BSpline(v) | Self::Bezier(v) => &v.segment,
            Self::Clothoid(v) => &v.segment,
            Self::GeodesicString(v) | Self::Geodesic(v) => &v.segment,
            Self::OffsetCurve(v) => &v.segment,
        }
    }
}

impl PositionDimension for CurveSegment {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::LineStringSegment(v) => v.positions.dimension(),
            Self::ArcString(v) | Self::Arc(v) | Self::Circle(v) => v.positions.dimension(),
            Self::ArcStringByBulge(v) | Self::ArcByBulge(v) => v.positions.dimension(),
            Self::ArcByCenterPoint(v) | Self::CircleByCenterPoint(v) => v.positions.dimension(),
            Self::CubicSpline(v) => v.positions.dimension(),
            Self::BSpline(v) | Self::Bezier(v) => v.positions.dimension(),
            Self::Clothoid(v) => {
                Some(v.ref_location.location.ordinates.len()).filter(|&d| d > 0)
            }
            Self::GeodesicString(v) | Self::Geodesic(v) => v.positions.dimension(),
            Self::OffsetCurve(v) => v.offset_base.position_dimension(),
        }
    }
}
