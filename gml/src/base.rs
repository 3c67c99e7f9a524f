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

//! The abstract levels of the GML type hierarchy.
//!
//! Each level owns the level above it and adds its own fields. Equality,
//! hashing and rendering of a level first defer to the level above, so two
//! values of a concrete type are only equal if all of their abstract levels
//! are equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::display::{FieldWriter, Fields};
use crate::envelope::{BoundingShape, Envelope};
use crate::feature::Location;
use crate::primitives::{Code, Description, SrsReference};
use crate::property::Property;
use crate::registry::Variant;
use crate::temporal::TimePrimitive;

/// Root of all GML objects.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractGml {
    /// `gml:id`, unique within a document.
    pub id: Option<String>,
    pub description: Option<Description>,
    /// `gml:name` elements in document order.
    pub names: Vec<Code>,
}

impl AbstractGml {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Compares the description and names. The `id` is not compared: two
/// objects that differ only in their `gml:id` are equal.
impl PartialEq for AbstractGml {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description && self.names == other.names
    }
}

impl Eq for AbstractGml {}

impl Hash for AbstractGml {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
        self.names.hash(state);
    }
}

impl Fields for AbstractGml {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.opt("id", &self.id)?;
        w.opt("description", &self.description)?;
        w.list("name", &self.names)
    }
}

/// Base of all geometries: adds the coordinate reference.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractGeometry {
    pub gml: AbstractGml,
    pub srs: SrsReference,
}

impl AbstractGeometry {
    pub fn with_srs(srs_name: impl Into<String>) -> Self {
        Self {
            gml: AbstractGml::default(),
            srs: SrsReference::named(srs_name),
        }
    }

    /// Returns `srsDimension` if set, otherwise `inferred` (taken from the
    /// contained positions), otherwise 2.
    pub fn dimension(&self, inferred: Option<usize>) -> usize {
        self.srs
            .srs_dimension
            .map(|d| d as usize)
            .or(inferred)
            .unwrap_or(2)
    }
}

impl Fields for AbstractGeometry {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.gml.fields(w)?;
        self.srs.fields(w)
    }
}

/// Base of all curve segments: the continuity at the segment ends.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractCurveSegment {
    pub num_derivatives_at_start: u32,
    pub num_derivatives_at_end: u32,
    pub num_derivative_interior: u32,
}

impl Fields for AbstractCurveSegment {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        if self.num_derivatives_at_start != 0 {
            w.field("numDerivativesAtStart", &self.num_derivatives_at_start)?;
        }
        if self.num_derivatives_at_end != 0 {
            w.field("numDerivativesAtEnd", &self.num_derivatives_at_end)?;
        }
        if self.num_derivative_interior != 0 {
            w.field("numDerivativeInterior", &self.num_derivative_interior)?;
        }
        Ok(())
    }
}

/// Base of all features: adds the bounds and the location.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractFeature {
    pub gml: AbstractGml,
    pub bounded_by: Option<BoundingShape>,
    pub location: Option<Location>,
}

impl AbstractFeature {
    /// Returns the bounding envelope, if the feature has one.
    pub fn envelope(&self) -> Option<&Envelope> {
        match &self.bounded_by {
            Some(BoundingShape::Envelope(envelope)) => Some(envelope),
            _ => None,
        }
    }

    /// Returns the `srsName` values used by the bounding envelope and the
    /// inline location geometry, without duplicates.
    pub fn srs_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let bounds = self.envelope().and_then(|e| e.srs.srs_name.as_ref());
        let location = match &self.location {
            Some(Location::Geometry(property)) => property
                .get_inline()
                .and_then(|g| g.geometry().srs.srs_name.as_ref()),
            _ => None,
        };
        for name in bounds.into_iter().chain(location) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Widens the bounding envelope to contain the position.
    ///
    /// A feature without an envelope, or one bounded by a null marker, gets
    /// a degenerate envelope at the position.
    pub fn update_bounding_shape(&mut self, x: f64, y: f64) {
        match &mut self.bounded_by {
            Some(BoundingShape::Envelope(envelope)) => envelope.expand_to(x, y),
            _ => {
                let mut envelope = Envelope::default();
                envelope.expand_to(x, y);
                self.bounded_by = Some(BoundingShape::Envelope(envelope));
            }
        }
    }
}

impl Fields for AbstractFeature {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.gml.fields(w)?;
        w.opt("boundedBy", &self.bounded_by)?;
        w.opt("location", &self.location)
    }
}

/// A reference to another time primitive with the relative position of the
/// two.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelatedTime {
    /// Allen relation such as `Before` or `Meets`.
    pub relative_position: Option<String>,
    pub time: Property<TimePrimitive>,
}

impl fmt::Display for RelatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = &self.relative_position {
            write!(f, "{position} ")?;
        }
        match &self.time {
            Property::Inline(time) => write!(f, "{}", time.kind().element()),
            Property::Reference(link) => link.fmt(f),
        }
    }
}

/// Base of all time primitives.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractTimePrimitive {
    pub gml: AbstractGml,
    pub related_time: Vec<RelatedTime>,
}

impl Fields for AbstractTimePrimitive {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.gml.fields(w)?;
        w.list("relatedTime", &self.related_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Point};
    use crate::primitives::DirectPosition;

    #[test]
    fn id_does_not_take_part_in_equality() {
        let mut a = AbstractGml::with_id("a");
        let mut b = AbstractGml::with_id("b");
        assert_eq!(a, b);

        a.names.push(Code::new("Berlin"));
        assert_ne!(a, b);
        b.names.push(Code::new("Berlin"));
        assert_eq!(a, b);
    }

    #[test]
    fn geometry_equality_includes_the_gml_level() {
        let mut a = AbstractGeometry::with_srs("EPSG:4326");
        let b = a.clone();
        a.gml.description = Some(Description::Text("changed".to_string()));
        assert_ne!(a, b);
    }

    #[test]
    fn dimension_prefers_the_declared_one() {
        let mut geometry = AbstractGeometry::default();
        assert_eq!(geometry.dimension(None), 2);
        assert_eq!(geometry.dimension(Some(3)), 3);
        geometry.srs.srs_dimension = Some(4);
        assert_eq!(geometry.dimension(Some(3)), 4);
    }

    #[test]
    fn srs_names_from_bounds_and_location() {
        let mut point = Point::xy(1.0, 2.0);
        point.geometry.srs.srs_name = Some("EPSG:4258".to_string());

        let mut feature = AbstractFeature {
            location: Some(Location::Geometry(Property::inline(Geometry::Point(point)))),
            ..Default::default()
        };
        assert_eq!(feature.srs_names(), ["EPSG:4258"]);

        feature.bounded_by = Some(BoundingShape::Envelope(Envelope::world()));
        assert_eq!(feature.srs_names(), ["EPSG:4326", "EPSG:4258"]);
    }

    #[test]
    fn update_bounding_shape_widens_the_envelope() {
        let mut feature = AbstractFeature::default();
        feature.update_bounding_shape(3.0, 4.0);
        feature.update_bounding_shape(-1.0, 10.0);

        let envelope = feature.envelope().unwrap();
        assert_eq!(envelope.lower_corner, DirectPosition::xy(-1.0, 4.0));
        assert_eq!(envelope.upper_corner, DirectPosition::xy(3.0, 10.0));
    }
}
