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

//! The `_Feature` family.

use std::fmt;

use log::debug;

use crate::base::AbstractFeature;
use crate::display::{FieldWriter, Fields};
use crate::envelope::{BoundingShape, Envelope};
use crate::geometry::Geometry;
use crate::primitives::{Code, DirectPosition};
use crate::property::{Members, Property, XLink};
use crate::registry::{Group, Head};
use crate::temporal::TimePrimitive;
use crate::xml::Element;

/// The `location` of a feature.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Geometry(Property<Geometry>),
    /// `LocationKeyWord`.
    Keyword(Code),
    /// `LocationString`.
    Text(String),
    /// Explicitly unknown, with the reason.
    Null(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(geometry) => geometry.fmt(f),
            Self::Keyword(code) => code.fmt(f),
            Self::Text(text) => f.write_str(text),
            Self::Null(reason) => write!(f, "null ({reason})"),
        }
    }
}

/// A collection of features.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureCollection {
    pub feature: AbstractFeature,
    /// `featureMember` properties and the `featureMembers` array.
    pub members: Members<AnyFeature>,
}

impl FeatureCollection {
    /// Returns the inline `featureMember` values.
    pub fn features(&self) -> impl Iterator<Item = &AnyFeature> {
        self.members.inline()
    }

    /// Recomputes `boundedBy` from the member envelopes and returns a copy of
    /// it.
    ///
    /// Only inline `featureMember` values are scanned; members in the
    /// `featureMembers` array and referenced members do not contribute.
    /// Envelopes with a corner of fewer than two ordinates are ignored. The
    /// result spans ordinates 0 and 1 and keeps the CRS of the first
    /// contributing envelope. Without any contribution the result is
    /// [`Envelope::world`].
    ///
    /// ```
    /// use gml::feature::{AnyFeature, FeatureCollection, Observation};
    /// use gml::{BoundingShape, Envelope};
    ///
    /// let mut collection = FeatureCollection::default();
    /// assert_eq!(collection.compute_bounds(), Envelope::world());
    ///
    /// let mut member = Observation::default();
    /// member.feature.bounded_by = Some(BoundingShape::Envelope(Envelope::xy((0.0, 0.0), (10.0, 10.0))));
    /// collection.members.push(AnyFeature::Observation(member));
    /// assert_eq!(collection.compute_bounds(), Envelope::xy((0.0, 0.0), (10.0, 10.0)));
    /// ```
    pub fn compute_bounds(&mut self) -> Envelope {
        let mut bounds: Option<Envelope> = None;

        for member in self.members.inline() {
            let Some(envelope) = member.feature().envelope() else {
                continue;
            };
            if envelope.is_empty() {
                continue;
            }

            let (lower, upper) = (&envelope.lower_corner, &envelope.upper_corner);
            match &mut bounds {
                Some(b) => {
                    b.expand_to(lower.ordinates[0], lower.ordinates[1]);
                    b.expand_to(upper.ordinates[0], upper.ordinates[1]);
                }
                None => {
                    let mut srs = envelope.srs.clone();
                    // the corners keep two ordinates
                    srs.srs_dimension = srs.srs_dimension.map(|_| 2);
                    bounds = Some(Envelope {
                        srs,
                        lower_corner: DirectPosition::xy(lower.ordinates[0], lower.ordinates[1]),
                        upper_corner: DirectPosition::xy(upper.ordinates[0], upper.ordinates[1]),
                    });
                }
            }
        }

        let bounds = bounds.unwrap_or_else(|| {
            debug!("no bounded members, using the world envelope");
            Envelope::world()
        });
        debug!(
            "computed bounds {} / {}",
            bounds.lower_corner, bounds.upper_corner
        );

        self.feature.bounded_by = Some(BoundingShape::Envelope(bounds.clone()));
        bounds
    }
}

impl Fields for FeatureCollection {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.feature.fields(w)?;
        w.list("featureMember", &self.members.member)?;
        if let Some(array) = &self.members.members {
            w.list("featureMembers", array.get_all())?;
        }
        Ok(())
    }
}

/// What an observation is about.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Feature(Box<AnyFeature>),
    Geometry(Box<Geometry>),
    Reference(XLink),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature(feature) => feature.fmt(f),
            Self::Geometry(geometry) => geometry.fmt(f),
            Self::Reference(link) => link.fmt(f),
        }
    }
}

/// The act of observing a target.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub feature: AbstractFeature,
    pub valid_time: Option<Property<TimePrimitive>>,
    /// The instrument or procedure used.
    pub using: Option<Property<AnyFeature>>,
    pub target: Option<Target>,
    /// The result, any element given inline or by reference.
    pub result_of: Option<Property<Element>>,
}

impl Fields for Observation {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.feature.fields(w)?;
        w.opt("validTime", &self.valid_time)?;
        w.opt("using", &self.using)?;
        w.opt("target", &self.target)?;
        w.opt("resultOf", &self.result_of)
    }
}

/// The direction of a directed observation.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Vector(DirectPosition),
    /// One of the 16 compass points, e.g. `NNE`.
    CompassPoint(String),
    Keyword(Code),
    Text(String),
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(vector) => vector.fmt(f),
            Self::CompassPoint(point) => f.write_str(point),
            Self::Keyword(code) => code.fmt(f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectedObservation {
    pub observation: Observation,
    pub direction: Option<Direction>,
}

impl Fields for DirectedObservation {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.observation.fields(w)?;
        w.opt("direction", &self.direction)
    }
}

family! {
    /// Any member of `_Feature`.
    pub enum AnyFeature in (Group::Abstract(Head::Feature)) {
        FeatureCollection(FeatureCollection),
        Observation(Observation),
        DirectedObservation(DirectedObservation),
    }
}

impl AnyFeature {
    /// Returns the abstract feature level of the value.
    pub fn feature(&self) -> &AbstractFeature {
        match self {
            Self::FeatureCollection(v) => &v.feature,
            Self::Observation(v) => &v.feature,
            Self::DirectedObservation(v) => &v.observation.feature,
        }
    }

    pub fn feature_mut(&mut self) -> &mut AbstractFeature {
        match self {
            Self::FeatureCollection(v) => &mut v.feature,
            Self::Observation(v) => &mut v.feature,
            Self::DirectedObservation(v) => &mut v.observation.feature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::ArrayProperty;

    fn bounded(lower: (f64, f64), upper: (f64, f64)) -> AnyFeature {
        let mut observation = Observation::default();
        observation.feature.bounded_by = Some(BoundingShape::Envelope(Envelope::xy(lower, upper)));
        AnyFeature::Observation(observation)
    }

    #[test]
    fn bounds_of_an_empty_collection_are_the_world() {
        let mut collection = FeatureCollection::default();
        let world = collection.compute_bounds();
        assert_eq!(world, Envelope::world());
        assert_eq!(world.srs.srs_name.as_deref(), Some("EPSG:4326"));
        assert_eq!(world.dimension(), 2);
        assert_eq!(world.srs.axis_labels.join(" "), "Y X");
    }

    #[test]
    fn unbounded_members_fall_back_to_the_world() {
        let mut collection = FeatureCollection::default();
        collection.members.push(AnyFeature::Observation(Observation::default()));

        let mut null = Observation::default();
        null.feature.bounded_by = Some(BoundingShape::Null("unknown".to_string()));
        collection.members.push(AnyFeature::Observation(null));

        assert_eq!(collection.compute_bounds(), Envelope::world());
    }

    #[test]
    fn bounds_accumulate_over_inline_members() {
        let mut collection = FeatureCollection::default();
        collection.members.push(bounded((0.0, 0.0), (10.0, 10.0)));
        collection.members.push(bounded((-5.0, 2.0), (3.0, 20.0)));
        collection.members.push_reference("#far-away");
        collection.members.set_array(
            [bounded((100.0, 100.0), (200.0, 200.0))]
                .into_iter()
                .collect::<ArrayProperty<_>>(),
        );

        let bounds = collection.compute_bounds();
        assert_eq!(bounds, Envelope::xy((-5.0, 0.0), (10.0, 20.0)));
        assert_eq!(collection.feature.envelope(), Some(&bounds));
    }

    #[test]
    fn three_dimensional_members_give_consistent_bounds() {
        let mut envelope = Envelope::new(
            DirectPosition::new(vec![0.0, 0.0, -10.0]),
            DirectPosition::new(vec![4.0, 3.0, 10.0]),
        );
        envelope.srs.srs_name = Some("EPSG:4979".to_string());
        envelope.srs.srs_dimension = Some(3);

        let mut observation = Observation::default();
        observation.feature.bounded_by = Some(BoundingShape::Envelope(envelope));
        let mut collection = FeatureCollection::default();
        collection.members.push(AnyFeature::Observation(observation));

        let bounds = collection.compute_bounds();
        assert_eq!(bounds.srs.srs_name.as_deref(), Some("EPSG:4979"));
        assert_eq!(bounds.srs.srs_dimension, Some(2));
        assert_eq!(bounds.lower_corner, DirectPosition::xy(0.0, 0.0));
        assert_eq!(bounds.upper_corner, DirectPosition::xy(4.0, 3.0));
        assert_eq!(bounds.dimension(), 2);
    }

    #[test]
    fn recomputation_rescans_the_members() {
        let mut collection = FeatureCollection::default();
        collection.members.push(bounded((0.0, 0.0), (1.0, 1.0)));
        collection.compute_bounds();

        collection.members.push(bounded((5.0, 5.0), (6.0, 6.0)));
        assert_eq!(
            collection.compute_bounds(),
            Envelope::xy((0.0, 0.0), (6.0, 6.0))
        );
        assert_eq!(collection.features().count(), 2);
    }
}
