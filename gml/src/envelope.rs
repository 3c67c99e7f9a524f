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

//! Envelopes and bounding shapes.
//!
//! An [`Envelope`] is always held as a pair of corners. Older documents may
//! give the corners as two `pos` elements, two `coord` elements or a
//! `coordinates` string; those are converted through [`LegacyEnvelope`]
//! when read and never written back.

use std::fmt;

use crate::display::{FieldWriter, Fields};
use crate::error::Error;
use crate::primitives::{Coordinates, DirectPosition, SrsReference};
use crate::registry::{Group, Kind, Variant};
use crate::xml::Element;

/// An axis-aligned box given by its lower and upper corner.
///
/// Corners are expected to be ordered (`lower <= upper` on every axis), but
/// this is not enforced; see [`is_ordered`](Self::is_ordered).
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub srs: SrsReference,
    pub lower_corner: DirectPosition,
    pub upper_corner: DirectPosition,
}

impl Envelope {
    pub fn new(lower_corner: DirectPosition, upper_corner: DirectPosition) -> Self {
        Self {
            srs: SrsReference::default(),
            lower_corner,
            upper_corner,
        }
    }

    /// Creates a two-dimensional envelope from its corners.
    pub fn xy(lower: (f64, f64), upper: (f64, f64)) -> Self {
        Self::new(
            DirectPosition::xy(lower.0, lower.1),
            DirectPosition::xy(upper.0, upper.1),
        )
    }

    /// The whole earth in degrees: `(-180, -90)` to `(180, 90)` in
    /// `EPSG:4326`, axis labels `Y X`.
    ///
    /// ```
    /// let world = gml::Envelope::world();
    /// assert_eq!(world.lower_corner.ordinates, [-180.0, -90.0]);
    /// assert_eq!(world.upper_corner.ordinates, [180.0, 90.0]);
    /// assert_eq!(world.srs.axis_labels, ["Y", "X"]);
    /// ```
    pub fn world() -> Self {
        Self {
            srs: SrsReference {
                srs_name: Some("EPSG:4326".to_string()),
                srs_dimension: Some(2),
                axis_labels: vec!["Y".to_string(), "X".to_string()],
                uom_labels: Vec::new(),
            },
            ..Self::xy((-180.0, -90.0), (180.0, 90.0))
        }
    }

    /// Returns `srsDimension` if set, the ordinate count of the corners
    /// otherwise.
    pub fn dimension(&self) -> usize {
        self.srs.srs_dimension.map_or_else(
            || {
                self.lower_corner
                    .ordinates
                    .len()
                    .max(self.upper_corner.ordinates.len())
            },
            |d| d as usize,
        )
    }

    /// Returns `true` unless both corners hold at least two ordinates.
    pub fn is_empty(&self) -> bool {
        self.lower_corner.ordinates.len() < 2 || self.upper_corner.ordinates.len() < 2
    }

    /// Returns `true` if no ordinate of the lower corner exceeds the
    /// corresponding ordinate of the upper corner.
    pub fn is_ordered(&self) -> bool {
        self.lower_corner
            .ordinates
            .iter()
            .zip(&self.upper_corner.ordinates)
            .all(|(lower, upper)| lower <= upper)
    }

    /// Widens the envelope on the first two axes to contain `(x, y)`.
    ///
    /// `x` is compared with ordinate 0 and `y` with ordinate 1 of both
    /// corners. An empty envelope collapses to the position.
    ///
    /// ```
    /// use gml::Envelope;
    ///
    /// let mut envelope = Envelope::xy((0.0, 0.0), (1.0, 1.0));
    /// envelope.expand_to(2.0, -1.0);
    /// assert_eq!(envelope, Envelope::xy((0.0, -1.0), (2.0, 1.0)));
    /// ```
    pub fn expand_to(&mut self, x: f64, y: f64) {
        if self.is_empty() {
            self.lower_corner.ordinates = vec![x, y];
            self.upper_corner.ordinates = vec![x, y];
            return;
        }

        let lower = &mut self.lower_corner.ordinates;
        lower[0] = lower[0].min(x);
        lower[1] = lower[1].min(y);

        let upper = &mut self.upper_corner.ordinates;
        upper[0] = upper[0].max(x);
        upper[1] = upper[1].max(y);
    }

    /// Returns the smallest envelope containing both envelopes on their
    /// common axes. The CRS of `self` is kept.
    pub fn union(&self, other: &Envelope) -> Envelope {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Envelope {
                srs: other.srs.clone(),
                ..Envelope::new(other.lower_corner.clone(), other.upper_corner.clone())
            };
        }

        let zip = |a: &[f64], b: &[f64], f: fn(f64, f64) -> f64| -> Vec<f64> {
            a.iter().zip(b).map(|(&a, &b)| f(a, b)).collect()
        };

        let mut union = self.clone();
        union.lower_corner.ordinates = zip(
            &self.lower_corner.ordinates,
            &other.lower_corner.ordinates,
            f64::min,
        );
        union.upper_corner.ordinates = zip(
            &self.upper_corner.ordinates,
            &other.upper_corner.ordinates,
            f64::max,
        );
        union
    }
}

impl Fields for Envelope {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.srs.fields(w)?;
        w.field("lowerCorner", &self.lower_corner)?;
        w.field("upperCorner", &self.upper_corner)
    }
}

crate::display::display_fields!(Envelope => "Envelope");

impl Variant for Envelope {
    const GROUP: Group = Group::Concrete(Kind::Envelope);

    fn kind(&self) -> Kind {
        Kind::Envelope
    }

    fn encode(&self) -> Element {
        let mut element = Element::gml(Kind::Envelope.element());
        crate::codec::Content::write(self, Kind::Envelope, &mut element);
        element
    }

    fn decode(kind: Kind, element: &Element) -> Result<Self, Error> {
        <Self as crate::codec::Content>::read(kind, element)
    }
}

/// The corners of an envelope in one of the deprecated forms.
#[derive(Clone, PartialEq, Debug)]
pub enum LegacyEnvelope {
    /// Two `pos` or two `coord` elements.
    Positions(Vec<DirectPosition>),
    /// A `coordinates` string holding two tuples.
    Coordinates(Coordinates),
}

impl TryFrom<LegacyEnvelope> for Envelope {
    type Error = Error;

    /// Takes the first position as the lower and the second as the upper
    /// corner.
    fn try_from(legacy: LegacyEnvelope) -> Result<Self, Self::Error> {
        let positions = match legacy {
            LegacyEnvelope::Positions(positions) => positions,
            LegacyEnvelope::Coordinates(coords) => coords.to_positions()?,
        };

        match <[DirectPosition; 2]>::try_from(positions) {
            Ok([lower, upper]) => Ok(Envelope::new(lower, upper)),
            Err(positions) if positions.len() < 2 => Err(Error::MissingField("upperCorner")),
            Err(positions) => Err(Error::invalid(
                "Envelope",
                format!("{} corners", positions.len()),
            )),
        }
    }
}

/// The content of a `boundedBy` property.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundingShape {
    Envelope(Envelope),
    /// Explicitly not bounded, with the reason (e.g. `inapplicable`).
    Null(String),
}

impl fmt::Display for BoundingShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope(envelope) => envelope.fmt(f),
            Self::Null(reason) => write!(f, "null ({reason})"),
        }
    }
}
