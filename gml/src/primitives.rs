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

//! Primitive value types: positions, position lists, measures and codes.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::display::{FieldWriter, Fields};
use crate::error::Error;
use crate::geometry::Point;
use crate::property::{Property, XLink};

/// Hashes an ordinate so that values comparing equal hash equally.
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // -0.0 == 0.0
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

pub(crate) fn hash_ordinates<H: Hasher>(values: &[f64], state: &mut H) {
    values.len().hash(state);
    for &v in values {
        hash_f64(v, state);
    }
}

/// Coordinate reference metadata shared by geometries, positions and
/// envelopes.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrsReference {
    /// URI or `AUTHORITY:CODE` identifying the CRS.
    pub srs_name: Option<String>,
    /// Number of ordinates per position.
    pub srs_dimension: Option<u32>,
    /// One label per axis.
    pub axis_labels: Vec<String>,
    /// One unit of measure per axis.
    pub uom_labels: Vec<String>,
}

impl SrsReference {
    /// Creates a reference with only the CRS name set.
    pub fn named(srs_name: impl Into<String>) -> Self {
        Self {
            srs_name: Some(srs_name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.srs_name.is_none()
            && self.srs_dimension.is_none()
            && self.axis_labels.is_empty()
            && self.uom_labels.is_empty()
    }
}

impl Fields for SrsReference {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.opt("srsName", &self.srs_name)?;
        w.opt("srsDimension", &self.srs_dimension)?;
        w.text("axisLabels", &self.axis_labels.join(" "))?;
        w.text("uomLabels", &self.uom_labels.join(" "))
    }
}

/// A single coordinate tuple.
///
/// Ordinates are positional: index 0 is the first axis of the CRS, index 1
/// the second. No axis swapping is applied anywhere in this crate.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectPosition {
    pub ordinates: Vec<f64>,
    pub srs: SrsReference,
}

impl DirectPosition {
    pub fn new(ordinates: Vec<f64>) -> Self {
        Self {
            ordinates,
            srs: SrsReference::default(),
        }
    }

    /// Creates a two-dimensional position.
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(vec![x, y])
    }

    /// Returns `srsDimension` if set, the number of ordinates otherwise.
    ///
    /// The two are not kept in sync, see [`is_consistent`](Self::is_consistent).
    ///
    /// ```
    /// use gml::DirectPosition;
    ///
    /// let mut pos = DirectPosition::new(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(pos.dimension(), 3);
    ///
    /// pos.srs.srs_dimension = Some(2);
    /// assert_eq!(pos.dimension(), 2);
    /// assert!(!pos.is_consistent());
    /// ```
    pub fn dimension(&self) -> usize {
        self.srs
            .srs_dimension
            .map_or(self.ordinates.len(), |d| d as usize)
    }

    /// Returns `false` if `srsDimension` is set and differs from the number
    /// of ordinates.
    pub fn is_consistent(&self) -> bool {
        self.srs
            .srs_dimension
            .is_none_or(|d| d as usize == self.ordinates.len())
    }

    /// Returns the ordinate at index 0.
    pub fn x(&self) -> Option<f64> {
        self.ordinates.first().copied()
    }

    /// Returns the ordinate at index 1.
    pub fn y(&self) -> Option<f64> {
        self.ordinates.get(1).copied()
    }
}

impl Hash for DirectPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ordinates(&self.ordinates, state);
        self.srs.hash(state);
    }
}

impl fmt::Display for DirectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.ordinates.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A flat list of ordinates holding several positions (`posList`).
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectPositionList {
    pub values: Vec<f64>,
    pub srs: SrsReference,
    /// Number of positions as declared by the producer.
    pub count: Option<usize>,
}

impl DirectPositionList {
    /// Number of ordinates per position: `srsDimension`, or 2.
    pub fn dimension(&self) -> usize {
        match self.srs.srs_dimension {
            Some(d) if d > 0 => d as usize,
            _ => 2,
        }
    }

    /// Splits the list into positions. Trailing ordinates that do not fill
    /// a whole position are dropped.
    pub fn positions(&self) -> Vec<DirectPosition> {
        self.values
            .chunks_exact(self.dimension())
            .map(|chunk| DirectPosition::new(chunk.to_vec()))
            .collect()
    }

    /// Flattens positions into a list. The dimension is taken from the first
    /// position unless it is the default of 2.
    pub fn from_positions(positions: &[DirectPosition]) -> Self {
        let mut list = Self {
            values: positions
                .iter()
                .flat_map(|p| p.ordinates.iter().copied())
                .collect(),
            ..Default::default()
        };
        if let Some(first) = positions.first() {
            let dim = first.ordinates.len();
            if dim != 2 {
                list.srs.srs_dimension = u32::try_from(dim).ok();
            }
        }
        list
    }
}

impl Hash for DirectPositionList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ordinates(&self.values, state);
        self.srs.hash(state);
        self.count.hash(state);
    }
}

/// The deprecated `coordinates` string with its separators.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub text: String,
    /// Decimal separator, `.` by default.
    pub decimal: String,
    /// Separator between the ordinates of a tuple, `,` by default.
    pub cs: String,
    /// Separator between tuples, a space by default.
    pub ts: String,
}

impl Default for Coordinates {
    fn default() -> Self {
        Self {
            text: String::new(),
            decimal: ".".to_string(),
            cs: ",".to_string(),
            ts: " ".to_string(),
        }
    }
}

impl Coordinates {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Parses the tuples into positions.
    ///
    /// ```
    /// use gml::Coordinates;
    ///
    /// let coords = Coordinates {
    ///     text: "1,5;2 3,5;4".to_string(),
    ///     decimal: ",".to_string(),
    ///     cs: ";".to_string(),
    ///     ts: " ".to_string(),
    /// };
    /// let positions = coords.to_positions().unwrap();
    /// assert_eq!(positions[0].ordinates, [1.5, 2.0]);
    /// assert_eq!(positions[1].ordinates, [3.5, 4.0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if an ordinate is not a number.
    pub fn to_positions(&self) -> Result<Vec<DirectPosition>, Error> {
        let tuples: Vec<&str> = if self.ts.trim().is_empty() {
            self.text.split_whitespace().collect()
        } else {
            self.text
                .split(self.ts.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect()
        };

        tuples
            .into_iter()
            .map(|tuple| {
                tuple
                    .split(self.cs.as_str())
                    .map(|ordinate| {
                        let normalized = if self.decimal == "." {
                            ordinate.trim().to_string()
                        } else {
                            ordinate.trim().replace(self.decimal.as_str(), ".")
                        };
                        normalized
                            .parse::<f64>()
                            .map_err(|_| Error::invalid("coordinates", ordinate))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(DirectPosition::new)
            })
            .collect()
    }
}

/// A numeric value with its unit of measure.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    pub value: f64,
    pub uom: String,
}

impl Measure {
    pub fn new(value: f64, uom: impl Into<String>) -> Self {
        Self {
            value,
            uom: uom.into(),
        }
    }
}

impl Hash for Measure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.value, state);
        self.uom.hash(state);
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.uom)
    }
}

/// A term from a code list or dictionary, used for names.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Code {
    pub value: String,
    pub code_space: Option<String>,
}

impl Code {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            code_space: None,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code_space {
            Some(space) => write!(f, "{} ({space})", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Human readable description, given inline or by reference.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Description {
    Text(String),
    Reference(XLink),
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Reference(link) => link.fmt(f),
        }
    }
}

/// One entry of a sequence of positions.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionMember {
    /// A `pos` element.
    Pos(DirectPosition),
    /// A `pointProperty` (or the older `pointRep`) element.
    Point(Property<Point>),
}

impl fmt::Display for PositionMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos(pos) => pos.fmt(f),
            Self::Point(point) => point.fmt(f),
        }
    }
}

/// The positions of a line string, ring or segment.
#[derive(Clone, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Positions {
    /// A single `posList`.
    List(DirectPositionList),
    /// A sequence of `pos` and `pointProperty` elements.
    Points(Vec<PositionMember>),
    /// Deprecated `coordinates` text.
    Coordinates(Coordinates),
}

impl Default for Positions {
    fn default() -> Self {
        Self::List(DirectPositionList::default())
    }
}

impl Positions {
    /// Creates a `posList` from two-dimensional positions.
    pub fn xy(points: &[(f64, f64)]) -> Self {
        Self::List(DirectPositionList {
            values: points.iter().flat_map(|&(x, y)| [x, y]).collect(),
            ..Default::default()
        })
    }

    /// Returns all positions. Points given by reference cannot be resolved
    /// here and are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `coordinates` text is malformed.
    pub fn to_direct_positions(&self) -> Result<Vec<DirectPosition>, Error> {
        match self {
            Self::List(list) => Ok(list.positions()),
            Self::Points(members) => Ok(members
                .iter()
                .filter_map(|m| match m {
                    PositionMember::Pos(pos) => Some(pos.clone()),
                    PositionMember::Point(p) => p.get_inline().map(|point| point.pos.clone()),
                })
                .collect()),
            Self::Coordinates(coords) => coords.to_positions(),
        }
    }

    /// Ordinate count of the first position, `None` without positions.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            Self::List(list) if list.values.is_empty() => None,
            Self::List(list) => Some(list.dimension()),
            other => other
                .to_direct_positions()
                .ok()?
                .first()
                .map(|p| p.ordinates.len())
                .filter(|&d| d > 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(list) => list.values.is_empty(),
            Self::Points(members) => members.is_empty(),
            Self::Coordinates(coords) => coords.text.trim().is_empty(),
        }
    }
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => {
                let mut w = FieldWriter::new(f, "posList")?;
                w.ordinates("values", &list.values)?;
                list.srs.fields(&mut w)
            }
            Self::Points(members) => FieldWriter::new(f, "pos")?.list("member", members),
            Self::Coordinates(coords) => write!(f, "coordinates {}", coords.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn signed_zero_hashes_like_zero() {
        let a = DirectPosition::xy(0.0, 1.0);
        let b = DirectPosition::xy(-0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn position_list_splits_by_dimension() {
        let mut list = DirectPositionList {
            values: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            ..Default::default()
        };
        assert_eq!(list.positions().len(), 3);

        list.srs.srs_dimension = Some(3);
        let positions = list.positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1].ordinates, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn position_list_from_positions() {
        let list = DirectPositionList::from_positions(&[
            DirectPosition::new(vec![1.0, 2.0, 3.0]),
            DirectPosition::new(vec![4.0, 5.0, 6.0]),
        ]);
        assert_eq!(list.srs.srs_dimension, Some(3));
        assert_eq!(list.positions().len(), 2);
    }

    #[test]
    fn default_coordinates() {
        let coords = Coordinates::new("1.5,2 3,4.25\n 5,6");
        let positions = coords.to_positions().unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[1].ordinates, [3.0, 4.25]);
        assert_eq!(positions[2].y(), Some(6.0));

        assert!(Coordinates::new("1,a").to_positions().is_err());
    }

    #[test]
    fn positions_skip_referenced_points() {
        let positions = Positions::Points(vec![
            PositionMember::Pos(DirectPosition::xy(1.0, 2.0)),
            PositionMember::Point(Property::reference("#p2")),
        ]);
        assert_eq!(positions.to_direct_positions().unwrap().len(), 1);
        assert!(!positions.is_empty());
        assert!(Positions::default().is_empty());
    }
}
