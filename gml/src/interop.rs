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

//! Conversions into [`geo`] types.
//!
//! Only the first two ordinates of each position are used. Rings given as
//! `Ring` (composed of curves) cannot be converted, only `LinearRing`.

use crate::envelope::Envelope;
use crate::error::Error;
use crate::geometry::{AnyRing, LineString, LinearRing, Point, Polygon};
use crate::primitives::{DirectPosition, Positions};

fn coord(pos: &DirectPosition) -> Result<geo::Coord<f64>, Error> {
    match pos.ordinates.as_slice() {
        [x, y, ..] => Ok(geo::Coord { x: *x, y: *y }),
        _ => Err(Error::invalid("pos", pos.to_string())),
    }
}

fn line(positions: &Positions) -> Result<geo::LineString<f64>, Error> {
    positions
        .to_direct_positions()?
        .iter()
        .map(coord)
        .collect::<Result<Vec<_>, _>>()
        .map(geo::LineString::new)
}

fn ring(ring: &AnyRing) -> Result<geo::LineString<f64>, Error> {
    match ring {
        AnyRing::LinearRing(linear) => line(&linear.positions),
        AnyRing::Ring(_) => Err(Error::unsupported("Ring", "LinearRing")),
    }
}

impl TryFrom<&Point> for geo::Point<f64> {
    type Error = Error;

    fn try_from(point: &Point) -> Result<Self, Self::Error> {
        coord(&point.pos).map(geo::Point::from)
    }
}

impl TryFrom<&LineString> for geo::LineString<f64> {
    type Error = Error;

    fn try_from(line_string: &LineString) -> Result<Self, Self::Error> {
        line(&line_string.positions)
    }
}

impl TryFrom<&LinearRing> for geo::LineString<f64> {
    type Error = Error;

    fn try_from(ring: &LinearRing) -> Result<Self, Self::Error> {
        line(&ring.positions)
    }
}

impl TryFrom<&Polygon> for geo::Polygon<f64> {
    type Error = Error;

    fn try_from(polygon: &Polygon) -> Result<Self, Self::Error> {
        let exterior = polygon
            .exterior
            .as_ref()
            .ok_or(Error::MissingField("exterior"))?;
        let interiors = polygon
            .interiors
            .iter()
            .map(ring)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(geo::Polygon::new(ring(exterior)?, interiors))
    }
}

impl TryFrom<&Envelope> for geo::Rect<f64> {
    type Error = Error;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        Ok(geo::Rect::new(
            coord(&envelope.lower_corner)?,
            coord(&envelope.upper_corner)?,
        ))
    }
}
