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

//! Geometry operations.
//!
//! The operations are part of the API so that callers can be written
//! against them, but none is computed yet. Each returns
//! [`Error::NotYetImplemented`].

use crate::crs::Crs;
use crate::error::Error;
use crate::geometry::Geometry;

pub trait GeometryOps {
    /// The shortest distance to `other`, in the units of the CRS.
    fn distance(&self, other: &Geometry) -> Result<f64, Error>;

    fn intersection(&self, other: &Geometry) -> Result<Geometry, Error>;

    /// Reprojects into `target`.
    fn transform(&self, target: &Crs) -> Result<Geometry, Error>;

    fn buffer(&self, distance: f64) -> Result<Geometry, Error>;

    fn convex_hull(&self) -> Result<Geometry, Error>;

    fn boundary(&self) -> Result<Geometry, Error>;
}

fn not_yet<T>(operation: &'static str) -> Result<T, Error> {
    Err(Error::NotYetImplemented { operation })
}

impl GeometryOps for Geometry {
    fn distance(&self, _other: &Geometry) -> Result<f64, Error> {
        not_yet("distance")
    }

    fn intersection(&self, _other: &Geometry) -> Result<Geometry, Error> {
        not_yet("intersection")
    }

    fn transform(&self, _target: &Crs) -> Result<Geometry, Error> {
        not_yet("transform")
    }

    fn buffer(&self, _distance: f64) -> Result<Geometry, Error> {
        not_yet("buffer")
    }

    fn convex_hull(&self) -> Result<Geometry, Error> {
        not_yet("convexHull")
    }

    fn boundary(&self) -> Result<Geometry, Error> {
        not_yet("boundary")
    }
}
