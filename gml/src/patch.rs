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

//! The `_SurfacePatch` family.

use std::fmt;

use crate::display::{FieldWriter, Fields};
use crate::geometry::{AnyRing, PositionDimension};
use crate::primitives::Positions;
use crate::registry::{Group, Head};

/// A planar patch bounded by rings.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonPatch {
    pub exterior: Option<AnyRing>,
    pub interiors: Vec<AnyRing>,
}

impl Fields for PolygonPatch {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.opt("exterior", &self.exterior)?;
        w.list("interior", &self.interiors)
    }
}

/// A patch bounded by a single ring. Payload of `Triangle` (4 positions)
/// and `Rectangle` (5 positions).
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingPatch {
    pub exterior: Option<AnyRing>,
}

impl RingPatch {
    pub fn new(exterior: AnyRing) -> Self {
        Self {
            exterior: Some(exterior),
        }
    }
}

impl Fields for RingPatch {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.opt("exterior", &self.exterior)
    }
}

/// A grid of control points. Payload of `Cone`, `Cylinder` and `Sphere`.
#[derive(Clone, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GriddedSurface {
    /// One position list per row.
    pub rows: Vec<Positions>,
    /// Declared number of rows.
    pub row_count: Option<u32>,
    /// Declared number of columns.
    pub column_count: Option<u32>,
}

impl GriddedSurface {
    /// The interpolation along rows.
    pub const HORIZONTAL_CURVE_TYPE: &'static str = "circularArc3Points";
    /// The interpolation along columns.
    pub const VERTICAL_CURVE_TYPE: &'static str = "linear";
}

impl Fields for GriddedSurface {
    fn fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.list("row", &self.rows)?;
        w.opt("rows", &self.row_count)?;
        w.opt("columns", &self.column_count)
    }
}

family! {
    /// Any member of `_SurfacePatch`.
    pub enum SurfacePatch in (Group::Abstract(Head::SurfacePatch)) {
        PolygonPatch(PolygonPatch),
        Triangle(RingPatch),
        Rectangle(RingPatch),
        Cone(GriddedSurface),
        Cylinder(GriddedSurface),
        Sphere(GriddedSurface),
    }
}

impl SurfacePatch {
    /// Returns the exterior ring of a planar patch.
    pub fn exterior(&self) -> Option<&AnyRing> {
        match self {
            Self::PolygonPatch(patch) => patch.exterior.as_ref(),
            Self::Triangle(patch) | Self::Rectangle(patch) => patch.exterior.as_ref(),
            Self::Cone(_) | Self::Cylinder(_) | Self::Sphere(_) => None,
        }
    }
}

impl PositionDimension for SurfacePatch {
    fn position_dimension(&self) -> Option<usize> {
        match self {
            Self::PolygonPatch(patch) => patch
                .exterior
                .as_ref()
                .and_then(AnyRing::position_dimension)
                .or_else(|| patch.interiors.position_dimension()),
            Self::Triangle(patch) | Self::Rectangle(patch) => {
                patch.exterior.as_ref().and_then(AnyRing::position_dimension)
            }
            Self::Cone(grid) | Self::Cylinder(grid) | Self::Sphere(grid) => {
                grid.rows.iter().find_map(Positions::dimension)
            }
        }
    }
}
