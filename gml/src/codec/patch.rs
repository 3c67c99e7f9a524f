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

use super::geometry::{read_exterior, read_interiors, ring_element};
use super::{child_value, read_positions, text_element, write_positions, Content};
use crate::error::Error;
use crate::patch::{GriddedSurface, PolygonPatch, RingPatch};
use crate::registry::Kind;
use crate::xml::Element;

const PLANAR: &str = "planar";

impl Content for PolygonPatch {
    fn write(&self, _kind: Kind, element: &mut Element) {
        element.set_attribute("interpolation", PLANAR);
        if let Some(exterior) = &self.exterior {
            element.push(ring_element("exterior", exterior));
        }
        for interior in &self.interiors {
            element.push(ring_element("interior", interior));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            exterior: read_exterior(element)?,
            interiors: read_interiors(element)?,
        })
    }
}

impl Content for RingPatch {
    fn write(&self, _kind: Kind, element: &mut Element) {
        element.set_attribute("interpolation", PLANAR);
        if let Some(exterior) = &self.exterior {
            element.push(ring_element("exterior", exterior));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            exterior: read_exterior(element)?,
        })
    }
}

impl Content for GriddedSurface {
    fn write(&self, _kind: Kind, element: &mut Element) {
        element.set_attribute("horizontalCurveType", Self::HORIZONTAL_CURVE_TYPE);
        element.set_attribute("verticalCurveType", Self::VERTICAL_CURVE_TYPE);
        for row in &self.rows {
            let mut row_element = Element::gml("row");
            write_positions(row, &mut row_element);
            element.push(row_element);
        }
        if let Some(rows) = self.row_count {
            element.push(text_element("rows", rows.to_string()));
        }
        if let Some(columns) = self.column_count {
            element.push(text_element("columns", columns.to_string()));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            rows: element
                .children_named("row")
                .map(read_positions)
                .collect::<Result<_, _>>()?,
            row_count: child_value(element, "rows")?,
            column_count: child_value(element, "columns")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ReaderConfig;
    use crate::patch::SurfacePatch;
    use crate::primitives::Positions;
    use crate::registry::{self, Kind, Variant};
    use crate::xml::read_document;

    #[test]
    fn triangle_reads_its_exterior() {
        let root = read_document(
            br#"<gml:Triangle xmlns:gml="http://www.opengis.net/gml" interpolation="planar">
                  <gml:exterior>
                    <gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing>
                  </gml:exterior>
                </gml:Triangle>"#,
            &ReaderConfig::default(),
        )
        .unwrap();

        let patch: SurfacePatch = registry::unwrap(&root.name, &root).unwrap();
        assert_eq!(patch.kind(), Kind::Triangle);
        assert_eq!(patch.exterior().map(|r| r.kind()), Some(Kind::LinearRing));
    }

    #[test]
    fn sphere_keeps_rows_and_counts() {
        let root = read_document(
            br#"<gml:Sphere xmlns:gml="http://www.opengis.net/gml">
                  <gml:row><gml:posList>0 0 1 1</gml:posList></gml:row>
                  <gml:row><gml:posList>2 2 3 3</gml:posList></gml:row>
                  <gml:rows>2</gml:rows>
                  <gml:columns>2</gml:columns>
                </gml:Sphere>"#,
            &ReaderConfig::default(),
        )
        .unwrap();

        let patch: SurfacePatch = registry::unwrap(&root.name, &root).unwrap();
        let SurfacePatch::Sphere(sphere) = &patch else {
            panic!("expected a Sphere");
        };
        assert_eq!(sphere.rows.len(), 2);
        assert_eq!(sphere.rows[1], Positions::xy(&[(2.0, 2.0), (3.0, 3.0)]));
        assert_eq!(sphere.row_count, Some(2));

        let element = patch.encode();
        assert_eq!(element.attribute("horizontalCurveType"), Some("circularArc3Points"));
    }
}
