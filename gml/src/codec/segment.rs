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

use super::{
    attribute, child_value, measure_element, parse, pos_element, property_element, read_measure,
    read_pos, read_positions, read_property, required, text_element, write_positions, Content,
};
use crate::base::AbstractCurveSegment;
use crate::error::Error;
use crate::registry::Kind;
use crate::segment::{
    fixed_interpolation, AffinePlacement, ArcByCenterPoint, ArcString, ArcStringByBulge, BSpline,
    Clothoid, CubicSpline, GeodesicString, Knot, LineStringSegment, OffsetCurve,
    SplineInterpolation,
};
use crate::xml::Element;

fn write_segment(segment: &AbstractCurveSegment, kind: Kind, element: &mut Element) {
    if let Some(interpolation) = fixed_interpolation(kind) {
        element.set_attribute("interpolation", interpolation);
    }
    let counts = [
        ("numDerivativesAtStart", segment.num_derivatives_at_start),
        ("numDerivativesAtEnd", segment.num_derivatives_at_end),
        ("numDerivativeInterior", segment.num_derivative_interior),
    ];
    for (name, count) in counts {
        if count != 0 {
            element.set_attribute(name, count.to_string());
        }
    }
}

/// Reads the continuity counts. A fixed `interpolation` attribute is not
/// read back, the kind determines it.
fn read_segment(element: &Element) -> Result<AbstractCurveSegment, Error> {
    Ok(AbstractCurveSegment {
        num_derivatives_at_start: attribute(element, "numDerivativesAtStart")?.unwrap_or(0),
        num_derivatives_at_end: attribute(element, "numDerivativesAtEnd")?.unwrap_or(0),
        num_derivative_interior: attribute(element, "numDerivativeInterior")?.unwrap_or(0),
    })
}

fn write_num_arc(num_arc: Option<u32>, element: &mut Element) {
    if let Some(num_arc) = num_arc {
        element.set_attribute("numArc", num_arc.to_string());
    }
}

impl Content for LineStringSegment {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_positions(&self.positions, element);
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
        })
    }
}

impl Content for ArcString {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_num_arc(self.num_arc, element);
        write_positions(&self.positions, element);
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
            num_arc: attribute(element, "numArc")?,
        })
    }
}

impl Content for ArcStringByBulge {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_num_arc(self.num_arc, element);
        write_positions(&self.positions, element);
        for bulge in &self.bulge {
            element.push(text_element("bulge", bulge.to_string()));
        }
        for normal in &self.normal {
            element.push(pos_element("normal", normal));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
            num_arc: attribute(element, "numArc")?,
            bulge: element
                .children_named("bulge")
                .map(|b| parse("bulge", b.text()))
                .collect::<Result<_, _>>()?,
            normal: element
                .children_named("normal")
                .map(read_pos)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl Content for ArcByCenterPoint {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_num_arc(self.num_arc, element);
        write_positions(&self.positions, element);
        element.push(measure_element("radius", &self.radius));
        if let Some(angle) = &self.start_angle {
            element.push(measure_element("startAngle", angle));
        }
        if let Some(angle) = &self.end_angle {
            element.push(measure_element("endAngle", angle));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
            num_arc: attribute(element, "numArc")?,
            radius: read_measure(required(element, "radius")?)?,
            start_angle: element.child("startAngle").map(read_measure).transpose()?,
            end_angle: element.child("endAngle").map(read_measure).transpose()?,
        })
    }
}

impl Content for CubicSpline {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_positions(&self.positions, element);
        element.push(pos_element("vectorAtStart", &self.vector_at_start));
        element.push(pos_element("vectorAtEnd", &self.vector_at_end));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
            vector_at_start: read_pos(required(element, "vectorAtStart")?)?,
            vector_at_end: read_pos(required(element, "vectorAtEnd")?)?,
        })
    }
}

fn knot_element(knot: &Knot) -> Element {
    let mut inner = Element::gml("Knot");
    inner.push(text_element("value", knot.value.to_string()));
    inner.push(text_element("multiplicity", knot.multiplicity.to_string()));
    inner.push(text_element("weight", knot.weight.to_string()));

    let mut element = Element::gml("knot");
    element.push(inner);
    element
}

fn read_knot(element: &Element) -> Result<Knot, Error> {
    let knot = required(element, "Knot")?;
    Ok(Knot {
        value: parse("value", required(knot, "value")?.text())?,
        multiplicity: parse("multiplicity", required(knot, "multiplicity")?.text())?,
        weight: parse("weight", required(knot, "weight")?.text())?,
    })
}

impl Content for BSpline {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        element.set_attribute("interpolation", self.interpolation.as_str());
        if let Some(polynomial) = self.is_polynomial {
            element.set_attribute("isPolynomial", polynomial.to_string());
        }
        if let Some(knot_type) = self.knot_type {
            element.set_attribute("knotType", knot_type.as_str());
        }
        write_positions(&self.positions, element);
        element.push(text_element("degree", self.degree.to_string()));
        for knot in &self.knots {
            element.push(knot_element(knot));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
            degree: parse("degree", required(element, "degree")?.text())?,
            knots: element
                .children_named("knot")
                .map(read_knot)
                .collect::<Result<_, _>>()?,
            interpolation: attribute::<SplineInterpolation>(element, "interpolation")?
                .unwrap_or_default(),
            is_polynomial: attribute(element, "isPolynomial")?,
            knot_type: attribute(element, "knotType")?,
        })
    }
}

impl Content for GeodesicString {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        write_positions(&self.positions, element);
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            positions: read_positions(element)?,
        })
    }
}

fn placement_element(placement: &AffinePlacement) -> Element {
    let mut inner = Element::gml("AffinePlacement");
    inner.push(pos_element("location", &placement.location));
    for direction in &placement.ref_directions {
        inner.push(pos_element("refDirection", direction));
    }
    inner.push(text_element("inDimension", placement.in_dimension.to_string()));
    inner.push(text_element("outDimension", placement.out_dimension.to_string()));

    let mut element = Element::gml("refLocation");
    element.push(inner);
    element
}

fn read_placement(element: &Element) -> Result<AffinePlacement, Error> {
    let placement = required(element, "AffinePlacement")?;
    Ok(AffinePlacement {
        location: read_pos(required(placement, "location")?)?,
        ref_directions: placement
            .children_named("refDirection")
            .map(read_pos)
            .collect::<Result<_, _>>()?,
        in_dimension: child_value(placement, "inDimension")?.unwrap_or(0),
        out_dimension: child_value(placement, "outDimension")?.unwrap_or(0),
    })
}

impl Content for Clothoid {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        element.push(placement_element(&self.ref_location));
        element.push(text_element("scaleFactor", self.scale_factor.to_string()));
        element.push(text_element("startParameter", self.start_parameter.to_string()));
        element.push(text_element("endParameter", self.end_parameter.to_string()));
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        let number = |name: &'static str| -> Result<f64, Error> {
            parse(name, required(element, name)?.text())
        };
        Ok(Self {
            segment: read_segment(element)?,
            ref_location: read_placement(required(element, "refLocation")?)?,
            scale_factor: number("scaleFactor")?,
            start_parameter: number("startParameter")?,
            end_parameter: number("endParameter")?,
        })
    }
}

impl Content for OffsetCurve {
    fn write(&self, kind: Kind, element: &mut Element) {
        write_segment(&self.segment, kind, element);
        element.push(property_element("offsetBase", &self.offset_base));
        element.push(measure_element("distance", &self.distance));
        if let Some(direction) = &self.ref_direction {
            element.push(pos_element("refDirection", direction));
        }
    }

    fn read(_kind: Kind, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            segment: read_segment(element)?,
            offset_base: read_property(required(element, "offsetBase")?)?,
            distance: read_measure(required(element, "distance")?)?,
            ref_direction: element.child("refDirection").map(read_pos).transpose()?,
        })
    }
}
