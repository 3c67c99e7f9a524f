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

use std::fmt::Debug;

use gml::envelope::Envelope;
use gml::feature::AnyFeature;
use gml::geometry::Geometry;
use gml::patch::SurfacePatch;
use gml::registry::{self, Group, Head, Kind, Variant};
use gml::segment::CurveSegment;
use gml::temporal::TimePrimitive;

/// One document per registered element: kind, root attributes and content.
const FIXTURES: &[(Kind, &str, &str)] = &[
    // _Geometry
    (
        Kind::Point,
        r#"gml:id="p1" srsName="EPSG:4326" srsDimension="2""#,
        r#"<gml:name codeSpace="urn:x">Alpha</gml:name><gml:pos>1.5 2.5</gml:pos>"#,
    ),
    (
        Kind::LineString,
        "",
        r#"<gml:pos>0 0</gml:pos><gml:pos>1 1</gml:pos>"#,
    ),
    (
        Kind::Curve,
        "",
        r#"<gml:segments>
             <gml:LineStringSegment><gml:posList>0 0 1 1</gml:posList></gml:LineStringSegment>
             <gml:Arc><gml:posList>1 1 2 2 3 1</gml:posList></gml:Arc>
           </gml:segments>"#,
    ),
    (
        Kind::OrientableCurve,
        r#"orientation="-""#,
        r##"<gml:baseCurve xlink:href="#c1"/>"##,
    ),
    (
        Kind::CompositeCurve,
        "",
        r##"<gml:curveMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:curveMember>
            <gml:curveMember xlink:href="#c2" xlink:title="second"/>"##,
    ),
    (
        Kind::Polygon,
        "",
        r#"<gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior>
           <gml:interior><gml:LinearRing><gml:posList>1 1 2 1 2 2 1 1</gml:posList></gml:LinearRing></gml:interior>"#,
    ),
    (
        Kind::Surface,
        "",
        r#"<gml:patches>
             <gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>
             <gml:Cone><gml:row><gml:posList>0 0 1 1</gml:posList></gml:row><gml:rows>1</gml:rows><gml:columns>2</gml:columns></gml:Cone>
           </gml:patches>"#,
    ),
    (
        Kind::PolyhedralSurface,
        "",
        r#"<gml:polygonPatches>
             <gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>
           </gml:polygonPatches>"#,
    ),
    (
        Kind::TriangulatedSurface,
        "",
        r#"<gml:trianglePatches>
             <gml:Triangle><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Triangle>
           </gml:trianglePatches>"#,
    ),
    (
        Kind::Tin,
        "",
        r#"<gml:trianglePatches>
             <gml:Triangle><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Triangle>
           </gml:trianglePatches>
           <gml:stopLines><gml:LineStringSegment><gml:posList>0 0 1 0</gml:posList></gml:LineStringSegment></gml:stopLines>
           <gml:maxLength uom="m">5</gml:maxLength>
           <gml:controlPoint><gml:posList>0 0 1 0 0 1</gml:posList></gml:controlPoint>"#,
    ),
    (
        Kind::OrientableSurface,
        "",
        r#"<gml:baseSurface>
             <gml:Polygon><gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon>
           </gml:baseSurface>"#,
    ),
    (
        Kind::CompositeSurface,
        "",
        r##"<gml:surfaceMember>
              <gml:Polygon><gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon>
            </gml:surfaceMember>
            <gml:surfaceMember xlink:href="#s2"/>"##,
    ),
    (
        Kind::LinearRing,
        "",
        r#"<gml:posList srsDimension="2" count="4">0 0 4 0 4 4 0 0</gml:posList>"#,
    ),
    (
        Kind::Ring,
        "",
        r#"<gml:curveMember>
             <gml:Curve><gml:segments>
               <gml:LineStringSegment><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LineStringSegment>
             </gml:segments></gml:Curve>
           </gml:curveMember>"#,
    ),
    (
        Kind::MultiPoint,
        "",
        r#"<gml:pointMember><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:pointMember>
           <gml:pointMembers><gml:Point><gml:pos>3 4</gml:pos></gml:Point></gml:pointMembers>"#,
    ),
    (
        Kind::MultiCurve,
        "",
        r##"<gml:curveMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:curveMember>
            <gml:curveMembers>
              <gml:OrientableCurve orientation="-"><gml:baseCurve xlink:href="#c1"/></gml:OrientableCurve>
            </gml:curveMembers>"##,
    ),
    (
        Kind::MultiSurface,
        "",
        r##"<gml:surfaceMember xlink:href="#s1"/>"##,
    ),
    (
        Kind::MultiGeometry,
        "",
        r#"<gml:geometryMember><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:geometryMember>
           <gml:geometryMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:geometryMember>"#,
    ),
    // _CurveSegment
    (
        Kind::LineStringSegment,
        r#"numDerivativesAtStart="1""#,
        r#"<gml:posList>0 0 1 1</gml:posList>"#,
    ),
    (
        Kind::ArcString,
        r#"numArc="2""#,
        r#"<gml:posList>0 0 1 1 2 0 3 -1 4 0</gml:posList>"#,
    ),
    (Kind::Arc, "", r#"<gml:posList>0 0 1 1 2 0</gml:posList>"#),
    (Kind::Circle, "", r#"<gml:posList>0 0 1 1 2 0</gml:posList>"#),
    (
        Kind::ArcStringByBulge,
        "",
        r#"<gml:posList>0 0 2 0 4 0</gml:posList>
           <gml:bulge>0.5</gml:bulge><gml:bulge>-0.25</gml:bulge>
           <gml:normal>0 0 1</gml:normal><gml:normal>0 0 1</gml:normal>"#,
    ),
    (
        Kind::ArcByBulge,
        "",
        r#"<gml:posList>0 0 2 0</gml:posList><gml:bulge>0.5</gml:bulge><gml:normal>0 0 1</gml:normal>"#,
    ),
    (
        Kind::ArcByCenterPoint,
        r#"numArc="1""#,
        r#"<gml:pos>0 0</gml:pos>
           <gml:radius uom="m">10</gml:radius>
           <gml:startAngle uom="deg">0</gml:startAngle>
           <gml:endAngle uom="deg">90</gml:endAngle>"#,
    ),
    (
        Kind::CircleByCenterPoint,
        "",
        r#"<gml:pos>0 0</gml:pos><gml:radius uom="m">10</gml:radius>"#,
    ),
    (
        Kind::CubicSpline,
        "",
        r#"<gml:posList>0 0 1 2 2 0</gml:posList>
           <gml:vectorAtStart>1 0</gml:vectorAtStart>
           <gml:vectorAtEnd>0 -1</gml:vectorAtEnd>"#,
    ),
    (
        Kind::BSpline,
        r#"knotType="uniform" isPolynomial="true""#,
        r#"<gml:posList>0 0 1 2 2 0</gml:posList>
           <gml:degree>2</gml:degree>
           <gml:knot><gml:Knot><gml:value>0</gml:value><gml:multiplicity>3</gml:multiplicity><gml:weight>1</gml:weight></gml:Knot></gml:knot>
           <gml:knot><gml:Knot><gml:value>1</gml:value><gml:multiplicity>3</gml:multiplicity><gml:weight>1</gml:weight></gml:Knot></gml:knot>"#,
    ),
    (
        Kind::Bezier,
        "",
        r#"<gml:posList>0 0 1 2 2 0</gml:posList><gml:degree>2</gml:degree>"#,
    ),
    (
        Kind::Clothoid,
        "",
        r#"<gml:refLocation><gml:AffinePlacement>
             <gml:location>0 0</gml:location>
             <gml:refDirection>1 0</gml:refDirection>
             <gml:refDirection>0 1</gml:refDirection>
             <gml:inDimension>1</gml:inDimension>
             <gml:outDimension>2</gml:outDimension>
           </gml:AffinePlacement></gml:refLocation>
           <gml:scaleFactor>1.5</gml:scaleFactor>
           <gml:startParameter>0</gml:startParameter>
           <gml:endParameter>10</gml:endParameter>"#,
    ),
    (
        Kind::GeodesicString,
        "",
        r#"<gml:posList>10 50 11 51 12 50</gml:posList>"#,
    ),
    (Kind::Geodesic, "", r#"<gml:posList>10 50 11 51</gml:posList>"#),
    (
        Kind::OffsetCurve,
        "",
        r#"<gml:offsetBase><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:offsetBase>
           <gml:distance uom="m">3</gml:distance>
           <gml:refDirection>0 0 1</gml:refDirection>"#,
    ),
    // _SurfacePatch
    (
        Kind::PolygonPatch,
        "",
        r#"<gml:exterior><gml:LinearRing><gml:posList>0 0 4 0 4 4 0 0</gml:posList></gml:LinearRing></gml:exterior>
           <gml:interior><gml:LinearRing><gml:posList>1 1 2 1 2 2 1 1</gml:posList></gml:LinearRing></gml:interior>"#,
    ),
    (
        Kind::Triangle,
        "",
        r#"<gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior>"#,
    ),
    (
        Kind::Rectangle,
        "",
        r#"<gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior>"#,
    ),
    (
        Kind::Cone,
        "",
        r#"<gml:row><gml:posList>0 0 1 1</gml:posList></gml:row><gml:rows>1</gml:rows><gml:columns>2</gml:columns>"#,
    ),
    (
        Kind::Cylinder,
        "",
        r#"<gml:row><gml:posList>0 0 0 1</gml:posList></gml:row><gml:row><gml:posList>1 0 1 1</gml:posList></gml:row>"#,
    ),
    (
        Kind::Sphere,
        "",
        r#"<gml:row><gml:pos>0 0</gml:pos><gml:pos>1 1</gml:pos></gml:row>"#,
    ),
    // _Feature
    (
        Kind::FeatureCollection,
        r#"gml:id="fc1""#,
        r##"<gml:boundedBy>
              <gml:Envelope srsName="EPSG:4326"><gml:lowerCorner>0 0</gml:lowerCorner><gml:upperCorner>10 10</gml:upperCorner></gml:Envelope>
            </gml:boundedBy>
            <gml:featureMember>
              <gml:Observation><gml:location><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:location></gml:Observation>
            </gml:featureMember>
            <gml:featureMember xlink:href="#f2"/>
            <gml:featureMembers>
              <gml:DirectedObservation>
                <gml:direction><gml:DirectionVector><gml:vector>1 0</gml:vector></gml:DirectionVector></gml:direction>
              </gml:DirectedObservation>
            </gml:featureMembers>"##,
    ),
    (
        Kind::Observation,
        r#"gml:id="o1""#,
        r##"<gml:description>A reading</gml:description>
            <gml:boundedBy><gml:Null>inapplicable</gml:Null></gml:boundedBy>
            <gml:location><gml:LocationKeyWord codeSpace="urn:places">harbour</gml:LocationKeyWord></gml:location>
            <gml:validTime><gml:TimeInstant><gml:timePosition>2010-01-01</gml:timePosition></gml:TimeInstant></gml:validTime>
            <gml:using xlink:href="#sensor"/>
            <gml:target><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:target>
            <gml:resultOf><value xmlns="urn:example" unit="C">21.5</value></gml:resultOf>"##,
    ),
    (
        Kind::DirectedObservation,
        "",
        r#"<gml:location><gml:LocationString>north pier</gml:LocationString></gml:location>
           <gml:direction><gml:DirectionKeyword codeSpace="urn:dir">upstream</gml:DirectionKeyword></gml:direction>"#,
    ),
    // _TimePrimitive
    (
        Kind::TimeInstant,
        "",
        r#"<gml:relatedTime relativePosition="Before">
             <gml:TimePeriod><gml:beginPosition>2000</gml:beginPosition><gml:endPosition>2001</gml:endPosition></gml:TimePeriod>
           </gml:relatedTime>
           <gml:timePosition indeterminatePosition="after">2009-01-01</gml:timePosition>"#,
    ),
    (
        Kind::TimePeriod,
        "",
        r#"<gml:beginPosition>2009-01-01</gml:beginPosition>
           <gml:endPosition indeterminatePosition="now"/>
           <gml:duration>P1D</gml:duration>"#,
    ),
    // root
    (
        Kind::Envelope,
        r#"srsName="EPSG:4326" srsDimension="2" axisLabels="Y X""#,
        r#"<gml:lowerCorner>-10 -20</gml:lowerCorner><gml:upperCorner>10 20</gml:upperCorner>"#,
    ),
];

fn document(kind: Kind, attributes: &str, content: &str) -> String {
    let name = kind.element();
    format!(
        r#"<gml:{name} xmlns:gml="http://www.opengis.net/gml" xmlns:xlink="http://www.w3.org/1999/xlink" {attributes}>{content}</gml:{name}>"#
    )
}

/// Decodes the document as `T`, writes it and decodes the output again.
fn round_trip<T: Variant + PartialEq + Debug>(kind: Kind, xml: &str) {
    let decoded: T = gml::from_str(xml).unwrap_or_else(|e| panic!("{kind:?}: {e}"));
    assert_eq!(decoded.kind(), kind);
    assert_eq!(registry::wrap(&decoded).tag(), kind.element());

    let written = gml::to_string(&decoded).unwrap_or_else(|e| panic!("{kind:?}: {e}"));
    let reread: T =
        gml::from_str(&written).unwrap_or_else(|e| panic!("{kind:?}: {e}\n{written}"));
    assert_eq!(decoded, reread, "{kind:?} changed when written:\n{written}");
}

#[test]
fn every_registered_element_has_a_fixture() {
    for kind in Kind::ALL {
        assert!(
            FIXTURES.iter().any(|(k, _, _)| k == kind),
            "no fixture for {kind:?}"
        );
    }
}

#[test]
fn every_registered_element_survives_a_round_trip() {
    for &(kind, attributes, content) in FIXTURES {
        let xml = document(kind, attributes, content);

        if kind.substitutes(Group::Abstract(Head::Geometry)) {
            round_trip::<Geometry>(kind, &xml);
        } else if kind.substitutes(Group::Abstract(Head::CurveSegment)) {
            round_trip::<CurveSegment>(kind, &xml);
        } else if kind.substitutes(Group::Abstract(Head::SurfacePatch)) {
            round_trip::<SurfacePatch>(kind, &xml);
        } else if kind.substitutes(Group::Abstract(Head::Feature)) {
            round_trip::<AnyFeature>(kind, &xml);
        } else if kind.substitutes(Group::Abstract(Head::TimePrimitive)) {
            round_trip::<TimePrimitive>(kind, &xml);
        } else {
            assert_eq!(kind, Kind::Envelope);
            round_trip::<Envelope>(kind, &xml);
        }
    }
}

#[test]
fn restricted_elements_keep_their_own_name() {
    let pairs = [
        (Kind::Circle, Kind::ArcString),
        (Kind::CircleByCenterPoint, Kind::ArcByCenterPoint),
        (Kind::Bezier, Kind::BSpline),
        (Kind::TriangulatedSurface, Kind::Surface),
        (Kind::DirectedObservation, Kind::Observation),
    ];

    for (specific, ancestor) in pairs {
        assert!(specific.substitutes(Group::Concrete(ancestor)));
        assert!(!ancestor.substitutes(Group::Concrete(specific)));
        assert!(specific.depth() > ancestor.depth());

        let (_, attributes, content) = FIXTURES
            .iter()
            .find(|(kind, _, _)| *kind == specific)
            .copied()
            .unwrap();
        let xml = document(specific, attributes, content);
        let written = if specific.substitutes(Group::Abstract(Head::Geometry)) {
            gml::to_string(&gml::from_str::<Geometry>(&xml).unwrap()).unwrap()
        } else if specific.substitutes(Group::Abstract(Head::Feature)) {
            gml::to_string(&gml::from_str::<AnyFeature>(&xml).unwrap()).unwrap()
        } else {
            gml::to_string(&gml::from_str::<CurveSegment>(&xml).unwrap()).unwrap()
        };

        let open_tag = format!("<gml:{} ", specific.element());
        assert!(written.contains(&open_tag), "{specific:?} written as:\n{written}");
    }
}

#[test]
fn elements_outside_the_family_are_rejected() {
    let point = document(Kind::Point, "", "<gml:pos>1 2</gml:pos>");
    assert_eq!(
        gml::from_str::<CurveSegment>(&point),
        Err(gml::Error::UnsupportedVariant {
            element: "Point".to_string(),
            expected: "_CurveSegment",
        })
    );

    let unknown = r#"<gml:Spiral xmlns:gml="http://www.opengis.net/gml"/>"#;
    assert!(matches!(
        gml::from_str::<Geometry>(unknown),
        Err(gml::Error::UnsupportedVariant { .. })
    ));

    let foreign = r#"<Point xmlns="urn:not-gml"><pos>1 2</pos></Point>"#;
    assert!(matches!(
        gml::from_str::<Geometry>(foreign),
        Err(gml::Error::UnsupportedVariant { .. })
    ));
}

#[test]
fn foreign_result_survives_a_round_trip() {
    let xml = document(
        Kind::Observation,
        "",
        r#"<gml:resultOf>
             <Result xmlns="urn:app" xmlns:q="urn:quality" xmlns:u="urn:units" q:flag="ok" u:flag="C">
               <plain xmlns="">1</plain>
               <reading><plain xmlns="">2</plain></reading>
             </Result>
           </gml:resultOf>"#,
    );
    round_trip::<AnyFeature>(Kind::Observation, &xml);

    let AnyFeature::Observation(observation) = gml::from_str(&xml).unwrap() else {
        panic!("not an observation");
    };
    let written = gml::to_string(&AnyFeature::Observation(observation)).unwrap();
    let AnyFeature::Observation(reread) = gml::from_str(&written).unwrap() else {
        panic!("not an observation");
    };

    let result = reread.result_of.as_ref().and_then(|p| p.get_inline()).unwrap();
    assert_eq!(result.namespace.as_deref(), Some("urn:app"));
    assert_eq!(result.children[0].namespace, None);
    assert_eq!(result.children[1].namespace.as_deref(), Some("urn:app"));
    assert_eq!(result.children[1].children[0].namespace, None);

    let flags: Vec<_> = result
        .attributes
        .iter()
        .map(|a| (a.namespace.as_deref(), a.value.as_str()))
        .collect();
    assert_eq!(flags, [(Some("urn:quality"), "ok"), (Some("urn:units"), "C")]);
}
