use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gml::feature::{AnyFeature, FeatureCollection};
use gml::geometry::Geometry;
use gml::Envelope;

const POINT: &str = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml" gml:id="p1" srsName="EPSG:4326"><gml:pos>52.36 -31.94</gml:pos></gml:Point>"#;

const POLYGON: &str = r#"<gml:Polygon xmlns:gml="http://www.opengis.net/gml" srsName="EPSG:4326">
  <gml:exterior><gml:LinearRing><gml:posList>0 0 10 0 10 10 0 10 0 0</gml:posList></gml:LinearRing></gml:exterior>
  <gml:interior><gml:LinearRing><gml:posList>2 2 4 2 4 4 2 4 2 2</gml:posList></gml:LinearRing></gml:interior>
</gml:Polygon>"#;

/// A collection of `n` bounded observations.
fn collection(n: usize) -> String {
    let mut xml = String::from(r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml">"#);
    for i in 0..n {
        let x = i as f64;
        xml.push_str(&format!(
            "<gml:featureMember><gml:Observation>\
             <gml:boundedBy><gml:Envelope><gml:lowerCorner>{x} {x}</gml:lowerCorner>\
             <gml:upperCorner>{} {}</gml:upperCorner></gml:Envelope></gml:boundedBy>\
             <gml:location><gml:Point><gml:pos>{x} {x}</gml:pos></gml:Point></gml:location>\
             </gml:Observation></gml:featureMember>",
            x + 1.0,
            x + 1.0
        ));
    }
    xml.push_str("</gml:FeatureCollection>");
    xml
}

fn bench_geometries(c: &mut Criterion) {
    c.bench_function("decode point", |b| {
        b.iter(|| gml::from_str::<Geometry>(black_box(POINT)))
    });

    c.bench_function("decode polygon", |b| {
        b.iter(|| gml::from_str::<Geometry>(black_box(POLYGON)))
    });

    let polygon = gml::from_str::<Geometry>(POLYGON).expect("polygon should decode");
    c.bench_function("encode polygon", |b| {
        b.iter(|| gml::to_string(black_box(&polygon)))
    });
}

fn bench_collection(c: &mut Criterion) {
    let xml = collection(1_000);
    let mut group = c.benchmark_group("feature collection");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("decode", |b| {
        b.iter(|| gml::from_str::<AnyFeature>(black_box(&xml)))
    });

    group.bench_function("stream members", |b| {
        b.iter(|| {
            gml::xml::Members::<Geometry>::new(black_box(xml.as_bytes()))
                .filter(Result::is_ok)
                .count()
        })
    });

    let Ok(AnyFeature::FeatureCollection(decoded)) = gml::from_str::<AnyFeature>(&xml) else {
        panic!("collection should decode");
    };
    group.bench_function("compute bounds", |b| {
        b.iter_batched(
            || decoded.clone(),
            |mut collection: FeatureCollection| -> Envelope { collection.compute_bounds() },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_geometries, bench_collection);
criterion_main!(benches);
