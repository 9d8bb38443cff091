use criterion::{black_box, criterion_group, criterion_main, Criterion};

use msdfield::{
    coloring, generate_msdf, generate_sdf, Bitmap, Contour, DistanceMapping, EdgeSegment,
    MsdfGeneratorConfig, Projection, Range, SdfTransformation, Shape,
};
use kurbo::{Point, Vec2};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
    let mut contour = Contour::new();
    contour.add_edge(EdgeSegment::line((x0, y0), (x1, y0)));
    contour.add_edge(EdgeSegment::line((x1, y0), (x1, y1)));
    contour.add_edge(EdgeSegment::line((x1, y1), (x0, y1)));
    contour.add_edge(EdgeSegment::line((x0, y1), (x0, y0)));
    contour
}

fn circle(center: (f64, f64), radius: f64, segments: usize) -> Contour {
    let mut contour = Contour::new();
    let k = (std::f64::consts::PI / segments as f64).tan() * radius;
    for i in 0..segments {
        let a0 = 2.0 * std::f64::consts::PI * i as f64 / segments as f64;
        let a1 = 2.0 * std::f64::consts::PI * (i + 1) as f64 / segments as f64;
        let p0 = Point::new(center.0 + radius * a0.cos(), center.1 + radius * a0.sin());
        let p2 = Point::new(center.0 + radius * a1.cos(), center.1 + radius * a1.sin());
        let p1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
        contour.add_edge(EdgeSegment::quadratic(p0, p1, p2));
    }
    contour
}

// A ring with a knocked-out round hole: two contour types, corners and
// smooth runs, the usual glyph-ish workload.
fn glyph_like_shape() -> Shape {
    let mut shape = Shape::new();
    shape.add_contour(square(0.0, 0.0, 4.0, 4.0));
    let mut hole = circle((2.0, 2.0), 1.0, 8);
    hole.reverse();
    shape.add_contour(hole);
    shape
}

fn transformation() -> SdfTransformation {
    SdfTransformation::new(
        Projection::new(Vec2::new(64.0 / 6.0, 64.0 / 6.0), Vec2::new(1.0, 1.0)),
        DistanceMapping::new(Range::symmetrical(1.0)),
    )
}

fn bench_generate(c: &mut Criterion) {
    let transformation = transformation();

    c.bench_function("generate_sdf_64", |bencher| {
        let shape = glyph_like_shape();
        bencher.iter(|| {
            let mut output: Bitmap<1> = Bitmap::new(64, 64);
            generate_sdf(
                black_box(&mut output),
                black_box(&shape),
                &transformation,
                &Default::default(),
            );
            output
        })
    });

    c.bench_function("generate_msdf_64", |bencher| {
        let mut shape = glyph_like_shape();
        coloring::simple(&mut shape, 3.0, 0);
        bencher.iter(|| {
            let mut output: Bitmap<3> = Bitmap::new(64, 64);
            generate_msdf(
                black_box(&mut output),
                black_box(&shape),
                &transformation,
                &MsdfGeneratorConfig::default(),
            );
            output
        })
    });
}

fn bench_coloring(c: &mut Criterion) {
    c.bench_function("edge_coloring_simple", |bencher| {
        bencher.iter(|| {
            let mut shape = glyph_like_shape();
            coloring::simple(&mut shape, 3.0, black_box(0));
            shape
        })
    });

    c.bench_function("edge_coloring_by_distance", |bencher| {
        bencher.iter(|| {
            let mut shape = glyph_like_shape();
            coloring::by_distance(&mut shape, 3.0, black_box(0));
            shape
        })
    });
}

criterion_group!(benches, bench_generate, bench_coloring);
criterion_main!(benches);
