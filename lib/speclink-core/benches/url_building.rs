use criterion::{Criterion, criterion_group, criterion_main};
use http::Method;
use speclink_core::{Dto, OpenApiDocument, build_url, classify_parameters, translate_request};
use std::hint::black_box;

fn user_api() -> OpenApiDocument {
    OpenApiDocument::from_json_str(include_str!("../fixtures/user_api.json"))
        .expect("valid document")
}

fn benchmark_url_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_building");

    let document = user_api();
    let operation = document.paths["/api/v1/user/{id}"]
        .operation(&Method::GET)
        .expect("get operation");
    let parameters = classify_parameters(&operation.parameters);

    let test_cases = [
        ("plain", Dto::new().with("id", 1).with("filter", "all").with("page", 1).with("size", 20)),
        (
            "encoded",
            Dto::new()
                .with("id", "hello world & special chars @#$%")
                .with("filter", "a=b&c=d")
                .with("page", 1)
                .with("size", 20),
        ),
        ("missing", Dto::new()),
    ];

    for (name, dto) in &test_cases {
        group.bench_function(format!("build_url_{name}"), |b| {
            b.iter(|| {
                let url = build_url(black_box(dto), black_box("/api/v1/user/{id}"), &parameters);
                black_box(url);
            })
        });
    }

    group.finish();
}

fn benchmark_translate_request(c: &mut Criterion) {
    let document = user_api();
    let dto = Dto::new().with("name", "test").with("age", 10).with("id", 3);

    c.bench_function("translate_request_post", |b| {
        b.iter(|| {
            let request = translate_request(
                black_box(&dto),
                &Method::POST,
                black_box("/api/v1/user/"),
                &document,
            );
            black_box(request).expect("valid request");
        })
    });
}

criterion_group!(benches, benchmark_url_building, benchmark_translate_request);
criterion_main!(benches);
