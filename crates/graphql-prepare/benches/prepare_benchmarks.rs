use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use graphql_prepare::Document;
use graphql_prepare::Schema;
use graphql_prepare::SchemaBuilder;
use graphql_prepare::prepare::PrepareOptions;
use std::fmt::Write;

const PET_SCHEMA: &str = "
    type Query {
      pet: Pet
      pets(limit: Int = 10): [Pet]
      human(id: ID!): Human
    }
    interface Pet { name: String, owner: Human }
    type Dog implements Pet { name: String, owner: Human, barkVolume: Int }
    type Cat implements Pet { name: String, owner: Human, meowVolume: Int }
    type Human { name: String, pets: [Pet] }
";

fn pet_schema() -> Schema {
    SchemaBuilder::from_str(PET_SCHEMA, None)
        .and_then(SchemaBuilder::build)
        .expect("benchmark schema builds")
}

/// A query alternating `pets` / `owner` down to `depth` levels, narrowing by
/// concrete type at every second level.
fn nested_query(depth: usize) -> String {
    let mut out = String::from("query Nested {\n  human(id: \"1\") {\n");
    for level in 0..depth {
        let indent = "  ".repeat(level + 2);
        if level % 2 == 0 {
            let _ = writeln!(out, "{indent}pets {{");
            let _ = writeln!(out, "{indent}  name");
            let _ = writeln!(out, "{indent}  ... on Dog {{ barkVolume }}");
        } else {
            let _ = writeln!(out, "{indent}owner {{");
            let _ = writeln!(out, "{indent}  name");
        }
    }
    for level in (0..depth).rev() {
        let _ = writeln!(out, "{}}}", "  ".repeat(level + 2));
    }
    out.push_str("  }\n}\n");
    out
}

/// A flat query of `width` aliased root fields, each repeated once to
/// exercise response-key merging.
fn wide_query(width: usize) -> String {
    let mut out = String::from("query Wide {\n");
    for index in 0..width {
        let _ = writeln!(out, "  p{index}: pet {{ name }}");
        let _ = writeln!(out, "  p{index}: pet {{ ... on Dog {{ barkVolume }} }}");
    }
    out.push_str("}\n");
    out
}

fn prepare_nested(c: &mut Criterion) {
    let schema = pet_schema();
    let mut group = c.benchmark_group("prepare_nested");

    for depth in [4usize, 16, 48] {
        let source = nested_query(depth);
        let document = Document::parse(&source, None)
            .expect("benchmark document parses");
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                black_box(graphql_prepare::prepare(
                    &schema,
                    &document,
                    None,
                    &PrepareOptions::default(),
                ))
            })
        });
    }

    group.finish();
}

fn prepare_wide(c: &mut Criterion) {
    let schema = pet_schema();
    let mut group = c.benchmark_group("prepare_wide");

    for width in [8usize, 64, 512] {
        let source = wide_query(width);
        let document = Document::parse(&source, None)
            .expect("benchmark document parses");
        group.bench_function(format!("width_{width}"), |b| {
            b.iter(|| {
                black_box(graphql_prepare::prepare(
                    &schema,
                    &document,
                    None,
                    &PrepareOptions::default(),
                ))
            })
        });
    }

    group.finish();
}

fn print_plan(c: &mut Criterion) {
    let schema = pet_schema();
    let source = nested_query(16);
    let document = Document::parse(&source, None)
        .expect("benchmark document parses");
    let operation = graphql_prepare::prepare(
        &schema,
        &document,
        None,
        &PrepareOptions::default(),
    ).expect("benchmark operation prepares");

    c.bench_function("print_plan", |b| {
        b.iter(|| black_box(operation.print()))
    });
}

criterion_group!(benches, prepare_nested, prepare_wide, print_plan);
criterion_main!(benches);
