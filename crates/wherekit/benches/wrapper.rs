use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wherekit::{Param, Wrapper};

/// col0 = V AND col1 = V AND ... with `n` predicates.
fn build_flat(n: usize) -> Wrapper {
    let mut w = Wrapper::new();
    for i in 0..n {
        if i > 0 {
            w = w.and();
        }
        w = w.eq(&format!("col{i}"), i as i64);
    }
    w
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapper/render");

    for n in [1, 5, 10, 50, 100] {
        let w = build_flat(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &w, |b, w| {
            b.iter(|| black_box(w.render()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapper/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_flat(n).render()));
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapper/nested_groups");

    for n in [1, 5, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut w = Wrapper::new();
                for i in 0..n {
                    w = w.or_nested(|w| w.eq("a", i as i64).and().like("b", "x"));
                }
                black_box(w.render());
            });
        });
    }

    group.finish();
}

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapper/format_template");

    for n in [1, 5, 20] {
        let template: Vec<String> = (0..n).map(|i| format!("c{i} = {{{i}}}")).collect();
        let template = template.join(" AND ");
        let values: Vec<Param> = (0..n).map(|i| Param::new(i as i64)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let w = Wrapper::new().apply_with(true, &template, &values);
                black_box(w.render());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_nested_groups,
    bench_template
);
criterion_main!(benches);
