use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jac_parser::parser::parse;
use jac_source::types::FileID;

const SIMPLE_WALKER: &str = r#"
walker Greeter {
    can greet with entry {
        report "hello";
    }
}
"#;

const FIBONACCI: &str = r#"
can fib(n: int) -> int {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}
"#;

const ARCHITYPE_DEFINITION: &str = r#"
node Room {
    has name: str;
    has capacity: int = 0;
    has occupants: list(str) = [];
}

edge ConnectsTo {
    has distance: float = 1.0;
}

walker Explorer {
    has visited: list(str) = [];

    can start with entry {
        visit [-->];
    }

    can record with entry: Room {
        self.visited.append(here.name);
        visit [-->];
    }
}
"#;

const COMPLEX_EXPRESSIONS: &str = r#"
can score(items: list(int)) -> int {
    total = 0;
    for x in items {
        total += x if x > 0 else -x;
    }
    weighted = [y * 2 for y in items if y % 2 == 0];
    lookup = {y: y * y for y in weighted};
    return total + (1 if len(weighted) > 0 else 0);
}
"#;

const CONTROL_FLOW: &str = r#"
can classify(n: int) -> str {
    i = 0;
    while i < n {
        if i % 15 == 0 {
            report "fizzbuzz";
        } elif i % 3 == 0 {
            report "fizz";
        } elif i % 5 == 0 {
            report "buzz";
        } else {
            report i;
        }
        i += 1;
    }
    for j = 0 to j < n by j += 1 {
        if j == n - 1 {
            break;
        }
        continue;
    }
    return "done";
}
"#;

const COMPREHENSIVE: &str = r#"
import:py from os;
import:py from math, { sqrt, floor };

glob max_depth = 10;

object Graph {
    has nodes: dict = {};

    can add_node(name: str) -> None {
        self.nodes[name] = [];
    }
}

node Vertex {
    has label: str;
    has weight: float = 0.0;
}

edge Link {
    has cost: float = 1.0;
}

walker Traverse {
    has depth: int = 0;

    can enter with entry: Vertex {
        if self.depth >= max_depth {
            disengage;
        }
        report here.label;
        self.depth += 1;
        visit [-->] else {
            revisit;
        }
    }

    can leave with exit {
        report "finished";
    }
}

can main() {
    g = here spawn Traverse();
    try {
        result = sqrt(16.0) + floor(3.7);
        assert result > 0, "must be positive";
    } except ValueError as err {
        report err;
    } finally {
        report "cleanup";
    }
}
"#;

fn bench_source(c: &mut Criterion, name: &str, source: &str) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
        b.iter(|| {
            let (ast, sink) = parse(black_box(source), FileID::new(1));
            black_box((ast, sink))
        });
    });
    group.finish();
}

fn bench_simple_walker(c: &mut Criterion) {
    bench_source(c, "simple_walker", SIMPLE_WALKER);
}

fn bench_fibonacci(c: &mut Criterion) {
    bench_source(c, "fibonacci", FIBONACCI);
}

fn bench_architype_definition(c: &mut Criterion) {
    bench_source(c, "architype_definition", ARCHITYPE_DEFINITION);
}

fn bench_complex_expressions(c: &mut Criterion) {
    bench_source(c, "complex_expressions", COMPLEX_EXPRESSIONS);
}

fn bench_control_flow(c: &mut Criterion) {
    bench_source(c, "control_flow", CONTROL_FLOW);
}

fn bench_comprehensive(c: &mut Criterion) {
    bench_source(c, "comprehensive", COMPREHENSIVE);
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");
    for count in [1usize, 10, 50, 100] {
        let source = ARCHITYPE_DEFINITION.repeat(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| {
                let (ast, sink) = parse(black_box(source), FileID::new(1));
                black_box((ast, sink))
            });
        });
    }
    group.finish();
}

fn bench_ast_traversal(c: &mut Criterion) {
    let (ast, sink) = parse(COMPREHENSIVE, FileID::new(1));
    assert!(!sink.has_errors());
    let root = ast.root().unwrap();
    c.bench_function("ast_traversal_pre_order", |b| {
        b.iter(|| black_box(ast.collect_nodes_pre_order(root)));
    });
    c.bench_function("ast_traversal_post_order", |b| {
        b.iter(|| black_box(ast.collect_nodes_post_order(root)));
    });
}

fn bench_node_allocation(c: &mut Criterion) {
    c.bench_function("node_count_after_parse", |b| {
        b.iter(|| {
            let (ast, _sink) = parse(black_box(COMPREHENSIVE), FileID::new(1));
            black_box(ast.node_count())
        });
    });
}

criterion_group!(
    benches,
    bench_simple_walker,
    bench_fibonacci,
    bench_architype_definition,
    bench_complex_expressions,
    bench_control_flow,
    bench_comprehensive,
    bench_scaling,
    bench_ast_traversal,
    bench_node_allocation,
);
criterion_main!(benches);
