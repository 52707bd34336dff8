use divan::{Bencher, black_box};
use rvt::{
    BlockResult, Depth, Handler, ParamType, Position, Registry, Signature, Step, complete, locate,
    read,
};

fn main() {
    divan::main();
}

// Typical test-case lines
const SAMPLE_LINES: &[&str] = &[
    "VerifyAccept 200",
    "(Open 8080 \"localhost\" :tcp)",
    "Send 8080 [1 2 3] \"payload with spaces\"",
    "(net/Expect (Status 200) [\"ok\" 'done'])",
];

/// One form nesting the sample lines `count` times over
fn generate_form(count: usize) -> String {
    let mut result = String::with_capacity(count * 40 + 2);
    result.push('(');
    for i in 0..count {
        result.push('(');
        result.push_str(SAMPLE_LINES[i % SAMPLE_LINES.len()]);
        result.push_str(")\n");
    }
    result.push(')');
    result
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    let sig = Signature::new()
        .positional("port", ParamType::Integer)
        .variadic("payload", Some(ParamType::Text));
    for name in ["Send", "SendAll", "SetUp", "VerifyAccept", "VerifyReturn"] {
        registry
            .register(name, sig.clone(), Handler::building(|_| Ok(BlockResult::passed())))
            .unwrap();
    }
    registry
}

#[divan::bench(args = [10, 100, 1000, 10_000])]
fn read_form(bencher: Bencher, n: usize) {
    let input = generate_form(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(read(black_box(&input))));
}

#[divan::bench(args = [10, 100, 1000])]
fn locate_last_line(bencher: Bencher, n: usize) {
    let tree = read(&generate_form(n)).node.unwrap();
    let pos = Position::new(n - 1, 3);

    bencher.bench(|| black_box(locate(&tree, black_box(pos), Depth::Unlimited)));
}

#[divan::bench]
fn parse_and_bind(bencher: Bencher) {
    let registry = registry();

    bencher.bench(|| {
        let step = Step::parse(black_box("Send 8080 \"a b\" c d")).unwrap();
        black_box(registry.bind_step(&step).unwrap())
    });
}

#[divan::bench]
fn complete_prefix(bencher: Bencher) {
    let registry = registry();

    bencher.bench(|| black_box(complete(&registry, black_box("Se 80"), Position::new(0, 2))));
}
