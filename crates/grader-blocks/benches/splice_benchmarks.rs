use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grader_blocks::{MarkerPair, Payload, splice};

fn large_source(block_lines: usize) -> String {
    let mut content = String::new();
    for i in 0..500 {
        content.push_str(&format!("fn student_{}() {{}}\n", i));
    }
    content.push_str("// BEFORE TEST\n");
    for i in 0..block_lines {
        content.push_str(&format!("    #[test] fn old_{}() {{}}\n", i));
    }
    content.push_str("// AFTER TEST\n");
    for i in 0..500 {
        content.push_str(&format!("fn trailing_{}() {{}}\n", i));
    }
    content
}

fn splice_benchmark(c: &mut Criterion) {
    let markers = MarkerPair::new("// BEFORE TEST", "// AFTER TEST").unwrap();
    let payload = Payload::new("#[cfg(test)]\nmod tests {}\n".repeat(50));
    let content = large_source(200);

    c.bench_function("scanner::splice (1.2k lines)", |b| {
        b.iter(|| splice(black_box(&content), &markers, &payload).unwrap())
    });
}

criterion_group!(benches, splice_benchmark);
criterion_main!(benches);
