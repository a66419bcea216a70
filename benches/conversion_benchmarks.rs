use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lwcp::decoder::{DecodeOptions, decode_document};
use lwcp::{ConversionModel, ConversionRule, convert, try_parse};
use std::hint::black_box;

/// Benchmark the conversion pass on already-parsed messages
fn bench_convert(c: &mut Criterion) {
    let messages = vec![
        (
            "studio",
            r#"indi studio id=1, name="Studio name", show_id=1, show_name="Show 1", num_lines=12, num_hybrids=8, num_hyb_fixed=4, next=0, pnext=0, busy_all=FALSE, mute=FALSE, show_locked=FALSE, auto_answer=FALSE"#,
        ),
        (
            "line_list",
            r#"indi studio line_list=[[IDLE, IDLE, "Main-Studio", "10", NULL, 0, NULL, "", NONE], [IDLE, IDLE, "Main-Studio", "11", NULL, 0, NULL, "", NONE]]"#,
        ),
        ("unknown_props", "indi studio alpha=1, beta=2, gamma=3, delta=4"),
    ];

    let overrides = ConversionModel::new()
        .with_rule("id", ConversionRule::rename("studioIdentifier"))
        .with_rule("num_lines", ConversionRule::rename("availableLines"));

    let mut group = c.benchmark_group("convert");

    for (name, line) in messages {
        let Ok(message) = try_parse(line) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("builtin", name), &message, |b, message| {
            b.iter(|| black_box(convert(black_box(message), &ConversionModel::new())))
        });
        group.bench_with_input(BenchmarkId::new("overrides", name), &message, |b, message| {
            b.iter(|| black_box(convert(black_box(message), &overrides)))
        });
    }

    group.finish();
}

/// Benchmark decoding a whole capture with conversion enabled
fn bench_decode_document(c: &mut Criterion) {
    let mut content = String::new();
    for i in 0..1_000 {
        content.push_str(&format!(
            "indi studio id={}, mute=FALSE, line_list=[[IDLE, IDLE, \"L{}\", \"{}\", NULL, 0, NULL, \"\", NONE]]\n",
            i % 8,
            i,
            i % 100
        ));
        if i % 10 == 0 {
            content.push_str("Garbage Line\n");
        }
    }

    let options = DecodeOptions {
        convert: true,
        overrides: ConversionModel::new(),
    };

    c.bench_function("decode_document_1000", |b| {
        b.iter(|| black_box(decode_document(black_box(&content), &options)))
    });
}

criterion_group!(conversion_benches, bench_convert, bench_decode_document);

criterion_main!(conversion_benches);
