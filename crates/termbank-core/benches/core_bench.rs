//! Criterion benchmarks for termbank-core.
//!
//! ## Benchmark groups
//!
//! 1. **transliteration**: kana/romaji matcher on short and long inputs.
//! 2. **headwords**: headword derivation for wide kanji × reading entries.
//! 3. **references**: aggregation plus reference resolution on a synthetic
//!    lexicon.
//!
//! ## Running
//!
//! ```sh
//! cargo bench --manifest-path crates/termbank-core/Cargo.toml -- references
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use termbank_core::indexer::headword::extract_headwords;
use termbank_core::indexer::kana::is_transliteration;
use termbank_core::indexer::metadata::Metadata;
use termbank_core::models::{Entry, Gloss, KanjiForm, ReadingForm, Sense};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_entry(sequence: i64, kanji: usize, readings: usize) -> Entry {
    Entry {
        sequence,
        kanji: (0..kanji)
            .map(|k| KanjiForm {
                expression: format!("漢{}字{}", sequence, k),
                ..KanjiForm::default()
            })
            .collect(),
        readings: (0..readings)
            .map(|r| ReadingForm {
                reading: format!("かな{}", r),
                ..ReadingForm::default()
            })
            .collect(),
        senses: vec![Sense {
            glosses: vec![Gloss::new("gloss")],
            ..Sense::default()
        }],
    }
}

/// `n` entries, each referencing the kanji form of the entry before it.
fn make_lexicon(n: usize) -> Vec<Entry> {
    (0..n as i64)
        .map(|i| {
            let mut entry = make_entry(1_000_000 + i, 2, 2);
            if i > 0 {
                entry.senses[0].references = vec![format!("漢{}字0", 1_000_000 + i - 1)];
            }
            entry
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_transliteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("transliteration");
    let cases = [
        ("short", "ろしあ", "roshia"),
        ("mismatch", "ロシア", "Russia"),
        (
            "long",
            "とうきょうとっきょきょかきょく",
            "toukyou tokkyo kyoka kyoku",
        ),
    ];
    for (name, kana, text) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(kana, text), |b, (kana, text)| {
            b.iter(|| black_box(is_transliteration(black_box(text), black_box(kana))));
        });
    }
    group.finish();
}

fn bench_headwords(c: &mut Criterion) {
    let mut group = c.benchmark_group("headwords");
    for size in [2usize, 8, 32] {
        let entry = make_entry(1, size, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entry, |b, entry| {
            b.iter(|| black_box(extract_headwords(black_box(entry))));
        });
    }
    group.finish();
}

fn bench_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("references");
    group.sample_size(20);
    for size in [1_000usize, 10_000] {
        let entries = make_lexicon(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(Metadata::build(black_box(entries), "eng", false)));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Register all benchmark groups
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_transliteration, bench_headwords, bench_references);
criterion_main!(benches);
