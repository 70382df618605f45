//! Criterion benchmarks for chain parsing and frontier reduction.
//!
//! Uses a synthetic menu: a handful of chain templates instantiated over a
//! range of thresholds, so every category holds many comparable chains.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trigger_api::chain::{ChainRecord, TriggerChain};
use trigger_api::diagnostics::RecordingDiagnostics;
use trigger_api::flags::TriggerPeriod;
use trigger_api::info::{ChainFilter, TriggerInfo};

// ===========================================================================
// Synthetic menu
// ===========================================================================

const TEMPLATES: [(&str, &str); 6] = [
    ("HLT_e{t}_lhtight_ivarloose", "L1_EM22VHI"),
    ("HLT_mu{t}_ivarmedium", "L1_MU20"),
    ("HLT_mu{t}_mu8noL1", "L1_MU20"),
    ("HLT_2e{t}_lhvloose_nod0", "L1_2EM15VHI"),
    ("HLT_e{t}_lhloose_nod0_mu14", "L1_EM15VH_MU10"),
    ("HLT_j{t}_bmv2c1070_split_3j{t}", "L1_4J15"),
];

fn menu(per_template: usize) -> Vec<ChainRecord> {
    let mut records = Vec::with_capacity(TEMPLATES.len() * per_template);
    for i in 0..per_template {
        let thr = 10 + i;
        for (name, seed) in TEMPLATES {
            let livefraction = if i % 3 == 0 { 0.5 } else { 1.0 };
            records.push(ChainRecord::new(
                name.replace("{t}", &thr.to_string()),
                seed,
                livefraction,
                100,
            ));
        }
    }
    records
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_parse_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_chains");
    let diag = RecordingDiagnostics::new();

    for &n in &[10, 100, 500] {
        let records = menu(n);
        group.bench_with_input(BenchmarkId::from_parameter(records.len()), &records, |b, r| {
            b.iter(|| {
                let chains: Vec<_> = r
                    .iter()
                    .filter_map(|rec| TriggerChain::from_record(black_box(rec), &diag).ok())
                    .collect();
                black_box(chains)
            })
        });
    }
    group.finish();
}

fn bench_lowest_unprescaled(c: &mut Criterion) {
    let mut group = c.benchmark_group("lowest_unprescaled");
    group.sample_size(20);
    let diag = RecordingDiagnostics::new();
    let filter = ChainFilter::all();

    for &n in &[10, 50, 200] {
        let info = TriggerInfo::from_records(TriggerPeriod::Y2017, 100, &menu(n), &diag)
            .expect("synthetic menu must parse");
        group.bench_with_input(BenchmarkId::from_parameter(n), &info, |b, info| {
            b.iter(|| {
                let names = info.lowest_unprescaled(black_box(&filter));
                black_box(names)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_chains, bench_lowest_unprescaled);
criterion_main!(benches);
