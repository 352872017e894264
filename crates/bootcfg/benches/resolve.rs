use bootcfg::domain::CandidateSet;
use bootcfg::{Catalog, builtin, parse_profile};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let catalog = Catalog::builtin().unwrap();
    let profiles = [
        ("board_header", parse_profile(builtin::ZYNQMP_USB_PROFILE).unwrap()),
        ("single_gadget", CandidateSet::presence(["dm_usb_gadget"])),
        ("download_dwc3", CandidateSet::presence(["usb_gadget_download", "usb_dwc3_gadget"])),
    ];

    for (label, candidate) in &profiles {
        group.throughput(Throughput::Elements(candidate.len() as u64));
        group.bench_with_input(BenchmarkId::new("builtin_usb", label), candidate, |b, c| {
            b.iter(|| catalog.resolve(c).unwrap());
        });
    }

    group.bench_function("build_builtin_catalog", |b| {
        b.iter(|| Catalog::builtin().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
