use criterion::{Criterion, criterion_group, criterion_main};
use hid_generic::{MultiplierState, SinkEvent, scale_event};
use hid_report_model::usages::{CP_AC_PAN, GD_RESOLUTION_MULTIPLIER, GD_WHEEL};
use hid_report_model::{Report, ReportDescriptor, Usage};

fn descriptor() -> ReportDescriptor {
    ReportDescriptor::new()
        .with_report(
            Report::input(1)
                .with_field(Usage::new(GD_WHEEL, 3), -127, 127)
                .with_field(Usage::new(CP_AC_PAN, 5), -127, 127),
        )
        .with_report(
            Report::feature(2)
                .with_field(Usage::new(GD_RESOLUTION_MULTIPLIER, 3), 0, 15)
                .with_field(Usage::new(GD_RESOLUTION_MULTIPLIER, 5), 0, 15),
        )
}

fn benchmark_discovery(c: &mut Criterion) {
    let desc = descriptor();
    c.bench_function("MultiplierState discover", |b| {
        b.iter(|| std::hint::black_box(MultiplierState::discover(std::hint::black_box(&desc))));
    });
}

fn benchmark_scale_event(c: &mut Criterion) {
    let state = MultiplierState::discover(&descriptor());
    let mut events: Vec<SinkEvent> = Vec::with_capacity(3);

    c.bench_function("scale_event wheel", |b| {
        b.iter(|| {
            events.clear();
            scale_event(&state, GD_WHEEL, std::hint::black_box(-1), &mut events);
            std::hint::black_box(&events);
        });
    });
}

criterion_group!(benches, benchmark_discovery, benchmark_scale_event);
criterion_main!(benches);
