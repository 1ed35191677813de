use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sz_decoder::{decode_obd2, Obd2Responses, PageId, PageSet, Pid, SensorRecord, SzPageDecoder};

fn poll_cycle(c: &mut Criterion) {
    let pages = PageId::ALL
        .into_iter()
        .fold(PageSet::new(), |set, page| {
            let mut frame = vec![0x5Au8; 64];
            frame[..2].copy_from_slice(&page.response_header());
            set.with_page(page, frame)
        });
    let responses = Obd2Responses::new()
        .with(Pid::CoolantTemp, "83 F1 7A 41 05 5A C3\r\n>")
        .with(Pid::IntakeManifoldPressure, "83 F1 7A 41 0B 65 C4\r\n>")
        .with(Pid::Rpm, "84 F1 7A 41 0C 1A F8 C5\r\n>")
        .with(Pid::Speed, "83 F1 7A 41 0D 32 C6\r\n>")
        .with(Pid::FuelRailPressure, "84 F1 7A 41 23 0B B8 C7\r\n>")
        .with_voltage("12.3V");
    let decoder = SzPageDecoder::default();

    c.bench_function("decode_pages", |b| {
        b.iter(|| {
            let mut record = SensorRecord::new();
            decoder.decode(black_box(&pages), &mut record);
            record
        })
    });

    c.bench_function("decode_obd2", |b| {
        b.iter(|| {
            let mut record = SensorRecord::new();
            decode_obd2(black_box(&responses), &mut record);
            record
        })
    });
}

criterion_group!(benches, poll_cycle);
criterion_main!(benches);
