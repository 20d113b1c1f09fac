use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use bwe_protocol::rtp::RtpHeader;
use bwe_protocol::sequence::SeqNumber;
use bwe_protocol::{Estimator, PacketRecord};

fn bench_report_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("report_state", |b| {
        let mut estimator = Estimator::new();
        let mut seq = SeqNumber::new(0);
        let mut arrival = 0u64;
        b.iter(|| {
            estimator.report_state(black_box(&PacketRecord::new(seq, arrival, 1200)));
            seq.increment();
            arrival += 1;
        });
    });

    group.bench_function("estimated_bandwidth", |b| {
        let mut estimator = Estimator::new();
        for i in 0..1000u16 {
            estimator.report_state(&PacketRecord::new(SeqNumber::new(i), u64::from(i), 1200));
        }
        b.iter(|| {
            black_box(estimator.estimated_bandwidth());
        });
    });

    group.finish();
}

fn bench_rtp_parse(c: &mut Criterion) {
    let mut packet = vec![0x80, 96, 0x12, 0x34, 0, 0, 0, 1, 0xDE, 0xAD, 0xBE, 0xEF];
    packet.extend_from_slice(&[0u8; 1200]);

    c.bench_function("rtp_header_parse", |b| {
        b.iter(|| {
            let header = RtpHeader::parse(black_box(&packet)).unwrap();
            black_box(header);
        });
    });
}

criterion_group!(benches, bench_report_state, bench_rtp_parse);
criterion_main!(benches);
