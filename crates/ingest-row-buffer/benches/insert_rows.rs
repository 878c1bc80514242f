use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ingest_row_buffer::{
    Allocator, ColumnDescriptor, ColumnLogicalType as L, ColumnPhysicalType as P, OwningChannel,
    RowBuffer, RowBufferConfig, RowValue, channel::UnboundedAllocator,
};

struct BenchChannel {
    allocator: Arc<UnboundedAllocator>,
    sequencer: AtomicI64,
    offset_token: Mutex<Option<String>>,
}

impl BenchChannel {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            allocator: Arc::new(UnboundedAllocator::default()),
            sequencer: AtomicI64::new(0),
            offset_token: Mutex::new(None),
        })
    }
}

impl OwningChannel for BenchChannel {
    fn allocator(&self) -> Arc<dyn Allocator> {
        self.allocator.clone()
    }

    fn fully_qualified_name(&self) -> &str {
        "bench.schema.channel"
    }

    fn increment_and_get_row_sequencer(&self) -> i64 {
        self.sequencer.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn offset_token(&self) -> Option<String> {
        self.offset_token.lock().unwrap().clone()
    }

    fn set_offset_token(&self, token: String) {
        *self.offset_token.lock().unwrap() = Some(token);
    }
}

fn mixed_row(i: i64) -> Vec<(String, RowValue)> {
    vec![
        ("ID".to_string(), RowValue::Int(i)),
        ("AMOUNT".to_string(), RowValue::String(format!("{i}.50"))),
        ("LABEL".to_string(), RowValue::String(format!("row-{i}"))),
    ]
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_rows");

    for &batch_size in &[100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    let channel = BenchChannel::new();
                    let buffer = RowBuffer::new(channel, RowBufferConfig::default());
                    buffer
                        .setup_schema(&[
                            ColumnDescriptor::new("id", L::Fixed, P::Sb4)
                                .with_precision_scale(9, 0),
                            ColumnDescriptor::new("amount", L::Fixed, P::Sb16)
                                .with_precision_scale(18, 2),
                            ColumnDescriptor::new("label", L::Text, P::Lob),
                        ])
                        .unwrap();

                    let rows = (0..batch_size as i64).map(mixed_row);
                    buffer.insert_rows(rows, Some("bench".to_string())).unwrap();

                    black_box(buffer.flush().unwrap());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_insert_rows);
criterion_main!(benches);
