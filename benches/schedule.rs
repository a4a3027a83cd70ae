use chrono::DateTime;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cron_cursor::{CronCursor, Direction, Schedule};

const EXPRESSIONS: &[&str] = &[
    "* * * * * *",
    "0 0 * * * *",
    "0 0 0 1,15 * ?",
    "0 0 0 ? * MON-FRI",
    "0 0 0 L */3 ?",
    "0 30 9 1 JAN-DEC 1",
];

const NOW: &[&str] = &["1999-12-31T23:59:59Z", "2000-01-01T00:00:00Z", "2099-12-31T23:59:59Z"];
const TAKE_SAMPLES: usize = 1_000;

pub fn new_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("new");
    for expression in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(expression), expression, |b, e| {
            b.iter(|| Schedule::new(*e).unwrap())
        });
    }
    group.finish();
}

pub fn seek_benchmark(c: &mut Criterion) {
    for direction in [Direction::Forward, Direction::Backward] {
        let mut group = c.benchmark_group(format!("seek/{direction:?}"));
        for expression in EXPRESSIONS {
            for now_str in NOW {
                let now = DateTime::parse_from_rfc3339(now_str).unwrap();
                let schedule = Schedule::new(*expression).unwrap();
                group.bench_with_input(
                    BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                    &(now, &schedule),
                    |b, (now, schedule)| b.iter(|| schedule.seek(now, direction, None)),
                );
            }
        }
        group.finish();
    }
}

pub fn upcoming_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("upcoming");
    for expression in EXPRESSIONS {
        for now_str in NOW {
            let now = DateTime::parse_from_rfc3339(now_str).unwrap();
            let schedule = Schedule::new(*expression).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                &(now, schedule),
                |b, (now, schedule)| {
                    b.iter(|| {
                        CronCursor::from_schedule(schedule.clone(), now, Default::default())
                            .upcoming()
                            .take(TAKE_SAMPLES)
                            .count()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, new_benchmark, seek_benchmark, upcoming_benchmark);
criterion_main!(benches);
