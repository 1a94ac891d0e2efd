use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use flow_outline::{Document, StateSet, append_task_log, extract_tasks, find_task, set_task_state};

fn large_outline(tasks: usize) -> String {
    let mut text = String::from("#+TITLE: Bench\n\n");
    for i in 0..tasks {
        text.push_str(&format!(
            "* TODO Task {i} :bench:\n:PROPERTIES:\n:ID: task-{i}\n:OWNER: bench\n:END:\n\
             ** Agent Context\nContext for task {i}.\n*** Detail\nMore detail.\n\
             ** Log\n\n- [2026-01-01T00:00:00.000Z] Created.\n\n"
        ));
    }
    text
}

fn parse_benchmark(c: &mut Criterion) {
    let text = large_outline(1_000);
    c.bench_function("Document::parse (1000 tasks)", |b| {
        b.iter(|| Document::parse(black_box(&text)))
    });
}

fn extract_benchmark(c: &mut Criterion) {
    let doc = Document::parse(&large_outline(1_000));
    let states = StateSet::default();

    c.bench_function("extract_tasks (1000 tasks)", |b| {
        b.iter(|| extract_tasks(black_box(&doc), &states))
    });

    // Worst case for lookup: the last task
    c.bench_function("find_task (last of 1000)", |b| {
        b.iter(|| find_task(black_box(&doc), "task-999", &states).unwrap())
    });
}

fn mutate_benchmark(c: &mut Criterion) {
    let doc = Document::parse(&large_outline(1_000));
    let states = StateSet::default();
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();

    c.bench_function("set_task_state (middle of 1000)", |b| {
        b.iter(|| set_task_state(black_box(&doc), "task-500", "DONE", &states).unwrap())
    });

    c.bench_function("append_task_log (middle of 1000)", |b| {
        b.iter(|| append_task_log(black_box(&doc), "task-500", "Benchmark entry", now, &states).unwrap())
    });
}

criterion_group!(benches, parse_benchmark, extract_benchmark, mutate_benchmark);
criterion_main!(benches);
