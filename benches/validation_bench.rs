//! Benchmarks for registration validation and session ticks
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ehr_dashboard::compliance::{mask, MaskKind};
use ehr_dashboard::registration::{validate_field, Field, RegistrationForm};
use ehr_dashboard::session::{SessionConfig, SessionState};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn bench_validate_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_field");

    let cases = [
        ("email_valid", Field::Email, "sarah.johnson@example.com"),
        ("email_invalid", Field::Email, "sarah.johnson@example"),
        ("phone", Field::Phone, "(555) 123-4567"),
        ("ssn", Field::Ssn, "123-45-6789"),
        ("zip", Field::ZipCode, "12345-6789"),
        ("date_of_birth", Field::DateOfBirth, "1979-03-14"),
    ];

    for (name, field, value) in cases {
        group.bench_function(name, |b| {
            b.iter(|| validate_field(black_box(field), black_box(value), today()))
        });
    }

    group.finish();
}

fn bench_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("form");

    group.bench_function("fill_and_validate_all", |b| {
        b.iter(|| {
            let mut form = RegistrationForm::with_today(today());
            form.on_field_change(Field::FirstName, "Sarah");
            form.on_field_change(Field::LastName, "Johnson");
            form.on_field_change(Field::DateOfBirth, "1979-03-14");
            form.on_field_change(Field::Phone, "(555) 123-4567");
            form.on_field_change(Field::Email, "sarah.johnson@example.com");
            form.on_field_change(Field::ZipCode, "12345");
            form.set_consent(true);
            form.set_privacy_acknowledged(true);
            black_box(form.validate_all())
        })
    });

    group.finish();
}

fn bench_session_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let config = SessionConfig::default();

    group.throughput(Throughput::Elements(config.timeout_secs()));
    group.bench_function("full_countdown", |b| {
        b.iter(|| {
            let mut state = SessionState::new(&config);
            while state.tick().is_some() {}
            black_box(state.snapshot())
        })
    });

    group.finish();
}

fn bench_masking(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask");

    group.bench_function("ssn", |b| {
        b.iter(|| mask(black_box("123-45-6789"), MaskKind::Ssn))
    });
    group.bench_function("email", |b| {
        b.iter(|| mask(black_box("sarah.johnson@example.com"), MaskKind::Email))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_field,
    bench_form,
    bench_session_ticks,
    bench_masking
);
criterion_main!(benches);
