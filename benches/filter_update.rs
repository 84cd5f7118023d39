//! Criterion benchmarks for per-frame filtering.
//!
//! Run with: cargo bench
//! Run one group: cargo bench -- update

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use joint_smoothing::{
    analyze_smoothing, BodyFrame, JointType, SmoothingFilter, SmoothingParams, TrackingState, Vec3,
};

// =============================================================================
// Helpers
// =============================================================================

/// A frame with `tracked` of `body_count` bodies fully tracked.
fn make_frame(body_count: usize, tracked: usize, tick: usize) -> BodyFrame {
    let mut frame = BodyFrame::skeleton(body_count);
    for (b, body) in frame.bodies.iter_mut().enumerate().take(tracked) {
        body.is_tracked = true;
        for joint in JointType::ALL {
            let phase = (tick + b * 7 + joint.index()) as f64 * 0.1;
            let jitter = if tick % 2 == 0 { 0.005 } else { -0.005 };
            body.set_joint(
                joint.index(),
                TrackingState::Tracked,
                Vec3::new(phase.sin() + jitter, phase.cos(), 0.1),
            );
        }
    }
    frame
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for tracked in [1usize, 2, 6] {
        let frames: Vec<BodyFrame> = (0..64).map(|t| make_frame(6, tracked, t)).collect();

        group.bench_with_input(BenchmarkId::new("bodies", tracked), &frames, |b, frames| {
            let mut filter =
                SmoothingFilter::with_layout(SmoothingParams::default(), 6, JointType::COUNT);
            let mut scratch = frames[0].clone();
            let mut i = 0;
            b.iter(|| {
                scratch.clone_from(&frames[i % frames.len()]);
                filter.update(black_box(&mut scratch));
                i += 1;
            });
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let raw: Vec<Vec3> = (0..256)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            Vec3::new(0.5 + 0.01 * sign, 0.2, 0.0)
        })
        .collect();
    let mut filter = SmoothingFilter::with_layout(SmoothingParams::default(), 1, 1);
    let filtered: Vec<Vec3> = raw
        .iter()
        .map(|&v| {
            let mut frame = BodyFrame::new(1, 1);
            frame.bodies[0].is_tracked = true;
            frame.bodies[0].set_joint(0, TrackingState::Tracked, v);
            filter.update(&mut frame);
            frame.bodies[0].joints[0].velocity
        })
        .collect();

    c.bench_function("analyze_smoothing_256", |b| {
        b.iter(|| analyze_smoothing(black_box(&raw), black_box(&filtered)));
    });
}

criterion_group!(benches, bench_update, bench_analysis);
criterion_main!(benches);
