use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_shogi::action_space::codec::legal_mask;
use plum_shogi::game_state::game_state::BoardState;
use plum_shogi::game_state::shogi_rules::STARTING_POSITION_SFEN;
use plum_shogi::move_generation::perft::perft;
use plum_shogi::utils::self_play_harness::random_reachable_positions;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    sfen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES_QUICK: &[BenchCase] = &[BenchCase {
    name: "startpos",
    sfen: STARTING_POSITION_SFEN,
    expected_nodes: &[30, 900, 25_470],
}];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        sfen: STARTING_POSITION_SFEN,
        expected_nodes: &[30, 900, 25_470, 719_731],
    },
    BenchCase {
        name: "matsuri",
        sfen: "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
        expected_nodes: &[207, 28_684],
    },
];

fn selected_cases() -> &'static [BenchCase] {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_perft(c: &mut Criterion) {
    let suite_name = match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let game = BoardState::from_sfen(case.sfen).expect("benchmark SFEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let mut warmup_game = game.clone();
            let warmup = perft(&mut warmup_game, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);
            let mut bench_game = game.clone();

            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&mut bench_game), black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_legal_mask(c: &mut Criterion) {
    let positions = random_reachable_positions(2024, 64, 120);

    let mut group = c.benchmark_group("legal_mask");
    group.throughput(Throughput::Elements(positions.len() as u64));
    group.bench_function("reachable_64", |b| {
        let mut boards = positions.clone();
        b.iter(|| {
            let mut set = 0usize;
            for board in boards.iter_mut() {
                let mask = legal_mask(black_box(board)).expect("every legal move is encodable");
                set += mask.iter().filter(|flag| **flag).count();
            }
            black_box(set)
        });
    });
    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_legal_mask);
criterion_main!(perft_benches);
