use merge_2048::engine::{self, Board, Move};
use merge_2048::session::Session;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = Vec::new();
    // Empty and two-tile starts
    boards.push(Board::EMPTY);
    let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    boards.push(b);
    // Derive a variety of densities deterministically
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..20 {
        let dir = seq[i % seq.len()];
        let nb = b.shift(dir);
        if nb != b { b = nb.with_random_tile(&mut rng); }
        boards.push(b);
    }
    boards
}

fn bench_apply_move(c: &mut Criterion) {
    let boards = corpus();
    for dir in Move::ALL {
        c.bench_function(&format!("apply_move/{dir}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u32;
                for &bd in &boards {
                    let (nb, delta) = engine::apply_move(bd, dir);
                    acc = acc.wrapping_add(delta ^ nb.highest_tile());
                }
                black_box(acc)
            })
        });
    }
    c.bench_function("collapse_line", |bch| {
        let lines = [[2, 2, 2, 2], [0, 0, 2, 2], [2, 4, 8, 16], [4, 0, 4, 8]];
        bch.iter(|| {
            let mut acc = 0u32;
            for &l in &lines { acc = acc.wrapping_add(engine::collapse_line(black_box(l)).1); }
            black_box(acc)
        })
    });
}

fn bench_spawn_and_session(c: &mut Criterion) {
    c.bench_function("board/spawn_tile", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, StdRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                for _ in 0..16 { bd = engine::spawn_tile(bd, &mut rng); }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("session/play_64", |bch| {
        bch.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(9);
                let s = Session::start(&mut rng);
                (s, rng)
            },
            |(mut s, mut rng)| {
                for i in 0..64 { s.play(Move::ALL[i % 4], &mut rng); }
                black_box(s.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_has_moves(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("query/has_moves", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for &bd in &boards { acc += engine::has_moves(bd) as usize; }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_apply_move, bench_spawn_and_session, bench_has_moves);
criterion_main!(engine_ops);
