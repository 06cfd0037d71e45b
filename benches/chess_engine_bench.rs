//! Chess Engine Benchmarks
//!
//! Performance benchmarks for move generation, check detection and the
//! checkmate test using Criterion.

use chess_engine::legality::{is_checkmate, legal_moves_for};
use chess_engine::move_gen::{generate_for_color, is_attacked};
use chess_engine::{Board, CastlingRights, Color, MoveContext, Orientation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn context<'a>(board: &'a Board, rights: &'a CastlingRights) -> MoveContext<'a> {
    MoveContext {
        board,
        orientation: Orientation::Normal,
        rights,
        in_check: None,
    }
}

fn midgame_board() -> Board {
    Board::from_rows([
        "r..q.rk.", "pp..bppp", "..n.pn..", "...p....", "...P....", "..NBPN..", "PP...PPP",
        "R..Q.RK.",
    ])
    .unwrap_or_default()
}

fn bench_move_generation_starting(c: &mut Criterion) {
    let board = Board::standard(Orientation::Normal);
    let rights = CastlingRights::default();
    let ctx = context(&board, &rights);

    c.bench_function("generate_moves_starting_position", |b| {
        b.iter(|| black_box(generate_for_color(&ctx, Color::White)))
    });
}

fn bench_move_generation_midgame(c: &mut Criterion) {
    let board = midgame_board();
    let rights = CastlingRights::default();
    let ctx = context(&board, &rights);

    c.bench_function("generate_moves_both_colors_midgame", |b| {
        b.iter(|| {
            let white = generate_for_color(&ctx, Color::White);
            let black = generate_for_color(&ctx, Color::Black);
            black_box((white.len(), black.len()))
        })
    });
}

fn bench_check_detection(c: &mut Criterion) {
    let board = midgame_board();
    let rights = CastlingRights::default();
    let ctx = context(&board, &rights);

    c.bench_function("is_attacked_midgame", |b| {
        b.iter(|| black_box(is_attacked(&ctx, Color::White)))
    });
}

fn bench_legality_filter(c: &mut Criterion) {
    let board = midgame_board();
    let rights = CastlingRights::default();
    let ctx = context(&board, &rights);

    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| black_box(legal_moves_for(&ctx, Color::White)))
    });

    c.bench_function("is_checkmate_midgame", |b| {
        b.iter(|| black_box(is_checkmate(&ctx, Color::Black)))
    });
}

criterion_group!(
    benches,
    bench_move_generation_starting,
    bench_move_generation_midgame,
    bench_check_detection,
    bench_legality_filter,
);
criterion_main!(benches);
