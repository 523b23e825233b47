use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use pommer_core::model::cell;
use pommer_core::{AgentId, BoardSnapshot, Grid, ItemKind, Position, StateEstimator};

const SIZE: usize = 11;

/// A scripted episode: agents sweep their rows, agent 0 pausing every other
/// tick and laying a bomb every ten.
fn episode(ticks: u32) -> Vec<BoardSnapshot> {
    let mut bombs: Vec<(Position, u8)> = Vec::new();
    let mut frames = Vec::with_capacity(ticks as usize);
    for step in 0..ticks {
        for bomb in &mut bombs {
            bomb.1 -= 1;
        }
        bombs.retain(|(_, life)| *life > 0);

        let mut board = Grid::<u8>::new(SIZE, SIZE);
        let mut life = Grid::<u8>::new(SIZE, SIZE);
        let mut blast = Grid::<u8>::new(SIZE, SIZE);
        for col in (0..SIZE).step_by(3) {
            board.set(Position::new(SIZE - 1, col), ItemKind::ALL[col % 3].code());
        }

        let lead = Position::new(0, (step as usize / 2) % SIZE);
        if step % 10 == 1 {
            bombs.push((lead, 9));
        }
        for (position, remaining) in &bombs {
            board.set(*position, cell::BOMB);
            life.set(*position, *remaining);
            blast.set(*position, 2);
        }

        board.set(lead, AgentId(0).code());
        for id in 1..4u8 {
            let col = (step as usize + usize::from(id)) % SIZE;
            board.set(Position::new(2 * usize::from(id), col), AgentId(id).code());
        }
        let alive = (0..4u8).map(AgentId);
        if let Ok(snapshot) = BoardSnapshot::new(board, life, blast, alive, step) {
            frames.push(snapshot);
        }
    }
    frames
}

fn bench_estimator_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator_tick");
    for ticks in [50u32, 200, 800] {
        let frames = episode(ticks);
        group.bench_function(format!("episode_{ticks}_ticks"), |b| {
            b.iter_batched(
                StateEstimator::default,
                |mut estimator| {
                    for frame in &frames {
                        let _ = black_box(estimator.observe(frame));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_estimator_tick);
criterion_main!(benches);
