use blast_engine::{Action, Game, GameStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    fn new(seed: u64) -> RandomAgent {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn act(&mut self) -> Option<Action> {
        match self.rng.gen_range(0..10) {
            0 => Some(Action::PlaceBomb),
            1..=8 => {
                let (dx, dy) = match self.rng.gen_range(0..4) {
                    0 => (1.0, 0.0),
                    1 => (-1.0, 0.0),
                    2 => (0.0, 1.0),
                    _ => (0.0, -1.0),
                };
                Some(Action::Move { dx, dy })
            }
            _ => None,
        }
    }
}

fn main() {
    let replay_filename = "/tmp/blast_replay.json".to_string();

    let mut game = Game::new(0, Some(replay_filename));
    let mut agent = RandomAgent::new(0);

    let mut state = game.update(Action::StartGame);
    let mut ticks = 0;

    // One intent and one tick per iteration, as a 60 Hz driver would do.
    while state.status == GameStatus::Playing && ticks < 36_000 {
        if let Some(action) = agent.act() {
            game.update(action);
        }
        state = game.update(Action::Tick);
        ticks += 1;
    }

    game.draw();
    println!(
        "\nFinished after {} ticks with status {:?} and score {}",
        ticks, state.status, state.score
    );
}
