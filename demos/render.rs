use blast_engine::{Action, Game};

fn main() {
    let mut game = Game::new(42, None);
    game.update(Action::StartGame);
    game.draw();
}
