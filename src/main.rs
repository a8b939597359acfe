mod board;
mod config;
mod game;
mod render;
mod snake;
mod term;

// Signed so the head can sit one step off-board while a portal exit
// is being resolved.
pub type Coord = i16;
pub type Pos = (Coord, Coord);

fn main() {
    let config = config::GameConfig::standard();
    let game = game::Game::new(config);
    game.run();
}
