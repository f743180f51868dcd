use std::io;

use pawnstorm::engine::Engine;

fn main() -> anyhow::Result<()> {
    pawnstorm::print_engine_info();
    pawnstorm::print_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = Engine::new(&mut input, &mut output);
    engine.command_loop()
}
