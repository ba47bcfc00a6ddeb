use std::time::Instant;

use crate::board::Board;
use crate::error::EngineError;
use crate::move_generator::{generate, GenType};

pub mod board;
pub mod castling;
pub mod error;
pub mod evaluation;
pub mod move_generator;
pub mod movelist;
pub mod piece;
pub mod search;
pub mod square;
pub mod uci;
pub mod r#move;
mod history;

pub fn perft(depth: u32, fen: Option<String>) -> Result<(), EngineError> {
    println!("perft");
    let mut board = match fen {
        None => Board::new(),
        Some(f) => Board::from_fen(&f)?,
    };
    println!("{}\n", board);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = _perft(&mut board, d);
        let elapsed = start.elapsed();
        println!(
            "{}     {} ({}s, {} nps)",
            d,
            nodes,
            elapsed.as_secs_f32(),
            nodes as f32 / elapsed.as_secs_f32()
        );
    }
    Ok(())
}

fn _perft(board: &mut Board, depth: u32) -> u128 {
    if depth == 0 {
        return 1;
    }
    let moves = generate(board, GenType::Legal);
    if depth == 1 {
        return moves.len() as u128;
    }
    let mut nodes: u128 = 0u128;
    for mv in &moves {
        board.make(*mv);
        nodes += _perft(board, depth - 1);
        board.unmake();
    }
    nodes
}
