//! Terminal front end for the engine: renders the board, prompts for moves
//! as two coordinate pairs ("04 06" is file 0 rank 4 to file 0 rank 6),
//! and writes the applied-move log to a JSON file when the game ends.
//!
//! Everything here is a swappable collaborator; the rules live in the
//! library.

use grid_chess::{Coord, Game, MoveCategory, PieceKind, Side};
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::fs;
use std::io::{self, Write};

const MOVE_LOG_FILENAME: &str = "chess_moves.json";

lazy_static! {
    // Two digit pairs separated by a space; each digit is a file or rank.
    static ref MOVE_INPUT: Regex = Regex::new(r"^([0-7])([0-7]) ([0-7])([0-7])$").unwrap();
}

/// Parses a trimmed `"ff rr"` input line into start and end coordinates.
fn parse_move_input(input: &str) -> Option<(Coord, Coord)> {
    let caps = MOVE_INPUT.captures(input)?;
    let digit = |i: usize| caps[i].parse::<i8>().expect("regex matched a digit");
    Some((
        Coord::new(digit(1), digit(2)),
        Coord::new(digit(3), digit(4)),
    ))
}

/// Reads one move from stdin, re-prompting until the format is valid.
/// Returns `None` on end of input.
fn prompt_move(side: Side) -> io::Result<Option<(Coord, Coord)>> {
    loop {
        print!("{:?} player: ", side);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_move_input(trimmed) {
            Some(pair) => return Ok(Some(pair)),
            None => println!(
                "Invalid input. Enter your move as __ __ where _ is a digit 0-7, \
                 e.g. 04 06."
            ),
        }
    }
}

/// Asks for the promotion piece. Returns `None` on end of input.
fn prompt_promotion() -> io::Result<Option<PieceKind>> {
    loop {
        print!("Promote pawn to? (q=Queen, r=Rook, b=Bishop, n=Knight): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().to_lowercase().chars().next() {
            Some('q') => return Ok(Some(PieceKind::Queen)),
            Some('r') => return Ok(Some(PieceKind::Rook)),
            Some('b') => return Ok(Some(PieceKind::Bishop)),
            Some('n') => return Ok(Some(PieceKind::Knight)),
            _ => println!("Invalid choice. Please enter q, r, b, or n."),
        }
    }
}

/// A pawn arriving on its last rank needs a promotion choice up front.
fn needs_promotion_choice(game: &Game, start: Coord, end: Coord) -> bool {
    game.snapshot()
        .piece_at(start)
        .map_or(false, |p| p.kind == PieceKind::Pawn && end.rank == p.side.last_rank())
}

fn save_move_log(game: &Game) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(game.history())?;
    fs::write(MOVE_LOG_FILENAME, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_input_parses_to_coordinates() {
        assert_eq!(
            parse_move_input("04 06"),
            Some((Coord::new(0, 4), Coord::new(0, 6)))
        );
        assert_eq!(
            parse_move_input("71 73"),
            Some((Coord::new(7, 1), Coord::new(7, 3)))
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(parse_move_input("0406"), None);
        assert_eq!(parse_move_input("04  06"), None);
        assert_eq!(parse_move_input("08 06"), None);
        assert_eq!(parse_move_input("a4 06"), None);
        assert_eq!(parse_move_input(""), None);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("==================");
    println!("|   Grid Chess   |");
    println!("==================");
    println!("Moves are entered as \"ff rr\" coordinate pairs, e.g. 04 06.");

    let mut game = Game::new();

    'game_loop: while game.winner().is_none() {
        println!("------------------------------------------");
        print!("{}", game.snapshot());
        let side = game.side_to_move();
        if game.is_in_check(side) {
            println!("{:?} is in check!", side);
        }

        let (start, end) = match prompt_move(side)? {
            Some(pair) => pair,
            None => {
                println!("\nEnd of input. Quitting game.");
                break 'game_loop;
            }
        };

        let promotion = if needs_promotion_choice(&game, start, end) {
            match prompt_promotion()? {
                Some(kind) => Some(kind),
                None => {
                    println!("\nEnd of input. Quitting game.");
                    break 'game_loop;
                }
            }
        } else {
            None
        };

        match game.apply_move(start, end, promotion) {
            Ok(category) => {
                if category == MoveCategory::Castle {
                    println!("Castled.");
                }
                game.advance_turn();
            }
            Err(reason) => println!("{}", reason),
        }
    }

    if let Some(winner) = game.winner() {
        println!("------------------------------------------");
        print!("{}", game.snapshot());
        println!("Game over. {:?} player wins!", winner);
    }

    println!("Saving move log to '{}'...", MOVE_LOG_FILENAME);
    if let Err(e) = save_move_log(&game) {
        eprintln!("Error: failed to save move log: {}", e);
    }
    Ok(())
}
