use std::io::{self, BufRead, Write};

use pawn_chess::game::{Game, Outcome};

/// Next trimmed line from stdin, or None on EOF / read error.
fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        Some(Err(e)) => {
            eprintln!("failed to read input: {e}");
            None
        }
        None => None,
    }
}

fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Pawns-Only Chess");
    println!("First Player's name:");
    let white = read_line(&mut lines).unwrap_or_default();
    println!("Second Player's name:");
    let black = read_line(&mut lines).unwrap_or_default();

    let mut game = Game::with_players(white, black);
    println!("{}", game.board());

    while !game.is_over() {
        println!("{}'s turn:", game.player(game.side_to_move()).name);
        std::io::stdout().flush().ok();

        let input = match read_line(&mut lines) {
            Some(line) if line != "exit" => line,
            _ => break,
        };

        match game.apply(&input) {
            Outcome::IllegalInput { .. } | Outcome::IllegalMove { .. } => println!("Invalid Input"),
            rejected @ Outcome::NoPawnAtSource { .. } => println!("{rejected}"),
            Outcome::Applied | Outcome::InProgress => println!("{}", game.board()),
            over @ Outcome::GameOver { .. } => {
                println!("{}", game.board());
                println!("{over}");
            }
        }
    }

    println!("Bye!");
}
