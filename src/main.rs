use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use log::info;

use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};

use max_connect4_ai::{AiPlayer, Board, Player, WIDTH};

mod display;

/// Where the board is saved after each human move in interactive mode
const HUMAN_SAVE_PATH: &str = "human.txt";
/// Where the board is saved after each computer move in interactive mode
const COMPUTER_SAVE_PATH: &str = "computer.txt";

/// Play Max Connect 4 against a minimax agent
#[derive(Parser)]
#[command(name = "max_connect4", about = "Play Max Connect 4 against a minimax agent")]
struct Cli {
    /// Start from an empty board if the input file cannot be read or parsed
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Alternate human and computer moves until the board is full
    Interactive {
        /// Board file to start from
        input: PathBuf,
        /// Who makes the next move
        #[arg(value_enum, ignore_case = true)]
        next: NextPlayer,
        /// Search depth of the computer player
        depth: usize,
    },
    /// Make a single computer move and save the resulting board
    OneMove {
        /// Board file to start from
        input: PathBuf,
        /// Board file to write the result to
        output: PathBuf,
        /// Search depth of the computer player
        depth: usize,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NextPlayer {
    #[value(alias = "c")]
    ComputerNext,
    #[value(alias = "h")]
    HumanNext,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("MAXC4_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();

    match cli.mode {
        Mode::Interactive { input, next, depth } => {
            let board = load_board(&input, cli.lenient)?;
            play_interactive(board, next, depth)
        }
        Mode::OneMove {
            input,
            output,
            depth,
        } => {
            let board = load_board(&input, cli.lenient)?;
            play_one_move(board, &output, depth)
        }
    }
}

fn load_board(path: &Path, lenient: bool) -> Result<Board> {
    if lenient {
        Ok(Board::load_or_empty(path))
    } else {
        Board::load(path).map_err(|err| {
            let problem = if err.is_format_error() {
                "malformed board file"
            } else {
                "could not read board file"
            };
            anyhow::Error::new(err).context(format!("{} {}", problem, path.display()))
        })
    }
}

/// The player controlled from the keyboard in interactive mode
fn human_player(board: &Board, next: NextPlayer) -> Player {
    match next {
        NextPlayer::HumanNext => board.turn(),
        NextPlayer::ComputerNext => board.turn().other(),
    }
}

/// Searches for the computer's move, showing a spinner while it thinks
fn think(ai: &mut AiPlayer, board: &Board) -> Option<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("AI is thinking...");
    spinner.enable_steady_tick(100);

    let (value, best_move) = ai.solve(board);

    spinner.finish_and_clear();
    info!(
        "computer (player {}) chose {:?} with value {} after {} nodes at depth {}",
        ai.player(),
        best_move,
        value,
        ai.node_count,
        ai.depth_limit()
    );
    best_move
}

/// Plays the human's move typed in `input`, saving the board to `save_path`
///
/// Returns whether a move was made; invalid input is reported and leaves the board as is.
fn human_turn(board: &mut Board, input: &str, save_path: &Path) -> Result<bool> {
    let column = match input.trim().parse::<usize>() {
        Err(_) => {
            println!("Invalid number: {}", input.trim());
            return Ok(false);
        }
        Ok(column) => column,
    };
    if let Err(err) = board.play_checked(column) {
        println!("{}", err);
        return Ok(false);
    }
    board
        .save(save_path)
        .with_context(|| format!("saving board to {}", save_path.display()))?;
    Ok(true)
}

/// Plays the computer's move, saving the board to `save_path`
fn computer_turn(ai: &mut AiPlayer, board: &mut Board, save_path: &Path) -> Result<Option<usize>> {
    let column = match think(ai, board) {
        Some(column) => column,
        None => return Ok(None),
    };
    println!("Computer (player {}) plays column {}", ai.player(), column);
    board.play(column);
    board
        .save(save_path)
        .with_context(|| format!("saving board to {}", save_path.display()))?;
    Ok(Some(column))
}

fn play_interactive(mut board: Board, next: NextPlayer, depth: usize) -> Result<()> {
    let human = human_player(&board, next);
    let mut ai = AiPlayer::new(human.other(), depth);

    let stdin = stdin();

    // game loop
    while !board.is_full() {
        display::draw(&board)?;

        if board.turn() == human {
            print!("Enter column to play (0-{}): ", WIDTH - 1);
            stdout().flush()?;

            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                bail!("input closed before the game was over");
            }
            // invalid moves are retried
            human_turn(&mut board, &input_str, Path::new(HUMAN_SAVE_PATH))?;
        } else if computer_turn(&mut ai, &mut board, Path::new(COMPUTER_SAVE_PATH))?.is_none() {
            break;
        }
    }

    // end state
    display::draw(&board)?;
    println!("The game is over.");
    match board.leader() {
        Some(player) if player == human => println!("You win!"),
        Some(player) => println!("Player {} (computer) wins!", player),
        None => println!("Draw!"),
    }
    Ok(())
}

fn play_one_move(mut board: Board, output: &Path, depth: usize) -> Result<()> {
    display::draw(&board)?;

    if board.is_full() {
        println!("The board is full, no move to make.");
    } else {
        let mut ai = AiPlayer::new(board.turn(), depth);
        if computer_turn(&mut ai, &mut board, output)?.is_some() {
            display::draw(&board)?;
            return Ok(());
        }
    }

    board
        .save(output)
        .with_context(|| format!("saving board to {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use max_connect4_ai::Cell;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("max_connect4_{}_{}.txt", name, std::process::id()))
    }

    #[test]
    fn human_plays_the_side_to_move_when_next() -> Result<()> {
        let board = Board::load("test_data/bottom_threat.txt")?;
        assert_eq!(human_player(&board, NextPlayer::HumanNext), Player::Two);
        assert_eq!(human_player(&board, NextPlayer::ComputerNext), Player::One);

        let empty = Board::load("test_data/empty.txt")?;
        assert_eq!(human_player(&empty, NextPlayer::HumanNext), Player::One);
        assert_eq!(human_player(&empty, NextPlayer::ComputerNext), Player::Two);
        Ok(())
    }

    #[test]
    fn one_move_applies_the_move_before_saving() -> Result<()> {
        let output = temp_path("one_move_empty");
        play_one_move(Board::load("test_data/empty.txt")?, &output, 2)?;
        let saved = Board::load(&output)?;
        fs::remove_file(&output)?;

        // columns 1 to 5 tie at depth 2, the leftmost is played
        assert_eq!(saved.num_pieces(), 1);
        assert_eq!(saved.cell(5, 1), Cell::PlayerOne);
        assert_eq!(saved.turn(), Player::Two);

        let output = temp_path("one_move_threat");
        play_one_move(Board::load("test_data/bottom_threat.txt")?, &output, 2)?;
        let saved = Board::load(&output)?;
        fs::remove_file(&output)?;

        assert_eq!(saved.num_pieces(), 7);
        assert_eq!(saved.cell(5, 3), Cell::PlayerTwo);
        assert_eq!(saved.score(Player::Two), 1);
        assert_eq!(saved.turn(), Player::One);
        Ok(())
    }

    #[test]
    fn one_move_saves_full_board_unchanged() -> Result<()> {
        let board = Board::load("test_data/full.txt")?;
        let output = temp_path("one_move_full");
        play_one_move(board.clone(), &output, 3)?;
        let saved = Board::load(&output)?;
        fs::remove_file(&output)?;

        assert_eq!(saved, board);
        Ok(())
    }

    #[test]
    fn turns_save_after_each_move() -> Result<()> {
        let mut board = Board::load("test_data/empty.txt")?;
        let human_path = temp_path("human_turn");
        let computer_path = temp_path("computer_turn");

        // bad input leaves the board alone and writes nothing
        assert!(!human_turn(&mut board, "seven\n", &human_path)?);
        assert!(!human_turn(&mut board, "7\n", &human_path)?);
        assert!(!human_path.exists());

        assert!(human_turn(&mut board, "3\n", &human_path)?);
        assert_eq!(Board::load(&human_path)?, board);
        assert_eq!(board.cell(5, 3), Cell::PlayerOne);

        let mut ai = AiPlayer::new(board.turn(), 1);
        assert_eq!(ai.player(), Player::Two);
        let column = computer_turn(&mut ai, &mut board, &computer_path)?;
        assert!(column.is_some());
        assert_eq!(Board::load(&computer_path)?, board);
        assert_eq!(board.num_pieces(), 2);
        assert_eq!(board.turn(), Player::One);

        fs::remove_file(&human_path)?;
        fs::remove_file(&computer_path)?;
        Ok(())
    }

    #[test]
    fn strict_load_names_the_problem() {
        let err = match load_board(Path::new("test_data/bad_turn.txt"), false) {
            Err(err) => err,
            Ok(board) => panic!("expected a malformed board error, got {:?}", board),
        };
        assert!(err.to_string().starts_with("malformed board file"));

        let err = match load_board(Path::new("test_data/does_not_exist.txt"), false) {
            Err(err) => err,
            Ok(board) => panic!("expected a read error, got {:?}", board),
        };
        assert!(err.to_string().starts_with("could not read board file"));
    }
}
