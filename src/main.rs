use docopt::Docopt;
use mazescape::{
    displays::PathOverlay,
    maze::Maze,
    storage,
    units::{Height, Width},
};
use serde_derive::Deserialize;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;

const USAGE: &str = "Mazescape

Usage:
    mazescape_driver
    mazescape_driver -h | --help
    mazescape_driver generate --size=<n> [--save=<name>] [--solve]

Options:
    -h --help      Show this screen.
    --size=<n>     Width and height of the generated maze. Must be odd and at least 3.
    --save=<name>  Write the generated maze to <name>.txt.
    --solve        Also print the maze with its escape route marked.

Run without a command to get the interactive menu.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_generate: bool,
    flag_size: Option<usize>,
    flag_save: Option<String>,
    flag_solve: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazescape::errors::Error, ::mazescape::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_generate {
        run_generate(&args)
    } else {
        run_menu()
    }
}

fn run_generate(args: &DriverArgs) -> Result<()> {
    let size = args.flag_size.ok_or("--size is required for generate")?;
    let maze = Maze::generate(Width(size), Height(size))?;
    println!("{}", maze);

    if args.flag_solve {
        match maze.solve() {
            Some(route) => println!("{}", PathOverlay::new(&maze, &route)),
            None => println!("No escape route found."),
        }
    }

    if let Some(ref name) = args.flag_save {
        let path = maze_file_path(name);
        storage::save(&maze, &path)
            .chain_err(|| format!("failed to save the maze to {}", path.display()))?;
    }

    Ok(())
}

/// Maze files always carry a .txt suffix; the user only deals in names.
fn maze_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.txt", name))
}

fn run_menu() -> Result<()> {
    let stdin = io::stdin();
    let mut session: Option<Maze> = None;

    loop {
        print_menu(session.is_some());
        let command = read_trimmed_line(&stdin)?;

        match command.as_str() {
            "0" => return Ok(()),
            "1" => {
                println!("Enter the size of a new maze");
                let size: usize = match read_trimmed_line(&stdin)?.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("Incorrect option. Please try again");
                        continue;
                    }
                };
                match Maze::generate(Width(size), Height(size)) {
                    Ok(maze) => {
                        println!("{}", maze);
                        session = Some(maze);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "2" => {
                println!("Enter the maze name");
                let name = read_trimmed_line(&stdin)?;
                // on any load failure the current maze stays as it was
                match storage::load(&maze_file_path(&name)) {
                    Ok(maze) => session = Some(maze),
                    Err(e) => println!("{}", e),
                }
            }
            "3" if session.is_some() => {
                println!("Enter the maze name");
                let name = read_trimmed_line(&stdin)?;
                let maze = session.as_ref().expect("guarded by the match arm");
                if let Err(e) = storage::save(maze, &maze_file_path(&name)) {
                    println!("{}", e);
                }
            }
            "4" if session.is_some() => {
                println!("{}", session.as_ref().expect("guarded by the match arm"));
            }
            "5" if session.is_some() => {
                let maze = session.as_ref().expect("guarded by the match arm");
                match maze.solve() {
                    Some(route) => println!("{}", PathOverlay::new(maze, &route)),
                    None => println!("No escape route found."),
                }
            }
            _ => println!("Incorrect option. Please try again"),
        }
    }
}

fn print_menu(have_maze: bool) {
    println!("=== Menu ===");
    println!("1. Generate a new maze.");
    println!("2. Load a maze.");
    if have_maze {
        println!("3. Save the maze.");
        println!("4. Display the maze.");
    }
    println!("5. Find the escape.");
    println!("0. Exit.");
}

fn read_trimmed_line(stdin: &io::Stdin) -> Result<String> {
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
