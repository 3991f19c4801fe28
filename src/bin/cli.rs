use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use csvquery::{parse, ExecutionEngine, LoaderOptions, QueryResultSet};

#[derive(Parser)]
#[command(author, version, about = "csvq - run FROM/SELECT/WHERE queries against delimited text files")]
struct Cli {
    /// Field delimiter of the data files
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Keep whitespace around unquoted fields
    #[arg(long)]
    no_trim: bool,

    /// Directory that relative FROM paths are resolved against
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// How results are printed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Shell history file
    #[arg(long, default_value = ".csvq_history")]
    history_file: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Execute a query given on the command line
    Query {
        /// Query text
        query: String,
    },

    /// Execute a query read from a file
    Run {
        /// File holding the query; it may span several lines
        file: PathBuf,
    },

    /// Print the parsed form of a query without loading any data
    Parse {
        /// Query text
        query: String,
    },
}

impl Cli {
    fn engine(&self) -> ExecutionEngine {
        let options = LoaderOptions {
            delimiter: self.delimiter,
            trim: !self.no_trim,
            ..LoaderOptions::default()
        };
        let engine = ExecutionEngine::new(options);
        match &self.data_dir {
            Some(dir) => engine.with_data_dir(dir),
            None => engine,
        }
    }
}

fn run_query(engine: &ExecutionEngine, query: &str, format: OutputFormat) -> Result<()> {
    let result = engine.execute_query(query)?;
    display_result(&result, format)
}

fn display_result(result: &QueryResultSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", result.to_string_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

fn print_parsed(query: &str, format: OutputFormat) -> Result<()> {
    let ast = parse(query)?;
    match format {
        OutputFormat::Table => {
            println!("{}", ast);
            println!("{:#?}", ast);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ast)?),
    }
    Ok(())
}

fn run_shell(engine: &ExecutionEngine, cli: &Cli) -> Result<()> {
    println!("csvq shell. Type 'help' for assistance or 'exit' to quit.");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(&cli.history_file) {
        if !matches!(&err, ReadlineError::Io(io) if io.kind() == std::io::ErrorKind::NotFound) {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("csvq> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => print_help(),
                    _ => {
                        if let Err(err) = run_query(engine, line, cli.format) {
                            println!("Error: {}", err);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(&cli.history_file) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Query syntax (keywords are upper case):");
    println!("  FROM \"<file>\" SELECT <col>[, <col>...] | *");
    println!("      [WHERE <col> <op> <number|\"text\"> [AND|OR ...]]");
    println!("      [ORDER BY <col> [ASC|DESC]]");
    println!("      [LIMIT <n>]");
    println!();
    println!("Operators: = != < <= > >=");
    println!("  AND and OR are applied strictly left to right; there are no parentheses.");
    println!("  Number literals compare numerically; values that are not numbers never match.");
    println!("  Text literals compare as exact, case-sensitive text.");
    println!();
    println!("Other commands:");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine = cli.engine();

    match &cli.command {
        Some(Commands::Query { query }) => run_query(&engine, query, cli.format),
        Some(Commands::Run { file }) => {
            let query = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read query file {}", file.display()))?;
            run_query(&engine, &query, cli.format)
        }
        Some(Commands::Parse { query }) => print_parsed(query, cli.format),
        // Default to shell if no command is specified
        Some(Commands::Shell) | None => run_shell(&engine, &cli),
    }
}
