use std::io::{self, BufRead, Write};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TallyError;
use crate::histogram::render_histogram;
use crate::table::{FrequencyTable, LookupOutcome};

lazy_static! {
    static ref CHOICE_FILTER: Regex = Regex::new(r"^\d+$").unwrap();
    static ref ITEM_FILTER: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
}

pub fn validate_choice(input: &str) -> Option<u32> {
    if CHOICE_FILTER.is_match(input) {
        input.parse().ok()
    } else {
        None
    }
}

pub fn validate_item(input: &str) -> Option<&str> {
    if ITEM_FILTER.is_match(input) {
        Some(input)
    } else {
        None
    }
}

/// Upcases the first letter so typed names match the title-cased records.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_menu() {
    println!("Welcome to the Corner Grocer Produce Manager!");
    println!("Please choose from the following options: ");
    println!("1: View All Items With Quantity Sold Today");
    println!("2: View Amount Sold of Specific Item");
    println!("3: View Graph of All Items Sold Today");
    println!("4: Exit");
}

fn clear_screen() {
    for _ in 0..40 {
        println!();
    }
}

fn stdin_error(err: io::Error) -> TallyError {
    TallyError::SourceUnavailable {
        label: "stdin".to_string(),
        source: err,
    }
}

/// Reads one trimmed line from stdin. `None` means the input stream is
/// closed, which the menu treats as a request to exit.
fn read_line() -> Result<Option<String>, TallyError> {
    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(stdin_error)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn pause() -> Result<(), TallyError> {
    print!("Press Enter to continue...");
    io::stdout().flush().map_err(stdin_error)?;
    read_line()?;
    Ok(())
}

fn prompt_choice() -> Result<Option<u32>, TallyError> {
    loop {
        print!("Please choose an option (1, 2, 3, or 4): ");
        io::stdout().flush().map_err(stdin_error)?;
        let input = match read_line()? {
            Some(input) => input,
            None => return Ok(None),
        };
        match validate_choice(&input) {
            Some(choice) if (1..=4).contains(&choice) => return Ok(Some(choice)),
            Some(_) | None => {
                eprintln!("Invalid input: not a valid option!");
                eprintln!("Invalid option chosen. Please choose a listed option. (1, 2, 3, or 4)");
            }
        }
    }
}

fn check_single_item(table: &FrequencyTable) -> Result<(), TallyError> {
    loop {
        clear_screen();
        print!("Please enter the name of an item to see quantity sold today ('quit' to quit): ");
        io::stdout().flush().map_err(stdin_error)?;
        let input = match read_line()? {
            Some(input) => input,
            None => return Ok(()),
        };
        let input = match validate_item(&input) {
            Some(input) => input,
            None => {
                eprintln!("Invalid input: Please enter an item name!");
                continue;
            }
        };
        if table.lookup(input) == LookupOutcome::QuitRequested {
            clear_screen();
            return Ok(());
        }
        let item_name = capitalize_first(input);
        match table.lookup(&item_name) {
            LookupOutcome::Found(quantity) => {
                println!(" ======================= ");
                println!("|{:<12}\t{:>8}|", item_name, quantity);
                println!(" ----------------------- ");
                pause()?;
                clear_screen();
                return Ok(());
            }
            LookupOutcome::NotFound | LookupOutcome::QuitRequested => {
                println!("\"{}\" not found in today's sales!", item_name);
                pause()?;
            }
        }
    }
}

/// The menu loop. Ingest has already happened; every option reads the
/// table's current state.
pub fn run(table: &FrequencyTable) -> Result<(), TallyError> {
    loop {
        print_menu();
        let choice = match prompt_choice()? {
            Some(choice) => choice,
            None => return Ok(()),
        };
        match choice {
            1 => {
                print!("{}", table.report());
                pause()?;
                clear_screen();
            }
            2 => check_single_item(table)?,
            3 => {
                let location = table.persist()?;
                println!("File Name: {}", table.sink_label());
                println!("Wrote to Location: {}", location.display());
                clear_screen();
                print!("{}", render_histogram(table.sink_label())?);
                pause()?;
                clear_screen();
            }
            _ => return Ok(()),
        }
    }
}
