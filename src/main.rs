use std::env;
use std::process;

use produce_tally::config::read_config;
use produce_tally::menu;
use produce_tally::FrequencyTable;

const DEFAULT_INPUT_FILE: &str = "CS210_Project_Three_Input_File.txt";
const DEFAULT_OUTPUT_FILE: &str = "frequency.dat";
const DEFAULT_CONFIG_FILE: &str = "config.json";

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() > 4 {
        eprintln!(
            "Usage: {} [input_file] [output_file] [config_file]",
            args[0]
        );
        process::exit(1);
    }

    let input_file = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT_FILE);
    let output_file = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT_FILE);
    let config_file = args.get(3).map(String::as_str).unwrap_or(DEFAULT_CONFIG_FILE);

    let config = match read_config(config_file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut table = FrequencyTable::with_config(input_file, output_file, &config);
    if let Err(err) = table.ingest_source() {
        eprintln!("{}", err);
        process::exit(1);
    }

    if let Err(err) = menu::run(&table) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
