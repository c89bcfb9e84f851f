use std::process;

use sobra_core::cli::run_cli;

fn main() {
    sobra_core::init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
