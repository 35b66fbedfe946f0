#![forbid(unsafe_code)]

//! rwatch demo binary entry point.

use rwatch_demo::{cli, logging, scenario};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_format) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    scenario::run(&opts, |msg| println!("{msg}"));
}
