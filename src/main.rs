use std::env;
use std::process;

use log::error;
use pixelpipe::prelude::*;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        println!();
        panic!(
            "Correct usage: $ ./{:?} <strategy> <nthreads> <data dir>",
            args[0]
        );
    }
    let strategy = args[1].parse::<Strategy>().unwrap();
    let threads = args[2].parse::<usize>().unwrap();
    let data_dir = &args[3];

    let config = Configuration::new(strategy, threads, data_dir);
    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
