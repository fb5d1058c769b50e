#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use argh::FromArgs;
use nmea_fix::{FixReader, FixStateStore, ParserConfig};

/// Print the current GPS fix from a stream of NMEA 0183 sentences.
#[derive(FromArgs)]
struct Args {
    /// file to read sentences from, stdin if omitted
    #[argh(positional)]
    input: Option<PathBuf>,

    /// discard sentences whose checksum does not match
    #[argh(switch)]
    verify_checksum: bool,
}

fn run(input: Box<dyn BufRead>, config: ParserConfig) -> io::Result<()> {
    let reader = FixReader::with_store(input, FixStateStore::with_config(config));
    for snapshot in reader {
        println!("{}", snapshot?);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = if args.verify_checksum {
        ParserConfig::verifying()
    } else {
        ParserConfig::default()
    };

    let input: Box<dyn BufRead> = match args.input {
        Some(ref path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                error!("Could not open {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    if let Err(e) = run(input, config) {
        error!("Reading sentences failed: {}", e);
        process::exit(1);
    }
}
