//! Interactive lot console.
//!
//! A line-oriented stand-in for a graphical front end: it drives the
//! parking service and redraws the ASCII snapshot after every mutation.
//!
//! Usage:
//!   cargo run --example park_repl
//!   cargo run --example park_repl -- --config configs/large.yaml --log lot.log
//!
//! Commands:
//!   park <vehicle> <gate>    assign the nearest free spot
//!   unpark <vehicle>         release the vehicle's spot
//!   map                      redraw the lot
//!   quit                     exit

use std::io::{self, BufRead, Write};

use clap::Parser;

use vahana_park::{LotConfig, ParkingService, TransactionLog};

/// Interactive parking lot console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lot configuration file path
    #[arg(short, long, default_value = "configs/default.yaml")]
    config: String,

    /// Optional transaction log file (append-only)
    #[arg(short, long)]
    log: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = LotConfig::from_yaml_file(&args.config)?;
    let mut lot = ParkingService::from_config(&config)?;
    if let Some(path) = &args.log {
        lot = lot.with_sink(Box::new(TransactionLog::open(path)?));
    }

    println!("loaded {} ({} spots, {} gates)", args.config, lot.ledger().capacity(), lot.gates().len());
    draw(&lot);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["park", vehicle, gate] if gate.len() == 1 => {
                let gate_id = gate.chars().next().unwrap_or_default().to_ascii_uppercase();
                match lot.park(vehicle, gate_id) {
                    Ok(tx) => {
                        println!("{}", tx);
                        draw(&lot);
                    }
                    Err(err) => println!("error: {}", err),
                }
            }
            ["unpark", vehicle] => match lot.unpark(vehicle) {
                Ok(tx) => {
                    println!("{}", tx);
                    draw(&lot);
                }
                Err(err) => println!("error: {}", err),
            },
            ["map"] => draw(&lot),
            ["quit"] | ["exit"] => break,
            [] => {}
            _ => println!("commands: park <vehicle> <gate> | unpark <vehicle> | map | quit"),
        }
    }
    Ok(())
}

/// Redraw the lot from the read-only query surface.
fn draw(lot: &ParkingService) {
    print!("{}", lot.grid().to_ascii(lot.ledger().occupied()));
    let occupied = lot.ledger().occupied();
    if !occupied.is_empty() {
        let mut entries: Vec<_> = occupied.iter().collect();
        entries.sort();
        for (spot, vehicle) in entries {
            let label = lot.grid().spot_label(*spot).unwrap_or("?");
            println!("  {} spot {} ({})", vehicle, label, spot);
        }
    }
}
