use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use hop_chain::Config;
use hop_chain::HashTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    #[arg(short = 'w', long = "neighborhood", default_value_t = 6)]
    neighborhood: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.8)]
    load_factor: f64,

    /// Reduce every hash modulo this value to provoke chaining.
    #[arg(short = 'c', long = "collide")]
    collide: Option<u64>,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    let config = Config::default()
        .with_neighborhood(args.neighborhood)
        .with_max_load_factor(args.load_factor);
    let mut table: HashTable<u64> = match HashTable::with_config(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!(
        "Filling table with {} u64 values (neighborhood {}, load factor {})",
        args.entries, args.neighborhood, args.load_factor
    );

    for value in 0..args.entries {
        let hash = match args.collide {
            Some(modulus) if modulus > 0 => hash_u64(value) % modulus,
            _ => hash_u64(value),
        };
        table.entry(hash, |&v| v == value).or_insert(value);
    }

    println!("Inserted {} values into table", table.len());
    println!("Final capacity: {} buckets", table.capacity());

    table.print_chain_histogram();
    table.stats().print();
}
