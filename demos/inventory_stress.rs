//! Hammers one inventory from several threads and prints where everything ended up.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use clap::Parser;
use inventory_lib::{Inventory, InventoryError, Stack};

#[derive(Parser)]
#[command(name = "inventory-stress")]
struct Args {
    /// Number of slots in the inventory.
    #[arg(long, default_value_t = 9)]
    slots: usize,
    /// Number of worker threads.
    #[arg(long, default_value_t = 4)]
    threads: u16,
    /// Operations per worker.
    #[arg(long, default_value_t = 1000)]
    rounds: u16,
    /// Distinct item types to shuffle around.
    #[arg(long, default_value_t = 3)]
    items: u16,
}

fn main() {
    let args = Args::parse();
    if args.slots == 0 || args.items == 0 {
        eprintln!("--slots and --items must be at least 1");
        std::process::exit(2);
    }

    let writes = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&writes);
    let inventory = Arc::new(Inventory::with_on_change(args.slots, move |_, _: &Stack| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    let full = Arc::new(AtomicU64::new(0));
    let short = Arc::new(AtomicU64::new(0));

    let handles: Vec<_> = (0..args.threads)
        .map(|worker| {
            let inventory = Arc::clone(&inventory);
            let full = Arc::clone(&full);
            let short = Arc::clone(&short);
            let items = args.items;
            let rounds = args.rounds;
            thread::spawn(move || {
                for round in 0..rounds {
                    let item = 1 + worker.wrapping_add(round) % items;
                    let mut handful = Stack::new(item, 1 + round % 100);
                    // odd rounds only move part of the handful; the split-off half is dropped
                    if round % 2 == 1 {
                        let _dropped = handful.split(handful.item_count / 2);
                    }
                    let result = if round % 3 == 2 {
                        inventory.remove(handful)
                    } else {
                        inventory.add(handful)
                    };
                    match result {
                        Err(InventoryError::InsufficientCapacity { .. }) => {
                            full.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(InventoryError::InsufficientQuantity { .. }) => {
                            short.fetch_add(1, Ordering::Relaxed);
                        }
                        _ => {}
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker panicked");
            std::process::exit(1);
        }
    }
    inventory.close();

    println!("slots: {inventory}");
    println!(
        "slot writes: {}, inventory full: {}, not enough items: {}",
        writes.load(Ordering::Relaxed),
        full.load(Ordering::Relaxed),
        short.load(Ordering::Relaxed)
    );
}
