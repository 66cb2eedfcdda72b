//! Builds a tree from random keys, unbalances it with large keys, and rebalances it, printing
//! the tree's shape along the way.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bst::generator::{random_keys, random_keys_with, GeneratorError};
use bst::owned::Tree;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// How many random keys to seed the tree with. Duplicates are dropped.
    #[arg(short, long, default_value_t = 15)]
    size: usize,

    /// Seed keys are drawn from `[0, max)`.
    #[arg(short, long, default_value_t = 100)]
    max: u32,

    /// Keys inserted after construction. Keys at or above `max` unbalance the tree.
    #[arg(short, long = "insert", default_values_t = [150, 200, 250, 300])]
    inserts: Vec<u32>,

    /// Seed for the key generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn print_traversals(tree: &Tree<u32>) {
    println!("Level Order: {:?}", tree.level_order());
    println!("Pre Order: {:?}", tree.pre_order());
    println!("In Order: {:?}", tree.in_order());
    println!("Post Order: {:?}", tree.post_order());
}

fn main() -> Result<(), GeneratorError> {
    pretty_env_logger::init();
    let args = Args::parse();
    log::debug!("{:?}", args);

    let keys = match args.seed {
        Some(seed) => random_keys_with(&mut StdRng::seed_from_u64(seed), args.size, args.max)?,
        None => random_keys(args.size, args.max)?,
    };
    let mut tree = Tree::from_values(keys);

    println!("Is the tree balanced? {}", tree.is_balanced());
    print_traversals(&tree);

    for key in args.inserts {
        if !tree.insert(key) {
            log::info!("{} is already in the tree", key);
        }
    }
    println!(
        "Is the tree balanced after inserting more keys? {}",
        tree.is_balanced()
    );

    tree.rebalance();
    println!(
        "Is the tree balanced after rebalancing? {}",
        tree.is_balanced()
    );
    print_traversals(&tree);

    tree.pretty_print();
    Ok(())
}
