//! Builds a tree from random keys, knocks it off balance, rebalances it and checks that every
//! traversal still agrees on what's in it.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use rebalance_bst::Tree;

/// Exercise a rebalancing binary search tree with reproducible random keys
#[derive(Parser, Debug)]
#[command(name = "bst-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How many random keys to build the tree from
    #[arg(long, default_value_t = 20)]
    count: u32,

    /// How many random keys to insert afterwards to unbalance it
    #[arg(long, default_value_t = 40)]
    extra: u32,

    /// Added to every extra key so they land to the right of the initial ones
    #[arg(long, default_value_t = 100)]
    offset: u32,

    /// Seed for the key generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the tree diagrams
    #[arg(short, long)]
    print: bool,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Log level picked by the number of `-d` flags.
fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `RUST_LOG` directives win. Without them the `-d` count sets the level.
fn log_filter(verbosity: u8, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(verbosity_level(verbosity).into())
        .parse_lossy(directives.unwrap_or_default())
}

fn setup_logging(verbosity: u8) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbosity, directives.as_deref());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

/// `count` keys drawn from `0..2 * count`, so some of them repeat.
fn random_keys(rng: &mut ChaCha20Rng, count: u32) -> Vec<u32> {
    let max = count.saturating_mul(2).max(1);
    (0..count).map(|_| rng.gen_range(0..max)).collect()
}

/// Errors unless all four traversals hold the same keys.
fn check_traversals(tree: &Tree<u32>) -> Result<()> {
    let mut level = tree.level_order();
    let mut pre = tree.preorder();
    let inorder = tree.inorder();
    let mut post = tree.postorder();
    level.sort_unstable();
    pre.sort_unstable();
    post.sort_unstable();

    ensure!(
        level == inorder && pre == inorder && post == inorder,
        "traversals disagree on the keys in the tree"
    );
    info!(len = inorder.len(), "level order, preorder, inorder and postorder agree");
    Ok(())
}

fn report_balance(tree: &Tree<u32>) {
    if tree.is_balanced() {
        info!(height = tree.height(), "tree is balanced");
    } else {
        warn!(height = tree.height(), "tree is unbalanced");
    }
}

fn join(keys: Vec<&u32>) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn run(cli: &Cli) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(cli.seed);
    debug!(?cli, "starting");

    let mut tree: Tree<u32> = random_keys(&mut rng, cli.count).into_iter().collect();
    report_balance(&tree);
    check_traversals(&tree).context("after building")?;

    let extra = random_keys(&mut rng, cli.extra);
    let rejected = extra
        .into_iter()
        .filter(|key| !tree.insert(key.saturating_add(cli.offset)))
        .count();
    info!(rejected, len = tree.len(), "inserted extra keys");
    report_balance(&tree);

    tree.rebalance();
    report_balance(&tree);
    ensure!(tree.is_balanced(), "rebalancing left the tree unbalanced");
    check_traversals(&tree).context("after rebalancing")?;

    println!("levelorder: {}", join(tree.level_order()));
    println!("  preorder: {}", join(tree.preorder()));
    println!("   inorder: {}", join(tree.inorder()));
    println!(" postorder: {}", join(tree.postorder()));

    if cli.print {
        println!("=== tree");
        print!("{tree}");

        if let Some(root) = tree.root().map(|root| *root.key()) {
            ensure!(tree.delete(&root), "could not delete root {root}");
            ensure!(!tree.contains(&root), "root {root} still present after delete");
            println!("=== deleted root {root}");
            print!("{tree}");
        }

        tree.rebalance();
        println!("=== rebalanced");
        print!("{tree}");
    }
    Ok(())
}
