use clap::Parser;

use reach_bdd::bdd::BddConfig;
use reach_bdd::reach::Reachability;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of counter bits.
    #[arg(value_name = "INT", default_value = "4")]
    bits: usize,

    /// Count with a step of `2^skip` (the low bits never change).
    #[clap(long, value_name = "INT", default_value = "0")]
    skip: usize,

    /// BDD size (in bits, so the initial capacity is `2^size` nodes).
    #[clap(long, value_name = "INT", default_value = "16")]
    size: usize,

    /// Print the reachable state set as a Mermaid diagram.
    #[clap(long)]
    mermaid: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = BddConfig {
        storage_bits: args.size,
        ..BddConfig::default()
    };
    let mut reach = Reachability::with_config(args.bits, 0, &config)?;

    // Ripple-carry increment, starting the carry at bit `skip`
    let states = reach.states().to_vec();
    let bdd = reach.bdd();
    let mut carry = bdd.zero();
    let mut fns = Vec::with_capacity(args.bits);
    for (i, &bit) in states.iter().enumerate() {
        if i == args.skip {
            carry = bdd.one();
        }
        fns.push(bdd.apply_xor(bit, carry));
        carry = bdd.apply_and(bit, carry);
    }
    reach.set_transition_functions(&fns)?;
    println!("bdd = {:?}", reach.bdd());

    let reachable = reach.reachable_states();
    println!(
        "reachable states: {} (set {} of size {})",
        reach.reachable_state_count(),
        reachable,
        reach.bdd().size(reachable)?
    );

    let all_ones = vec![true; args.bits];
    match reach.state_distance(&all_ones)? {
        Some(distance) => println!("all-ones state reached in {} step(s)", distance),
        None => println!("all-ones state is unreachable"),
    }

    if args.mermaid {
        println!("{}", reach.bdd().to_mermaid(reachable)?);
    }

    let stats = reach.bdd().cache_stats();
    println!("cache hits: {}", stats.hits);
    println!("cache misses: {}", stats.misses);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
