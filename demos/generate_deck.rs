use algebra_cards::config::DeckKind;
use algebra_cards::deck::save_deck;
use algebra_cards::deck::DeckStorage;
use algebra_cards::traits::Flashcard;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generate a set of algebra flashcards and write them to a .yaml or .json file, or print them
/// as yaml if no output is given.
#[derive(Parser, Debug)]
#[clap(long_about = None)]
struct Args {
    /// The output file.
    #[clap(short, long)]
    output: Option<String>,

    /// Kind of problems; linear, product_of_powers or mixed.
    #[clap(short, long, default_value = "mixed")]
    kind: DeckKind,

    /// Number of cards to generate.
    #[clap(short, long, default_value_t = 10)]
    count: usize,

    /// Seed for a reproducible deck.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Name to associate with the output
    #[clap(short, long)]
    name: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generator = args.kind.make_generator();
    let flashcards = (0..args.count)
        .map(|_| generator.generate(&mut rng))
        .collect::<Vec<Flashcard>>();
    let name = args
        .name
        .unwrap_or_else(|| format!("{:?} deck of {}", args.kind, args.count));

    match args.output {
        Some(output) => save_deck(&output, &name, &flashcards)?,
        None => {
            let storage = DeckStorage { name, flashcards };
            print!("{}", serde_yaml::to_string(&storage)?);
        }
    }
    Ok(())
}
