use clap::Args;
use passkind_core::generator::{self, strength_label, strength_score};
use passkind_core::storage::Config;

#[derive(Args)]
pub struct GenerateArgs {
    /// Password length (defaults to the configured generator length)
    #[arg(long)]
    length: Option<usize>,
    /// Exclude uppercase letters
    #[arg(long)]
    no_uppercase: bool,
    /// Exclude lowercase letters
    #[arg(long)]
    no_lowercase: bool,
    /// Exclude digits
    #[arg(long)]
    no_digits: bool,
    /// Exclude symbols
    #[arg(long)]
    no_symbols: bool,
    /// Number of passwords to generate
    #[arg(long, default_value = "1")]
    count: usize,
    /// Print the strength label next to each password
    #[arg(long)]
    strength: bool,
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut options = config.generator;
    if let Some(length) = args.length {
        options.length = length;
    }
    if args.no_uppercase {
        options.uppercase = false;
    }
    if args.no_lowercase {
        options.lowercase = false;
    }
    if args.no_digits {
        options.digits = false;
    }
    if args.no_symbols {
        options.symbols = false;
    }

    for _ in 0..args.count {
        let password = generator::generate(&options)?;
        if args.strength {
            let label = strength_label(strength_score(&password));
            println!("{password}\t{label}");
        } else {
            println!("{password}");
        }
    }
    Ok(())
}
