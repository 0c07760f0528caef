//! Client-side password generation and strength scoring.
//!
//! Pure character-set composition and uniform sampling; nothing here is
//! cryptography and nothing leaves the process.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Which character classes participate, and how long the result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_true")]
    pub uppercase: bool,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_true")]
    pub digits: bool,
    #[serde(default = "default_true")]
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: default_length(),
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

fn default_length() -> usize {
    16
}
fn default_true() -> bool {
    true
}

impl GeneratorOptions {
    fn charset(&self) -> Vec<char> {
        let mut chars = String::new();
        if self.uppercase {
            chars.push_str(UPPERCASE);
        }
        if self.lowercase {
            chars.push_str(LOWERCASE);
        }
        if self.digits {
            chars.push_str(DIGITS);
        }
        if self.symbols {
            chars.push_str(SYMBOLS);
        }
        chars.chars().collect()
    }
}

/// Generate a password with the thread-local RNG.
pub fn generate(options: &GeneratorOptions) -> Result<String, ValidationError> {
    generate_with(&mut rand::thread_rng(), options)
}

/// Generate a password sampling uniformly from the composed character set.
///
/// # Errors
/// Returns [`ValidationError::EmptyCharset`] when every class is disabled.
pub fn generate_with<R: Rng>(
    rng: &mut R,
    options: &GeneratorOptions,
) -> Result<String, ValidationError> {
    let charset = options.charset();
    if charset.is_empty() {
        return Err(ValidationError::EmptyCharset);
    }
    Ok((0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect())
}

/// Coarse strength bucket shown next to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthLabel::Weak => "weak",
            StrengthLabel::Fair => "fair",
            StrengthLabel::Good => "good",
            StrengthLabel::Strong => "strong",
        };
        f.write_str(label)
    }
}

/// Score 0-5: one point each for length > 8, length > 12, an uppercase
/// letter, a digit, and a non-alphanumeric character.
pub fn strength_score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let mut score = 0;
    let length = password.chars().count();
    if length > 8 {
        score += 1;
    }
    if length > 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

pub fn strength_label(score: u8) -> StrengthLabel {
    match score {
        0 | 1 => StrengthLabel::Weak,
        2 | 3 => StrengthLabel::Fair,
        4 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn respects_requested_length() {
        let mut rng = Pcg64::seed_from_u64(7);
        let options = GeneratorOptions {
            length: 24,
            ..GeneratorOptions::default()
        };
        let password = generate_with(&mut rng, &options).unwrap();
        assert_eq!(password.chars().count(), 24);
    }

    #[test]
    fn digits_only_when_other_classes_disabled() {
        let mut rng = Pcg64::seed_from_u64(7);
        let options = GeneratorOptions {
            length: 64,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let password = generate_with(&mut rng, &options).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn all_classes_disabled_is_an_error() {
        let mut rng = Pcg64::seed_from_u64(7);
        let options = GeneratorOptions {
            length: 16,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };
        assert!(matches!(
            generate_with(&mut rng, &options),
            Err(ValidationError::EmptyCharset)
        ));
    }

    #[test]
    fn same_seed_same_password() {
        let options = GeneratorOptions::default();
        let a = generate_with(&mut Pcg64::seed_from_u64(42), &options).unwrap();
        let b = generate_with(&mut Pcg64::seed_from_u64(42), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strength_scores_known_inputs() {
        assert_eq!(strength_score(""), 0);
        assert_eq!(strength_score("password"), 0);
        assert_eq!(strength_score("longpassword1"), 3);
        assert_eq!(strength_score("Password123!"), 4);
        assert_eq!(strength_score("Correct-Horse-Battery-9"), 5);
    }

    #[test]
    fn strength_labels_match_buckets() {
        assert_eq!(strength_label(0), StrengthLabel::Weak);
        assert_eq!(strength_label(1), StrengthLabel::Weak);
        assert_eq!(strength_label(3), StrengthLabel::Fair);
        assert_eq!(strength_label(4), StrengthLabel::Good);
        assert_eq!(strength_label(5), StrengthLabel::Strong);
    }

    proptest! {
        /// Output only ever contains characters from the enabled classes.
        #[test]
        fn output_stays_inside_enabled_classes(
            seed in any::<u64>(),
            length in 1usize..64,
            uppercase: bool,
            lowercase: bool,
            digits: bool,
        ) {
            let options = GeneratorOptions { length, uppercase, lowercase, digits, symbols: true };
            let mut rng = Pcg64::seed_from_u64(seed);
            let password = generate_with(&mut rng, &options).unwrap();
            prop_assert_eq!(password.chars().count(), length);
            for c in password.chars() {
                let allowed = (uppercase && UPPERCASE.contains(c))
                    || (lowercase && LOWERCASE.contains(c))
                    || (digits && DIGITS.contains(c))
                    || SYMBOLS.contains(c);
                prop_assert!(allowed, "unexpected character {:?}", c);
            }
        }
    }
}
