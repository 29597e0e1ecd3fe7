use rand::Rng;

/// Number of characters in a generated auth token
pub const TOKEN_LENGTH: usize = 19;

const HEX_DIGITS: &[u8] = b"0123456789abcdef";
const HEX_LETTERS: &[u8] = b"abcdef";

/// Source of default authentication tokens
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates hex tokens with exactly one upper-cased letter using the thread RNG
pub struct RandomTokenGenerator;

impl RandomTokenGenerator {
    /// Build a token from the given random source
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        let mut chars: Vec<u8> = (0..TOKEN_LENGTH)
            .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())])
            .collect();

        let position = rng.gen_range(0..TOKEN_LENGTH);
        let letter = if chars[position].is_ascii_alphabetic() {
            chars[position]
        } else {
            HEX_LETTERS[rng.gen_range(0..HEX_LETTERS.len())]
        };
        chars[position] = letter.to_ascii_uppercase();

        chars.into_iter().map(char::from).collect()
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        Self::generate_with(&mut rand::thread_rng())
    }
}

/// Token generator returning a fixed value
#[cfg(test)]
pub struct FixedTokenGenerator(pub String);

#[cfg(test)]
impl TokenGenerator for FixedTokenGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
