use crate::charset::{ universe, CategorySet, CharacterCategory };
use crate::errors::GenerationError;
use crate::random::{ pick, shuffle, RandomSource };

/// Length and categories for one password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub categories: CategorySet,
}

impl GenerationRequest {
    pub fn new(length: usize, categories: impl IntoIterator<Item = CharacterCategory>) -> Self {
        Self {
            length,
            categories: categories.into_iter().collect(),
        }
    }

    pub fn generate<S: RandomSource + ?Sized>(&self, rng: &mut S) -> Result<String, GenerationError> {
        generate(self.length, &self.categories, rng)
    }
}

/// Builds a password of exactly `length` characters that holds at least one
/// character of every enabled category, as long as `length` leaves room for
/// them.
///
/// When `length` is smaller than the number of enabled categories only the
/// first `length` categories, in declaration order, contribute a character.
pub fn generate<S: RandomSource + ?Sized>(
    length: usize,
    categories: &CategorySet,
    rng: &mut S,
) -> Result<String, GenerationError> {
    if categories.is_empty() {
        return Err(GenerationError::NoCategorySelected);
    }

    let truncated = length < categories.len();
    let mut chars: Vec<char> = Vec::with_capacity(length);

    for category in categories.iter().take(length) {
        chars.push(pick(&category.chars(), rng));
    }

    let pool = universe(categories);
    while chars.len() < length {
        chars.push(pick(&pool, rng));
    }

    shuffle(&mut chars, rng);

    tracing::debug!(
        length,
        categories = ?categories,
        truncated,
        "generated password"
    );

    Ok(chars.into_iter().collect())
}
