use std::collections::BTreeSet;
use std::fmt;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Enabled categories, iterated in declaration order.
pub type CategorySet = BTreeSet<CharacterCategory>;

/// A class of characters a password may draw from.
///
/// The declaration order is significant: guaranteed characters and the
/// combined universe are both built by walking the categories in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterCategory {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterCategory {
    pub const ALL: [CharacterCategory; 4] = [
        CharacterCategory::Uppercase,
        CharacterCategory::Lowercase,
        CharacterCategory::Digit,
        CharacterCategory::Symbol,
    ];

    pub fn charset(self) -> &'static str {
        match self {
            CharacterCategory::Uppercase => UPPERCASE,
            CharacterCategory::Lowercase => LOWERCASE,
            CharacterCategory::Digit => DIGITS,
            CharacterCategory::Symbol => SYMBOLS,
        }
    }

    pub fn chars(self) -> Vec<char> {
        self.charset().chars().collect()
    }

    pub fn contains(self, c: char) -> bool {
        self.charset().contains(c)
    }

    /// Category a character belongs to, if any.
    pub fn of(c: char) -> Option<CharacterCategory> {
        Self::ALL.into_iter().find(|category| category.contains(c))
    }
}

impl fmt::Display for CharacterCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CharacterCategory::Uppercase => "uppercase",
            CharacterCategory::Lowercase => "lowercase",
            CharacterCategory::Digit => "digit",
            CharacterCategory::Symbol => "symbol",
        };
        write!(f, "{}", name)
    }
}

/// Concatenation of every enabled category's characters.
pub fn universe(categories: &CategorySet) -> Vec<char> {
    categories
        .iter()
        .flat_map(|category| category.charset().chars())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_sizes() {
        assert_eq!(CharacterCategory::Uppercase.chars().len(), 26);
        assert_eq!(CharacterCategory::Lowercase.chars().len(), 26);
        assert_eq!(CharacterCategory::Digit.chars().len(), 10);
        assert_eq!(CharacterCategory::Symbol.chars().len(), 27);
    }

    #[test]
    fn charsets_are_disjoint() {
        for c in CharacterCategory::ALL.iter().flat_map(|category| category.chars()) {
            let owners = CharacterCategory::ALL
                .iter()
                .filter(|category| category.contains(c))
                .count();
            assert_eq!(owners, 1, "{:?} belongs to {} categories", c, owners);
        }
    }

    #[test]
    fn symbol_membership_includes_slash_and_dash() {
        for c in ['/', '-', '[', ']', '^'] {
            assert_eq!(CharacterCategory::of(c), Some(CharacterCategory::Symbol));
        }
        assert_eq!(CharacterCategory::of(' '), None);
        assert_eq!(CharacterCategory::of('~'), None);
        assert_eq!(CharacterCategory::of('é'), None);
    }

    #[test]
    fn set_iterates_in_declaration_order() {
        let set: CategorySet = [
            CharacterCategory::Symbol,
            CharacterCategory::Uppercase,
            CharacterCategory::Digit,
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = set.into_iter().collect();
        assert_eq!(
            order,
            vec![CharacterCategory::Uppercase, CharacterCategory::Digit, CharacterCategory::Symbol]
        );
    }

    #[test]
    fn universe_concatenates_in_order() {
        let set: CategorySet = [CharacterCategory::Digit, CharacterCategory::Uppercase]
            .into_iter()
            .collect();

        let expected: Vec<char> = format!("{}{}", UPPERCASE, DIGITS).chars().collect();
        assert_eq!(universe(&set), expected);
        assert!(universe(&CategorySet::new()).is_empty());
    }
}
