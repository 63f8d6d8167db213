//! Validated character creation.
//!
//! Validation is fail-fast in a fixed order: empty name, oversized name,
//! unknown class. No state is touched on failure and no randomness is
//! involved on success, so the same (name, class) pair always yields an
//! identical character.

use thiserror::Error;

use crate::character::class::{ClassId, ClassTemplate};
use crate::character::Character;
use crate::core::balance::NAME_MAX_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    #[error("character name must not be empty")]
    EmptyName,
    #[error("character name must be at most 50 characters")]
    NameTooLong,
    #[error("unknown class: {0}")]
    UnknownClass(String),
}

/// Creates a character for a known class id.
pub fn create_character(name: &str, class: ClassId) -> Result<Character, CreationError> {
    validate_name(name)?;
    let template = ClassTemplate::of(class);
    Ok(Character::from_template(name.to_string(), &template))
}

/// Creates a character from a string class key, as submitted by external
/// creation flows. The key is validated after the name so the first
/// violation wins.
pub fn create_character_by_key(name: &str, class_key: &str) -> Result<Character, CreationError> {
    validate_name(name)?;
    let class = ClassId::from_key(class_key)
        .ok_or_else(|| CreationError::UnknownClass(class_key.to_string()))?;
    create_character(name, class)
}

fn validate_name(name: &str) -> Result<(), CreationError> {
    if name.is_empty() {
        return Err(CreationError::EmptyName);
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(CreationError::NameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::STARTING_GOLD;

    #[test]
    fn test_create_character_success() {
        let c = create_character("Aldric", ClassId::Warrior).unwrap();
        assert_eq!(c.name, "Aldric");
        assert_eq!(c.class, ClassId::Warrior);
        assert_eq!(c.level, 1);
        assert_eq!(c.gold, STARTING_GOLD);
        assert_eq!(c.current_hp, c.max_hp);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_empty_name_rejected_first() {
        // Empty name wins even when the class key is also bad
        assert_eq!(
            create_character_by_key("", "no-such-class"),
            Err(CreationError::EmptyName)
        );
    }

    #[test]
    fn test_name_too_long_rejected() {
        let name = "x".repeat(51);
        assert_eq!(
            create_character(&name, ClassId::Mage),
            Err(CreationError::NameTooLong)
        );
        // Exactly 50 is fine
        let name = "x".repeat(50);
        assert!(create_character(&name, ClassId::Mage).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // 50 multibyte characters must pass
        let name = "ä".repeat(50);
        assert!(create_character(&name, ClassId::Mage).is_ok());
    }

    #[test]
    fn test_unknown_class_rejected() {
        assert_eq!(
            create_character_by_key("Aldric", "lich"),
            Err(CreationError::UnknownClass("lich".to_string()))
        );
    }

    #[test]
    fn test_creation_is_deterministic() {
        for id in ClassId::all() {
            let a = create_character("Same Name", id).unwrap();
            let b = create_character("Same Name", id).unwrap();
            assert_eq!(a, b, "{} creation should be deterministic", id.key());
        }
    }

    #[test]
    fn test_abilities_are_copies_not_shared() {
        let mut a = create_character("A", ClassId::Warrior).unwrap();
        let b = create_character("B", ClassId::Warrior).unwrap();
        a.abilities.pop();
        assert_eq!(b.abilities.len(), 3);
    }
}
