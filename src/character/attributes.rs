use crate::core::balance::{BASE_ATTRIBUTE_VALUE, NUM_ATTRIBUTES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Dexterity,
            AttributeType::Constitution,
            AttributeType::Intelligence,
            AttributeType::Wisdom,
            AttributeType::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            AttributeType::Strength => "STR",
            AttributeType::Dexterity => "DEX",
            AttributeType::Constitution => "CON",
            AttributeType::Intelligence => "INT",
            AttributeType::Wisdom => "WIS",
            AttributeType::Charisma => "CHA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Dexterity => 1,
            AttributeType::Constitution => 2,
            AttributeType::Intelligence => 3,
            AttributeType::Wisdom => 4,
            AttributeType::Charisma => 5,
        }
    }
}

/// The six-attribute block shared by class templates and live characters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            values: [BASE_ATTRIBUTE_VALUE; NUM_ATTRIBUTES],
        }
    }
}

impl Attributes {
    /// Builds an attribute block in STR, DEX, CON, INT, WIS, CHA order.
    pub fn new(str: u32, dex: u32, con: u32, int: u32, wis: u32, cha: u32) -> Self {
        Self {
            values: [str, dex, con, int, wis, cha],
        }
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn increment(&mut self, attr: AttributeType) {
        self.values[attr.index()] = self.values[attr.index()].saturating_add(1);
    }

    /// D&D-style modifier: (value - 10) / 2, truncated toward zero.
    pub fn modifier(&self, attr: AttributeType) -> i32 {
        let value = self.get(attr) as i32;
        (value - BASE_ATTRIBUTE_VALUE as i32) / 2
    }

    /// Sum of all six attributes, the backbone of the class power score.
    pub fn sum(&self) -> u32 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preserves_order() {
        let attrs = Attributes::new(15, 10, 14, 8, 10, 8);
        assert_eq!(attrs.get(AttributeType::Strength), 15);
        assert_eq!(attrs.get(AttributeType::Dexterity), 10);
        assert_eq!(attrs.get(AttributeType::Constitution), 14);
        assert_eq!(attrs.get(AttributeType::Intelligence), 8);
        assert_eq!(attrs.get(AttributeType::Wisdom), 10);
        assert_eq!(attrs.get(AttributeType::Charisma), 8);
    }

    #[test]
    fn test_get_set() {
        let mut attrs = Attributes::default();
        attrs.set(AttributeType::Strength, 16);
        assert_eq!(attrs.get(AttributeType::Strength), 16);
        assert_eq!(attrs.get(AttributeType::Dexterity), 10);
    }

    #[test]
    fn test_increment() {
        let mut attrs = Attributes::default();
        attrs.increment(AttributeType::Wisdom);
        assert_eq!(attrs.get(AttributeType::Wisdom), 11);
    }

    #[test]
    fn test_modifier_calculation() {
        let mut attrs = Attributes::default();

        // 10-11 = +0
        attrs.set(AttributeType::Strength, 10);
        assert_eq!(attrs.modifier(AttributeType::Strength), 0);
        attrs.set(AttributeType::Strength, 11);
        assert_eq!(attrs.modifier(AttributeType::Strength), 0);

        // 14-15 = +2
        attrs.set(AttributeType::Strength, 14);
        assert_eq!(attrs.modifier(AttributeType::Strength), 2);

        // 16 = +3
        attrs.set(AttributeType::Strength, 16);
        assert_eq!(attrs.modifier(AttributeType::Strength), 3);

        // 8 = -1 (truncation toward zero)
        attrs.set(AttributeType::Strength, 8);
        assert_eq!(attrs.modifier(AttributeType::Strength), -1);

        // 5 = -2
        attrs.set(AttributeType::Strength, 5);
        assert_eq!(attrs.modifier(AttributeType::Strength), -2);
    }

    #[test]
    fn test_sum() {
        let attrs = Attributes::new(15, 10, 14, 8, 10, 8);
        assert_eq!(attrs.sum(), 65);
    }

    #[test]
    fn test_all_returns_six_types() {
        let all = AttributeType::all();
        assert_eq!(all.len(), 6);
        for (i, attr) in all.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
    }

    #[test]
    fn test_abbrevs() {
        assert_eq!(AttributeType::Strength.abbrev(), "STR");
        assert_eq!(AttributeType::Charisma.abbrev(), "CHA");
    }
}
