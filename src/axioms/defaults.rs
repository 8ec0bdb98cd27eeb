//! Built-in lore used when no axiom file is configured
//!
//! Mirrors `data/axioms/default.toml`.

use super::axiom::Axiom;
use super::set::AxiomSet;
use crate::core::error::LoreResult;
use crate::core::types::{CharacterClass, ExperiencePoints, Level, StatType};

/// Highest level reachable under the default lore
pub const DEFAULT_LEVEL_CAP: u32 = 20;

/// Experience required to reach `level`: 100 for level 2, then triangular growth
pub fn default_required_xp(level: u32) -> u32 {
    100 * (level - 1) * level / 2
}

fn permitted_stats(class: CharacterClass) -> &'static [StatType] {
    match class {
        CharacterClass::Warrior => &[StatType::Strength, StatType::Vitality, StatType::Agility],
        CharacterClass::Mage => &[StatType::Intellect, StatType::Wisdom],
        CharacterClass::Rogue => &[StatType::Agility, StatType::Strength],
        CharacterClass::Cleric => &[StatType::Wisdom, StatType::Vitality, StatType::Intellect],
        CharacterClass::Ranger => &[StatType::Agility, StatType::Vitality, StatType::Wisdom],
    }
}

fn max_bound(stat: StatType) -> u32 {
    match stat {
        StatType::Vitality => 150,
        _ => 100,
    }
}

/// The default axiom set
pub fn create_default_axioms() -> LoreResult<AxiomSet> {
    let mut axioms = Vec::new();

    for class in CharacterClass::ALL {
        axioms.push(Axiom::class_definition(
            class,
            format!("The {} class exists", class),
        ));
    }
    for stat in StatType::ALL {
        axioms.push(Axiom::stat_definition(stat, format!("The {} stat exists", stat)));
    }
    for stat in StatType::ALL {
        axioms.push(Axiom::max_stat_bound(
            stat,
            max_bound(stat),
            format!("No {} may exceed {}", stat, max_bound(stat)),
        ));
    }
    for class in CharacterClass::ALL {
        for &stat in permitted_stats(class) {
            axioms.push(Axiom::class_stat_relation(
                class,
                stat,
                format!("A {} may train {}", class, stat),
            ));
        }
    }
    axioms.push(Axiom::forbidden_combination(
        CharacterClass::Mage,
        StatType::Strength,
        "Mages forsake physical strength",
    ));
    for level in 2..=DEFAULT_LEVEL_CAP {
        let xp = default_required_xp(level);
        axioms.push(Axiom::required_experience(
            Level::new(level)?,
            ExperiencePoints::new(xp),
            format!("Level {} requires {} experience", level, xp),
        ));
    }
    axioms.push(Axiom::level_up_rule(
        Level::new(DEFAULT_LEVEL_CAP)?,
        "A character with enough experience may advance one level",
    ));

    AxiomSet::new(axioms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::loader::load_axioms;
    use std::path::Path;

    #[test]
    fn test_default_axioms_build() {
        let set = create_default_axioms().unwrap();
        assert_eq!(set.known_classes().len(), 5);
        assert_eq!(set.known_stats().len(), 5);
        assert_eq!(
            set.get_required_xp(Level::new(2).unwrap()),
            Some(ExperiencePoints::new(100))
        );
        assert_eq!(set.level_cap().value(), DEFAULT_LEVEL_CAP);
    }

    #[test]
    fn test_mage_permissions() {
        let set = create_default_axioms().unwrap();
        assert!(set.can_use_stat(CharacterClass::Mage, StatType::Intellect));
        assert!(!set.can_use_stat(CharacterClass::Mage, StatType::Strength));
        assert!(set.can_use_stat(CharacterClass::Warrior, StatType::Strength));
    }

    #[test]
    fn test_required_xp_curve() {
        assert_eq!(default_required_xp(2), 100);
        assert_eq!(default_required_xp(3), 300);
        assert_eq!(default_required_xp(4), 600);
    }

    #[test]
    fn test_data_file_matches_builtin() {
        let path = Path::new("data/axioms/default.toml");
        if path.exists() {
            let loaded = load_axioms(path).unwrap();
            let builtin = create_default_axioms().unwrap();
            assert_eq!(loaded.to_symbolic_text(), builtin.to_symbolic_text());
        }
    }
}
