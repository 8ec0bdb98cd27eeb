//! Load axiom sets from TOML files
//!
//! ```toml
//! [[axioms]]
//! kind = "max_stat_bound"
//! stat = "strength"
//! max = 100
//! description = "No mortal exceeds 100 strength"
//! ```

use std::path::Path;

use super::axiom::{Axiom, AxiomKind};
use super::set::AxiomSet;
use crate::core::error::{LoreError, LoreResult};
use crate::core::types::{CharacterClass, ExperiencePoints, Level, StatType};

/// Load an axiom set from a TOML file
pub fn load_axioms(path: &Path) -> LoreResult<AxiomSet> {
    let content = std::fs::read_to_string(path)?;
    let set = parse_axioms_toml(&content)
        .map_err(|e| LoreError::Parse(format!("{}: {}", path.display(), e)))?;
    tracing::info!("Loaded {} axioms from {}", set.len(), path.display());
    Ok(set)
}

/// Parse an axiom set from TOML text
pub fn parse_axioms_toml(content: &str) -> LoreResult<AxiomSet> {
    let toml: toml::Value = content.parse()?;

    let mut axioms = Vec::new();
    if let Some(entries) = toml.get("axioms").and_then(|v| v.as_array()) {
        for (index, entry) in entries.iter().enumerate() {
            axioms.push(parse_axiom(entry, index)?);
        }
    }

    AxiomSet::new(axioms)
}

fn parse_axiom(value: &toml::Value, index: usize) -> LoreResult<Axiom> {
    let kind_str = value
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| LoreError::Parse(format!("axiom #{} missing kind", index)))?;

    let description = value
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let kind = match kind_str {
        "class_definition" => AxiomKind::ClassDefinition {
            class: parse_class(value, index)?,
        },
        "stat_definition" => AxiomKind::StatDefinition {
            stat: parse_stat(value, index)?,
        },
        "max_stat_bound" => AxiomKind::MaxStatBound {
            stat: parse_stat(value, index)?,
            max: parse_u32(value, "max", index)?,
        },
        "class_stat_relation" => AxiomKind::ClassStatRelation {
            class: parse_class(value, index)?,
            stat: parse_stat(value, index)?,
        },
        "forbidden_combination" => AxiomKind::ForbiddenCombination {
            class: parse_class(value, index)?,
            stat: parse_stat(value, index)?,
        },
        "required_experience" => AxiomKind::RequiredExperience {
            level: Level::new(parse_u32(value, "level", index)?)?,
            experience: ExperiencePoints::new(parse_u32(value, "experience", index)?),
        },
        "level_up_rule" => AxiomKind::LevelUpRule {
            max_level: match value.get("max_level") {
                Some(_) => Level::new(parse_u32(value, "max_level", index)?)?,
                None => Level::MAX,
            },
        },
        other => {
            return Err(LoreError::Parse(format!(
                "axiom #{}: unknown kind '{}'",
                index, other
            )))
        }
    };

    Ok(Axiom::new(kind, description))
}

fn required_str<'a>(value: &'a toml::Value, field: &str, index: usize) -> LoreResult<&'a str> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| LoreError::Parse(format!("axiom #{} missing {}", index, field)))
}

fn parse_class(value: &toml::Value, index: usize) -> LoreResult<CharacterClass> {
    required_str(value, "class", index)?.parse()
}

fn parse_stat(value: &toml::Value, index: usize) -> LoreResult<StatType> {
    required_str(value, "stat", index)?.parse()
}

fn parse_u32(value: &toml::Value, field: &str, index: usize) -> LoreResult<u32> {
    let raw = value
        .get(field)
        .and_then(|v| v.as_integer())
        .ok_or_else(|| LoreError::Parse(format!("axiom #{} missing {}", index, field)))?;
    u32::try_from(raw)
        .map_err(|_| LoreError::Parse(format!("axiom #{}: {} = {} out of range", index, field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_kind() {
        let toml_str = r#"
[[axioms]]
kind = "class_definition"
class = "mage"
description = "Mages walk the world"

[[axioms]]
kind = "stat_definition"
stat = "intellect"

[[axioms]]
kind = "max_stat_bound"
stat = "intellect"
max = 120

[[axioms]]
kind = "class_stat_relation"
class = "mage"
stat = "intellect"

[[axioms]]
kind = "forbidden_combination"
class = "mage"
stat = "strength"

[[axioms]]
kind = "required_experience"
level = 2
experience = 100

[[axioms]]
kind = "level_up_rule"
max_level = 60
"#;
        let set = parse_axioms_toml(toml_str).unwrap();
        assert_eq!(set.len(), 7);
        assert_eq!(set.get_max_stat(StatType::Intellect), Some(120));
        assert!(set.can_use_stat(CharacterClass::Mage, StatType::Intellect));
        assert_eq!(set.level_cap().value(), 60);
        assert_eq!(
            set.iter().next().unwrap().description,
            "Mages walk the world"
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml_str = r#"
[[axioms]]
kind = "prophecy"
"#;
        let err = parse_axioms_toml(toml_str).unwrap_err();
        assert!(err.to_string().contains("unknown kind 'prophecy'"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let toml_str = r#"
[[axioms]]
kind = "max_stat_bound"
stat = "strength"
"#;
        let err = parse_axioms_toml(toml_str).unwrap_err();
        assert!(err.to_string().contains("missing max"));
    }

    #[test]
    fn test_negative_number_rejected() {
        let toml_str = r#"
[[axioms]]
kind = "required_experience"
level = 2
experience = -5
"#;
        assert!(parse_axioms_toml(toml_str).is_err());
    }

    #[test]
    fn test_duplicate_in_file_rejected() {
        let toml_str = r#"
[[axioms]]
kind = "stat_definition"
stat = "wisdom"

[[axioms]]
kind = "stat_definition"
stat = "wisdom"
"#;
        assert!(matches!(
            parse_axioms_toml(toml_str),
            Err(LoreError::DuplicateAxiom(_))
        ));
    }

    #[test]
    fn test_load_default_data_file() {
        let path = Path::new("data/axioms/default.toml");
        if path.exists() {
            let set = load_axioms(path).unwrap();
            assert!(!set.is_empty());
        }
    }
}
