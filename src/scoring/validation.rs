use std::collections::{HashMap, HashSet};

use super::taxonomy::Taxonomy;

/// Validate a taxonomy at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_taxonomy(taxonomy: &Taxonomy) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Criteria: named, unique, usable columns
    let mut criterion_names = HashSet::new();
    for (i, criterion) in taxonomy.criteria.iter().enumerate() {
        if criterion.name.trim().is_empty() {
            errors.push(format!("taxonomy.criteria[{}].name: must not be empty", i));
        } else if !criterion_names.insert(criterion.name.as_str()) {
            errors.push(format!(
                "taxonomy.criteria[{}].name: duplicate criterion '{}'",
                i, criterion.name
            ));
        }
        if let Err(e) = criterion.columns.grid_span() {
            errors.push(format!(
                "taxonomy.criteria[{}].columns: invalid '{}' - {}",
                i, criterion.columns, e
            ));
        }
    }

    // Groups: named, unique, non-empty, only known criteria
    let mut group_names = HashSet::new();
    let mut criterion_owner: HashMap<&str, &str> = HashMap::new();
    for (i, group) in taxonomy.groups.iter().enumerate() {
        if group.name.trim().is_empty() {
            errors.push(format!("taxonomy.groups[{}].name: must not be empty", i));
        } else if !group_names.insert(group.name.as_str()) {
            errors.push(format!(
                "taxonomy.groups[{}].name: duplicate group '{}'",
                i, group.name
            ));
        }
        if group.criteria.is_empty() {
            errors.push(format!(
                "taxonomy.groups[{}].criteria: group '{}' has no criteria",
                i, group.name
            ));
        }
        for (j, name) in group.criteria.iter().enumerate() {
            if !criterion_names.contains(name.as_str()) {
                errors.push(format!(
                    "taxonomy.groups[{}].criteria[{}]: unknown criterion '{}'",
                    i, j, name
                ));
            } else if let Some(owner) = criterion_owner.insert(name.as_str(), group.name.as_str())
            {
                errors.push(format!(
                    "taxonomy.groups[{}].criteria[{}]: criterion '{}' already belongs to group '{}'",
                    i, j, name, owner
                ));
            }
        }
    }

    for (i, criterion) in taxonomy.criteria.iter().enumerate() {
        if !criterion.name.trim().is_empty()
            && !criterion_owner.contains_key(criterion.name.as_str())
        {
            errors.push(format!(
                "taxonomy.criteria[{}]: criterion '{}' is not in any group",
                i, criterion.name
            ));
        }
    }

    // Levels: same rules one tier up
    let mut level_names = HashSet::new();
    let mut group_owner: HashMap<&str, &str> = HashMap::new();
    for (i, level) in taxonomy.levels.iter().enumerate() {
        if level.name.trim().is_empty() {
            errors.push(format!("taxonomy.levels[{}].name: must not be empty", i));
        } else if !level_names.insert(level.name.as_str()) {
            errors.push(format!(
                "taxonomy.levels[{}].name: duplicate level '{}'",
                i, level.name
            ));
        }
        if level.groups.is_empty() {
            errors.push(format!(
                "taxonomy.levels[{}].groups: level '{}' has no groups",
                i, level.name
            ));
        }
        for (j, name) in level.groups.iter().enumerate() {
            if !group_names.contains(name.as_str()) {
                errors.push(format!(
                    "taxonomy.levels[{}].groups[{}]: unknown group '{}'",
                    i, j, name
                ));
            } else if let Some(owner) = group_owner.insert(name.as_str(), level.name.as_str()) {
                errors.push(format!(
                    "taxonomy.levels[{}].groups[{}]: group '{}' already belongs to level '{}'",
                    i, j, name, owner
                ));
            }
        }
    }

    for (i, group) in taxonomy.groups.iter().enumerate() {
        if !group.name.trim().is_empty() && !group_owner.contains_key(group.name.as_str()) {
            errors.push(format!(
                "taxonomy.groups[{}]: group '{}' is not in any level",
                i, group.name
            ));
        }
    }

    // Answer labels must be distinguishable
    let answers = &taxonomy.answers;
    let labels = [
        ("affirmative", &answers.affirmative),
        ("partial", &answers.partial),
        ("negative", &answers.negative),
        ("not_applicable", &answers.not_applicable),
    ];
    let mut seen_labels = HashSet::new();
    for (field, value) in labels {
        if value.is_empty() {
            errors.push(format!("taxonomy.answers.{}: must not be empty", field));
        } else if !seen_labels.insert(value.as_str()) {
            errors.push(format!(
                "taxonomy.answers.{}: '{}' is used for another answer",
                field, value
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
