//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility checks on threshold values.
//!
//! The raw TOML is first parsed into `toml::Value` and its keys compared
//! against the known field names, emitting "did you mean?" warnings. Serde
//! deserialization then proceeds as normal. Warnings never reject a config.

use std::collections::HashSet;

use super::SensorConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Valid top-level keys of `SensorConfig`. Must track the struct fields.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        "slope_warning",
        "slope_critical",
        "bias_warning",
        "bias_critical",
        "hysteresis_critical",
        "dfa_critical",
        "min_data_points",
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted paths of every key in a TOML document, tables included.
///
/// `{ a = { b = 1, c = 2 } }` yields `a`, `a.b` and `a.c`. Order follows a
/// depth-first traversal; non-table values yield nothing.
pub fn dotted_keys(value: &toml::Value) -> Vec<String> {
    let mut keys = Vec::new();
    let mut pending: Vec<(Option<String>, &toml::Table)> =
        value.as_table().map(|t| (None, t)).into_iter().collect();

    while let Some((parent, table)) = pending.pop() {
        for (key, child) in table {
            let path = match &parent {
                Some(parent) => format!("{parent}.{key}"),
                None => key.clone(),
            };
            if let Some(nested) = child.as_table() {
                pending.push((Some(path.clone()), nested));
            }
            keys.push(path);
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3, ties broken alphabetically.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Unparseable input yields no warnings; serde reports the parse error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    dotted_keys(&value)
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            // Compare only the leaf so a misplaced key still gets a suggestion
            let leaf = key.rsplit('.').next().unwrap_or(&key);
            let suggestion = suggest_correction(leaf, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Plausibility Checks
// ============================================================================

/// Warnings for values that validate but are unlikely to be intended.
pub fn validate_plausibility(config: &SensorConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // DFA needs a few dozen samples before its scales mean anything
    if config.min_data_points < 20 {
        warnings.push(ValidationWarning {
            field: "min_data_points".to_string(),
            message: format!(
                "min_data_points = {} is below 20; DFA results will mostly be neutral",
                config.min_data_points
            ),
            suggestion: None,
        });
    }

    if config.dfa_critical < 0.5 {
        warnings.push(ValidationWarning {
            field: "dfa_critical".to_string(),
            message: format!(
                "dfa_critical = {:.2} is below the white-noise exponent 0.5; every sensor will be flagged",
                config.dfa_critical
            ),
            suggestion: None,
        });
    }

    if config.slope_critical == 0.0 {
        warnings.push(ValidationWarning {
            field: "slope_critical".to_string(),
            message: "slope_critical = 0 flags any non-flat signal as critical drift".to_string(),
            suggestion: None,
        });
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("slope", "slope"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("bias_critcal", "bias_critical"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_dotted_keys_nested() {
        let toml: toml::Value = r#"
            a = 1
            [section]
            b = 2
        "#
        .parse()
        .expect("valid TOML");
        let mut keys = dotted_keys(&toml);
        keys.sort();
        assert_eq!(keys, vec!["a", "section", "section.b"]);
    }

    #[test]
    fn test_dotted_keys_deep_tables() {
        let toml: toml::Value = r#"
            [outer.inner]
            leaf = true
            [outer]
            sibling = "x"
        "#
        .parse()
        .expect("valid TOML");
        let mut keys = dotted_keys(&toml);
        keys.sort();
        assert_eq!(
            keys,
            vec!["outer", "outer.inner", "outer.inner.leaf", "outer.sibling"]
        );
    }

    #[test]
    fn test_dotted_keys_of_scalar_is_empty() {
        assert!(dotted_keys(&toml::Value::Integer(3)).is_empty());
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("slope_critcal = 0.2\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "slope_critcal");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("slope_critical"));
        assert!(warnings[0].to_string().contains("did you mean 'slope_critical'"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
slope_warning = 0.05
slope_critical = 0.1
bias_warning = 1.0
bias_critical = 2.0
hysteresis_critical = 0.5
dfa_critical = 0.8
min_data_points = 50
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_nested_key_suggests_from_leaf() {
        let warnings = validate_unknown_keys("[thresholds]\nbias_warning = 1.0\n");
        assert!(warnings.iter().any(|w| w.field == "thresholds"));
        let nested = warnings
            .iter()
            .find(|w| w.field == "thresholds.bias_warning")
            .expect("nested key should be reported");
        assert_eq!(nested.suggestion.as_deref(), Some("bias_warning"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key", &known).is_none());
    }

    #[test]
    fn test_unparseable_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("this is = = not toml").is_empty());
    }

    #[test]
    fn test_plausibility_defaults_clean() {
        let warnings = validate_plausibility(&SensorConfig::default());
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_plausibility_low_min_points() {
        let config = SensorConfig {
            min_data_points: 5,
            ..SensorConfig::default()
        };
        let warnings = validate_plausibility(&config);
        assert!(warnings.iter().any(|w| w.field == "min_data_points"));
    }
}
