use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::harvest::tools::error::{Result, ToolError};
use crate::harvest::tools::model::Unit;

/// Header substring identifying the order column.
pub const DEFAULT_ORDER_COLUMN: &str = "Your Order";
/// Exact customer column header, trailing space included.
pub const DEFAULT_CUSTOMER_COLUMN: &str = "Customer Name ";

/// Prefix of the aggregator output file name.
pub const LISTIFY_PREFIX: &str = "listified-";
/// Prefix of the splitter output file name.
pub const SPLIT_PREFIX: &str = "splitted-";

/// One purchasable item produced by a decomposition rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Expansion {
    pub name: String,
    pub unit: Unit,
    pub multiplier: u64,
}

/// Replaces an aggregated item with a fixed list of single-unit items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecompositionRule {
    /// Exact item name the rule applies to.
    pub item: String,
    pub expansions: Vec<Expansion>,
}

impl DecompositionRule {
    fn validate(&self) -> Result<()> {
        if self.item.is_empty() {
            return Err(ToolError::InvalidRule("rule item name is empty".into()));
        }
        if self.expansions.is_empty() {
            return Err(ToolError::InvalidRule(format!(
                "rule for '{}' has no expansions",
                self.item
            )));
        }
        if let Some(expansion) = self.expansions.iter().find(|e| e.name.is_empty()) {
            return Err(ToolError::InvalidRule(format!(
                "rule for '{}' has an unnamed expansion ({})",
                self.item, expansion.unit
            )));
        }
        Ok(())
    }
}

/// The built-in rule table: the mixed bell pepper pack is bought as loose
/// red and yellow peppers.
pub fn default_decompositions() -> Vec<DecompositionRule> {
    vec![DecompositionRule {
        item: "Red & Yellow Bell Pepper 2 each in a pack".into(),
        expansions: vec![
            Expansion {
                name: "Red Bell Pepper per pc".into(),
                unit: Unit::Pcs,
                multiplier: 2,
            },
            Expansion {
                name: "Yellow Bell Pepper per pc".into(),
                unit: Unit::Pcs,
                multiplier: 2,
            },
        ],
    }]
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    decompositions: Vec<DecompositionRule>,
}

/// Loads a JSON rule file replacing the built-in decomposition table.
pub fn load_decompositions(path: &Path) -> Result<Vec<DecompositionRule>> {
    let source = fs::read_to_string(path)?;
    let file: RuleFile = serde_json::from_str(&source)?;
    for rule in &file.decompositions {
        rule.validate()?;
    }
    Ok(file.decompositions)
}

/// Settings for one aggregator run.
#[derive(Debug, Clone)]
pub struct ListifyConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub order_column: String,
    pub decompositions: Vec<DecompositionRule>,
}

impl ListifyConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("."),
            order_column: DEFAULT_ORDER_COLUMN.to_string(),
            decompositions: default_decompositions(),
        }
    }

    /// `<output_dir>/listified-<stem>.csv`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{LISTIFY_PREFIX}{}.csv", file_stem(&self.input)))
    }
}

/// Settings for one splitter run.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub customer_column: String,
}

impl SplitConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("."),
            customer_column: DEFAULT_CUSTOMER_COLUMN.to_string(),
        }
    }

    /// `<output_dir>/splitted-<stem>.xlsx`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{SPLIT_PREFIX}{}.xlsx", file_stem(&self.input)))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn output_paths_use_input_stem() {
        let mut listify = ListifyConfig::new("exports/week-12.xlsx");
        listify.output_dir = PathBuf::from("out");
        assert_eq!(listify.output_path(), PathBuf::from("out/listified-week-12.csv"));

        let split = SplitConfig::new("week-12.csv");
        assert_eq!(split.output_path(), PathBuf::from("./splitted-week-12.xlsx"));
    }

    #[test]
    fn default_table_holds_the_pepper_pack() {
        let rules = default_decompositions();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].expansions.len(), 2);
        assert!(rules[0].expansions.iter().all(|e| e.unit == Unit::Pcs && e.multiplier == 2));
    }

    #[test]
    fn rule_file_replaces_defaults() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"{"decompositions": [{"item": "Mixed Herbs", "expansions": [
                {"name": "Coriander bunch", "unit": "bunches", "multiplier": 1},
                {"name": "Mint bunch", "unit": "bunches", "multiplier": 1}
            ]}]}"#,
        )
        .expect("rule file written");

        let rules = load_decompositions(&path).expect("rules loaded");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].item, "Mixed Herbs");
        assert_eq!(rules[0].expansions[1].unit, Unit::Bunches);
    }

    #[test]
    fn rule_without_expansions_is_rejected() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("rules.json");
        fs::write(&path, r#"{"decompositions": [{"item": "Box", "expansions": []}]}"#)
            .expect("rule file written");

        let err = load_decompositions(&path).unwrap_err();
        assert!(matches!(err, ToolError::InvalidRule(_)));
    }
}
