use serde::Deserialize;

use crate::error::{Error, Result};
use crate::growth::GrowthParams;
use crate::math::Vec3;

/// YAML input format for a tree description
#[derive(Debug, Deserialize)]
pub struct TreeConfigInput {
    pub tree: TreeMeta,
    pub tables: TablesInput,
    #[serde(default)]
    pub growth: GrowthParams,
}

#[derive(Debug, Deserialize)]
pub struct TreeMeta {
    pub seed: u64,
    pub max_depth: usize,
    #[serde(default = "default_radial_resolution")]
    pub radial_resolution: usize,
    #[serde(default)]
    pub root: Vec3,
}

#[derive(Debug, Deserialize)]
pub struct TablesInput {
    pub stem: Vec<f32>,
    pub branch: Vec<f32>,
}

fn default_radial_resolution() -> usize {
    12
}

/// Parsed and validated description of one tree
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub seed: u64,
    pub max_depth: usize,
    pub radial_resolution: usize,
    pub root: Vec3,
    pub stem_table: Vec<f32>,
    pub branch_table: Vec<f32>,
    pub growth: GrowthParams,
}

impl TreeConfig {
    /// Parse from YAML string and validate before anything is generated
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let input: TreeConfigInput = serde_yaml::from_str(yaml)
            .map_err(|e| Error::configuration(format!("YAML parse error: {}", e)))?;

        let config = Self {
            seed: input.tree.seed,
            max_depth: input.tree.max_depth,
            radial_resolution: input.tree.radial_resolution,
            root: input.tree.root,
            stem_table: input.tables.stem,
            branch_table: input.tables.branch,
            growth: input.growth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.radial_resolution == 0 {
            return Err(Error::configuration("radial_resolution must be positive"));
        }
        if !self.root.is_finite() {
            return Err(Error::configuration("root point must be finite"));
        }
        crate::growth::generator::validate_table("stem", &self.stem_table)?;
        crate::growth::generator::validate_table("branch", &self.branch_table)?;
        Ok(())
    }
}

impl Default for TreeConfig {
    /// The tree shown before any configuration is loaded
    fn default() -> Self {
        Self {
            seed: 42,
            max_depth: 5,
            radial_resolution: 12,
            root: Vec3::ZERO,
            stem_table: vec![1.0, 1.0, 1.0, 0.7, 0.4, 0.0],
            branch_table: vec![0.0, 2.0, 2.5, 2.0, 1.2, 0.6],
            growth: GrowthParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
tree:
  seed: 7
  max_depth: 4
  radial_resolution: 8
tables:
  stem: [1.0, 1.0, 0.8, 0.0]
  branch: [0.0, 2.0, 1.5, 1.0]
growth:
  base_length: 5.0
  lateral_angle: 0.6
"#;

    #[test]
    fn test_parse_yaml() {
        let config = TreeConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.radial_resolution, 8);
        assert_eq!(config.stem_table.len(), 4);
        assert_eq!(config.root, Vec3::ZERO);
    }

    #[test]
    fn test_growth_defaults_fill_missing_fields() {
        let config = TreeConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.growth.base_length, 5.0);
        assert_eq!(config.growth.lateral_angle, 0.6);
        // Not present in the YAML, so defaults apply
        assert_eq!(config.growth.radius_decay, GrowthParams::default().radius_decay);
    }

    #[test]
    fn test_radial_resolution_default() {
        let yaml = r#"
tree:
  seed: 1
  max_depth: 2
tables:
  stem: [1.0]
  branch: [0.0]
"#;
        let config = TreeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.radial_resolution, 12);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let yaml = r#"
tree:
  seed: 1
  max_depth: 2
  radial_resolution: 0
tables:
  stem: [1.0]
  branch: [0.0]
"#;
        let result = TreeConfig::from_yaml(yaml);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative_table_entry() {
        let yaml = r#"
tree:
  seed: 1
  max_depth: 2
tables:
  stem: [1.0, -0.5]
  branch: [0.0]
"#;
        let result = TreeConfig::from_yaml(yaml);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let result = TreeConfig::from_yaml("tree: [not, a, mapping");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TreeConfig::default().validate().is_ok());
    }
}
