//! Course outline: modules, sections and units.
//!
//! Field names follow the JSON the outline generator returns, so the same
//! types parse model output and round-trip through snapshots.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CourseOutline {
    pub course_title: String,
    #[serde(default)]
    pub course_level_objectives: Vec<String>,
    #[serde(default)]
    pub modules: Vec<OutlineModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutlineModule {
    pub module_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutlineSection {
    pub section_title: String,
    #[serde(default)]
    pub section_level_objectives: Vec<String>,
    #[serde(default)]
    pub units: Vec<OutlineUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutlineUnit {
    pub unit_title: String,
    #[serde(default)]
    pub unit_level_objective: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl CourseOutline {
    pub fn unit_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|module| &module.sections)
            .map(|section| section.units.len())
            .sum()
    }
}
