use serde::{Deserialize, Serialize};

use poolquote_core::PoolDimensions;

/// Option groups offered by the configurator, each backed by one catalog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Pool,
    Stairs,
    Technology,
    Lighting,
    Counterflow,
    WaterTreatment,
    Heating,
    Roofing,
}

impl OptionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionCategory::Pool => "pool",
            OptionCategory::Stairs => "stairs",
            OptionCategory::Technology => "technology",
            OptionCategory::Lighting => "lighting",
            OptionCategory::Counterflow => "counterflow",
            OptionCategory::WaterTreatment => "water_treatment",
            OptionCategory::Heating => "heating",
            OptionCategory::Roofing => "roofing",
        }
    }

    /// Catalog category and subcategory an option is looked up in.
    ///
    /// `Pool` has no fixed pair; pool rows are matched by code geometry.
    pub fn catalog_section(self) -> Option<(&'static str, &'static str)> {
        match self {
            OptionCategory::Pool => None,
            OptionCategory::Stairs => Some(("prislusenstvi", "schodiste")),
            OptionCategory::Technology => Some(("technologie", "filtrace")),
            OptionCategory::Lighting => Some(("technologie", "osvetleni")),
            OptionCategory::Counterflow => Some(("technologie", "protiproud")),
            OptionCategory::WaterTreatment => Some(("chemie", "uprava vody")),
            OptionCategory::Heating => Some(("technologie", "ohrev")),
            OptionCategory::Roofing => Some(("zastreseni", "zastreseni")),
        }
    }
}

impl core::fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chosen option value (a catalog code or a tag of the wanted row).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub option: OptionCategory,
    pub value: String,
}

/// Customer contact captured by the wizard. Carried along, never priced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// The configurator's output. Read-only input to quote resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfiguration {
    pub pool: PoolDimensions,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stairs: Option<String>,
    #[serde(default)]
    pub technology: Vec<String>,
    #[serde(default)]
    pub lighting: Option<String>,
    #[serde(default)]
    pub counterflow: Option<String>,
    #[serde(default)]
    pub water_treatment: Option<String>,
    #[serde(default)]
    pub heating: Option<String>,
    #[serde(default)]
    pub roofing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactData>,
}

impl PoolConfiguration {
    pub fn new(pool: PoolDimensions) -> Self {
        Self {
            pool,
            color: None,
            stairs: None,
            technology: Vec::new(),
            lighting: None,
            counterflow: None,
            water_treatment: None,
            heating: None,
            roofing: None,
            contact: None,
        }
    }

    /// Chosen options in a fixed order; blank values and repeats are skipped.
    pub fn selections(&self) -> Vec<Selection> {
        let mut chosen: Vec<(OptionCategory, &String)> = Vec::new();
        chosen.extend(self.stairs.iter().map(|v| (OptionCategory::Stairs, v)));
        chosen.extend(self.technology.iter().map(|v| (OptionCategory::Technology, v)));
        chosen.extend(self.lighting.iter().map(|v| (OptionCategory::Lighting, v)));
        chosen.extend(self.counterflow.iter().map(|v| (OptionCategory::Counterflow, v)));
        chosen.extend(
            self.water_treatment
                .iter()
                .map(|v| (OptionCategory::WaterTreatment, v)),
        );
        chosen.extend(self.heating.iter().map(|v| (OptionCategory::Heating, v)));
        chosen.extend(self.roofing.iter().map(|v| (OptionCategory::Roofing, v)));

        let mut selections: Vec<Selection> = Vec::with_capacity(chosen.len());
        for (option, value) in chosen {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let selection = Selection {
                option,
                value: value.to_string(),
            };
            if !selections.contains(&selection) {
                selections.push(selection);
            }
        }
        selections
    }
}
