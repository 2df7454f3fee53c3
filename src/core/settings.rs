//! # Settings Screen State
//!
//! Edits live entirely in memory: the screen mounts with fixed defaults and
//! whatever the user changes is gone after navigating away. Saving goes
//! through the `SettingsStore` collaborator, whose default implementation
//! is just as forgetful — durable stores are the plug-in point.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlucoseUnit {
    MgDl,
    MmolL,
}

impl GlucoseUnit {
    pub fn label(&self) -> &'static str {
        match self {
            GlucoseUnit::MgDl => "mg/dL",
            GlucoseUnit::MmolL => "mmol/L",
        }
    }

    pub fn toggle(&self) -> GlucoseUnit {
        match self {
            GlucoseUnit::MgDl => GlucoseUnit::MmolL,
            GlucoseUnit::MmolL => GlucoseUnit::MgDl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataRetention {
    ThreeMonths,
    SixMonths,
    OneYear,
    Forever,
}

impl DataRetention {
    pub fn label(&self) -> &'static str {
        match self {
            DataRetention::ThreeMonths => "3 months",
            DataRetention::SixMonths => "6 months",
            DataRetention::OneYear => "1 year",
            DataRetention::Forever => "forever",
        }
    }

    pub fn next(&self) -> DataRetention {
        match self {
            DataRetention::ThreeMonths => DataRetention::SixMonths,
            DataRetention::SixMonths => DataRetention::OneYear,
            DataRetention::OneYear => DataRetention::Forever,
            DataRetention::Forever => DataRetention::ThreeMonths,
        }
    }
}

/// Target band bounds, kept as entered (numeric strings, not validated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub api_key: String,
    pub dark_mode: bool,
    pub notifications: bool,
    pub glucose_unit: GlucoseUnit,
    pub target_range: TargetRange,
    pub emergency_contact: String,
    pub data_retention: DataRetention,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            dark_mode: true,
            notifications: true,
            glucose_unit: GlucoseUnit::MgDl,
            target_range: TargetRange { min: "70".to_string(), max: "180".to_string() },
            emergency_contact: String::new(),
            data_retention: DataRetention::SixMonths,
        }
    }
}

/// Which editable text field of the settings form an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ApiKey,
    TargetMin,
    TargetMax,
    EmergencyContact,
}

#[derive(Default)]
pub struct SettingsState {
    pub settings: AppSettings,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::ApiKey => &self.settings.api_key,
            SettingsField::TargetMin => &self.settings.target_range.min,
            SettingsField::TargetMax => &self.settings.target_range.max,
            SettingsField::EmergencyContact => &self.settings.emergency_contact,
        }
    }

    pub fn field_mut(&mut self, field: SettingsField) -> &mut String {
        match field {
            SettingsField::ApiKey => &mut self.settings.api_key,
            SettingsField::TargetMin => &mut self.settings.target_range.min,
            SettingsField::TargetMax => &mut self.settings.target_range.max,
            SettingsField::EmergencyContact => &mut self.settings.emergency_contact,
        }
    }

    pub fn set_field(&mut self, field: SettingsField, value: String) {
        *self.field_mut(field) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert!(settings.api_key.is_empty());
        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert_eq!(settings.glucose_unit, GlucoseUnit::MgDl);
        assert_eq!(settings.target_range.min, "70");
        assert_eq!(settings.target_range.max, "180");
        assert_eq!(settings.data_retention, DataRetention::SixMonths);
    }

    #[test]
    fn test_field_edits_are_unconditional() {
        let mut state = SettingsState::new();
        state.set_field(SettingsField::TargetMin, "not a number".to_string());
        assert_eq!(state.settings.target_range.min, "not a number");

        state.set_field(SettingsField::ApiKey, "sk-demo-123".to_string());
        assert_eq!(state.settings.api_key, "sk-demo-123");
    }

    #[test]
    fn test_retention_cycle_wraps() {
        let mut r = DataRetention::ThreeMonths;
        for expected in [
            DataRetention::SixMonths,
            DataRetention::OneYear,
            DataRetention::Forever,
            DataRetention::ThreeMonths,
        ] {
            r = r.next();
            assert_eq!(r, expected);
        }
    }

    #[test]
    fn test_unit_toggle() {
        assert_eq!(GlucoseUnit::MgDl.toggle(), GlucoseUnit::MmolL);
        assert_eq!(GlucoseUnit::MmolL.toggle(), GlucoseUnit::MgDl);
        assert_eq!(GlucoseUnit::MmolL.label(), "mmol/L");
    }
}
