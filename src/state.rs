//! Form State - The Single Mutable Record
//!
//! One `FormState` per session. Every edit is applied in full or rejected
//! with the state untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::{ComplianceCatalog, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown checklist item: {0}")]
    UnknownItem(ItemId),
}

/// Which template the form is rendered into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentMode {
    BillOfLading,
    #[default]
    TemperatureLog,
}

impl fmt::Display for DocumentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BillOfLading => write!(f, "billOfLading"),
            Self::TemperatureLog => write!(f, "temperatureLog"),
        }
    }
}

/// Receiving spoke for a bill of lading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DestinationCode {
    #[default]
    OttawaSpoke,
    EtobicokeSpoke,
}

impl DestinationCode {
    pub fn label(self) -> &'static str {
        match self {
            Self::OttawaSpoke => "Ottawa Spoke",
            Self::EtobicokeSpoke => "Etobicoke Spoke",
        }
    }
}

/// The frozen set of scalar field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Date,
    Time,
    TrailerNumber,
    Temperature,
    SealNumber,
    SupervisorName,
    Initials,
    DestinationLabel,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        Self::Date,
        Self::Time,
        Self::TrailerNumber,
        Self::Temperature,
        Self::SealNumber,
        Self::SupervisorName,
        Self::Initials,
        Self::DestinationLabel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::TrailerNumber => "trailerNumber",
            Self::Temperature => "temperature",
            Self::SealNumber => "sealNumber",
            Self::SupervisorName => "supervisorName",
            Self::Initials => "initials",
            Self::DestinationLabel => "destinationLabel",
        }
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed setter for one scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Date(String),
    Time(String),
    TrailerNumber(String),
    Temperature(String),
    SealNumber(String),
    SupervisorName(String),
    Initials(String),
    DestinationLabel(String),
}

impl FieldValue {
    pub fn new(name: FieldName, value: impl Into<String>) -> Self {
        let value = value.into();
        match name {
            FieldName::Date => Self::Date(value),
            FieldName::Time => Self::Time(value),
            FieldName::TrailerNumber => Self::TrailerNumber(value),
            FieldName::Temperature => Self::Temperature(value),
            FieldName::SealNumber => Self::SealNumber(value),
            FieldName::SupervisorName => Self::SupervisorName(value),
            FieldName::Initials => Self::Initials(value),
            FieldName::DestinationLabel => Self::DestinationLabel(value),
        }
    }

    pub fn name(&self) -> FieldName {
        match self {
            Self::Date(_) => FieldName::Date,
            Self::Time(_) => FieldName::Time,
            Self::TrailerNumber(_) => FieldName::TrailerNumber,
            Self::Temperature(_) => FieldName::Temperature,
            Self::SealNumber(_) => FieldName::SealNumber,
            Self::SupervisorName(_) => FieldName::SupervisorName,
            Self::Initials(_) => FieldName::Initials,
            Self::DestinationLabel(_) => FieldName::DestinationLabel,
        }
    }
}

/// Scalar field values. No cross-field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub date: String,
    pub time: String,
    pub trailer_number: String,
    pub temperature: String,
    pub seal_number: String,
    pub supervisor_name: String,
    pub initials: String,
    pub destination_label: String,
}

impl FormFields {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Date => &self.date,
            FieldName::Time => &self.time,
            FieldName::TrailerNumber => &self.trailer_number,
            FieldName::Temperature => &self.temperature,
            FieldName::SealNumber => &self.seal_number,
            FieldName::SupervisorName => &self.supervisor_name,
            FieldName::Initials => &self.initials,
            FieldName::DestinationLabel => &self.destination_label,
        }
    }
}

/// One operator edit, as delivered by an input surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum FormEdit {
    #[serde(rename_all = "camelCase")]
    SetField { field: FieldName, value: String },
    #[serde(rename_all = "camelCase")]
    SetMode { mode: DocumentMode },
    #[serde(rename_all = "camelCase")]
    ToggleCheck { item_id: ItemId },
    #[serde(rename_all = "camelCase")]
    SetCheck { item_id: ItemId, passed: bool },
    #[serde(rename_all = "camelCase")]
    SetDestination { destination: DestinationCode },
}

/// Rejected state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Checklist ids {found:?} do not match catalog ids {expected:?}")]
    ChecklistMismatch { expected: Vec<ItemId>, found: Vec<ItemId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFormState")]
pub struct FormState {
    mode: DocumentMode,
    destination: DestinationCode,
    fields: FormFields,
    checklist: BTreeMap<ItemId, bool>,
}

/// Unchecked wire shape of a `FormState` snapshot
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormState {
    mode: DocumentMode,
    destination: DestinationCode,
    fields: FormFields,
    checklist: BTreeMap<ItemId, bool>,
}

impl TryFrom<RawFormState> for FormState {
    type Error = SnapshotError;

    fn try_from(raw: RawFormState) -> Result<Self, Self::Error> {
        let expected: Vec<ItemId> = ComplianceCatalog::new().ids().collect();
        let found: Vec<ItemId> = raw.checklist.keys().copied().collect();
        if found != expected {
            return Err(SnapshotError::ChecklistMismatch { expected, found });
        }
        Ok(Self {
            mode: raw.mode,
            destination: raw.destination,
            fields: raw.fields,
            checklist: raw.checklist,
        })
    }
}

impl FormState {
    /// Fresh state dated today (UTC calendar date)
    pub fn new(catalog: &ComplianceCatalog) -> Self {
        let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
        Self::with_date(catalog, today)
    }

    pub fn with_date(catalog: &ComplianceCatalog, date: impl Into<String>) -> Self {
        Self {
            mode: DocumentMode::default(),
            destination: DestinationCode::default(),
            fields: FormFields {
                date: date.into(),
                destination_label: DestinationCode::EtobicokeSpoke.label().to_string(),
                ..FormFields::default()
            },
            checklist: catalog.ids().map(|id| (id, true)).collect(),
        }
    }

    pub fn mode(&self) -> DocumentMode {
        self.mode
    }

    pub fn destination(&self) -> DestinationCode {
        self.destination
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> &str {
        self.fields.get(name)
    }

    pub fn checklist(&self) -> &BTreeMap<ItemId, bool> {
        &self.checklist
    }

    /// `None` for ids outside the catalog
    pub fn is_passed(&self, item_id: ItemId) -> Option<bool> {
        self.checklist.get(&item_id).copied()
    }

    pub fn set_field(&mut self, value: FieldValue) {
        tracing::debug!(field = %value.name(), "set field");
        let fields = &mut self.fields;
        match value {
            FieldValue::Date(v) => fields.date = v,
            FieldValue::Time(v) => fields.time = v,
            FieldValue::TrailerNumber(v) => fields.trailer_number = v,
            FieldValue::Temperature(v) => fields.temperature = v,
            FieldValue::SealNumber(v) => fields.seal_number = v,
            FieldValue::SupervisorName(v) => fields.supervisor_name = v,
            FieldValue::Initials(v) => fields.initials = v,
            FieldValue::DestinationLabel(v) => fields.destination_label = v,
        }
    }

    /// String-keyed setter for untyped input surfaces
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let name: FieldName = name.parse()?;
        self.set_field(FieldValue::new(name, value));
        Ok(())
    }

    pub fn set_mode(&mut self, mode: DocumentMode) {
        tracing::debug!(%mode, "set mode");
        self.mode = mode;
    }

    pub fn set_destination(&mut self, destination: DestinationCode) {
        tracing::debug!(destination = destination.label(), "set destination");
        self.destination = destination;
    }

    pub fn toggle_check(&mut self, item_id: ItemId) -> Result<bool, FormError> {
        let flag = self.checklist
            .get_mut(&item_id)
            .ok_or(FormError::UnknownItem(item_id))?;
        *flag = !*flag;
        tracing::debug!(item_id, passed = *flag, "toggled check");
        Ok(*flag)
    }

    pub fn set_check(&mut self, item_id: ItemId, passed: bool) -> Result<(), FormError> {
        let flag = self.checklist
            .get_mut(&item_id)
            .ok_or(FormError::UnknownItem(item_id))?;
        *flag = passed;
        tracing::debug!(item_id, passed, "set check");
        Ok(())
    }

    pub fn apply(&mut self, edit: FormEdit) -> Result<(), FormError> {
        match edit {
            FormEdit::SetField { field, value } => self.set_field(FieldValue::new(field, value)),
            FormEdit::SetMode { mode } => self.set_mode(mode),
            FormEdit::ToggleCheck { item_id } => {
                self.toggle_check(item_id)?;
            }
            FormEdit::SetCheck { item_id, passed } => self.set_check(item_id, passed)?,
            FormEdit::SetDestination { destination } => self.set_destination(destination),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FormState {
        FormState::with_date(&ComplianceCatalog::new(), "2024-05-01")
    }

    #[test]
    fn test_defaults() {
        let s = state();
        assert_eq!(s.mode(), DocumentMode::TemperatureLog);
        assert_eq!(s.destination(), DestinationCode::OttawaSpoke);
        assert_eq!(s.field(FieldName::Date), "2024-05-01");
        assert_eq!(s.field(FieldName::DestinationLabel), "Etobicoke Spoke");
        assert_eq!(s.field(FieldName::TrailerNumber), "");
        assert_eq!(s.checklist().len(), 7);
        assert!(s.checklist().values().all(|passed| *passed));
    }

    #[test]
    fn test_new_uses_utc_iso_date() {
        let before = chrono::Utc::now().date_naive();
        let s = FormState::new(&ComplianceCatalog::new());
        let after = chrono::Utc::now().date_naive();

        let date = chrono::NaiveDate::parse_from_str(s.field(FieldName::Date), "%Y-%m-%d").unwrap();
        assert!(date == before || date == after);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut s = state();
        s.toggle_check(3).unwrap();
        s.set_mode(DocumentMode::BillOfLading);

        let json = serde_json::to_string(&s).unwrap();
        let restored: FormState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, s);
    }

    #[test]
    fn test_snapshot_with_foreign_checklist_rejected() {
        let mut value = serde_json::to_value(state()).unwrap();
        value["checklist"] = serde_json::json!({"999": true});

        let err = serde_json::from_value::<FormState>(value).unwrap_err();
        assert!(err.to_string().contains("do not match catalog ids"));
    }

    #[test]
    fn test_snapshot_with_missing_item_rejected() {
        let mut value = serde_json::to_value(state()).unwrap();
        value["checklist"].as_object_mut().unwrap().remove("7");

        assert!(serde_json::from_value::<FormState>(value).is_err());
    }

    #[test]
    fn test_set_field_by_name() {
        let mut s = state();
        s.set_field_by_name("trailerNumber", "T123").unwrap();
        s.set_field_by_name("temperature", "").unwrap();
        assert_eq!(s.field(FieldName::TrailerNumber), "T123");
        assert_eq!(s.field(FieldName::Temperature), "");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut s = state();
        let before = s.clone();
        let err = s.set_field_by_name("trailerNum", "T1").unwrap_err();
        assert_eq!(err, FormError::UnknownField("trailerNum".to_string()));
        assert_eq!(s, before);
    }

    #[test]
    fn test_field_names_round_trip() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>().unwrap(), name);
            assert_eq!(FieldValue::new(name, "x").name(), name);
        }
    }

    #[test]
    fn test_set_mode_keeps_work() {
        let mut s = state();
        s.set_field(FieldValue::TrailerNumber("T9".to_string()));
        s.toggle_check(4).unwrap();

        s.set_mode(DocumentMode::BillOfLading);
        s.set_mode(DocumentMode::TemperatureLog);

        assert_eq!(s.field(FieldName::TrailerNumber), "T9");
        assert_eq!(s.is_passed(4), Some(false));
    }

    #[test]
    fn test_toggle_unknown_item() {
        let mut s = state();
        let before = s.checklist().clone();
        assert_eq!(s.toggle_check(999), Err(FormError::UnknownItem(999)));
        assert_eq!(s.set_check(0, false), Err(FormError::UnknownItem(0)));
        assert_eq!(s.checklist(), &before);
    }

    #[test]
    fn test_destination_independent_of_mode() {
        let mut s = state();
        s.set_destination(DestinationCode::EtobicokeSpoke);
        assert_eq!(s.mode(), DocumentMode::TemperatureLog);
        assert_eq!(s.destination().label(), "Etobicoke Spoke");
    }

    #[test]
    fn test_edit_wire_format() {
        let edits: Vec<FormEdit> = serde_json::from_str(
            r#"[
                {"op": "setField", "field": "sealNumber", "value": "S-1"},
                {"op": "setMode", "mode": "billOfLading"},
                {"op": "toggleCheck", "itemId": 3},
                {"op": "setCheck", "itemId": 6, "passed": false},
                {"op": "setDestination", "destination": "etobicokeSpoke"}
            ]"#,
        ).unwrap();

        let mut s = state();
        for edit in edits {
            s.apply(edit).unwrap();
        }
        assert_eq!(s.field(FieldName::SealNumber), "S-1");
        assert_eq!(s.mode(), DocumentMode::BillOfLading);
        assert_eq!(s.is_passed(3), Some(false));
        assert_eq!(s.is_passed(6), Some(false));
        assert_eq!(s.destination(), DestinationCode::EtobicokeSpoke);
    }

    #[test]
    fn test_unknown_field_name_fails_to_deserialize() {
        let edit = serde_json::from_str::<FormEdit>(r#"{"op": "setField", "field": "color", "value": "red"}"#);
        assert!(edit.is_err());
    }
}
