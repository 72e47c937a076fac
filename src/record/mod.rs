//! Loan record model
//!
//! Records are open-schema documents. The columns the view layer knows
//! about are typed fields; everything else is kept in a passthrough map
//! so free-text search still sees it.
//!
//! # Invariants
//!
//! - Every record carries a `LOAN_ID`, used as its stable key
//! - Records are immutable once part of a snapshot

mod field;
mod snapshot;
mod value;

pub use field::Field;
pub use snapshot::RecordSnapshot;
pub use value::{FieldValue, ValueRef};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable record key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LoanId(String);

impl LoanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LoanId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Some feeds emit numeric ids; keep their string form.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => LoanId(s),
            RawId::Int(n) => LoanId(n.to_string()),
            RawId::Float(n) => LoanId(n.to_string()),
        })
    }
}

/// Keeps an explicit `null` as `Some(FieldValue::Null)`; absence is `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FieldValue>, D::Error> {
    FieldValue::deserialize(deserializer).map(Some)
}

/// A single loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(rename = "LOAN_ID")]
    pub id: LoanId,
    #[serde(
        rename = "LOAN_PROGRAM",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub program: Option<FieldValue>,
    #[serde(
        rename = "PROPERTY_STATE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<FieldValue>,
    #[serde(
        rename = "PROPERTY_CITY",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<FieldValue>,
    #[serde(
        rename = "OWNERSHIP_TYPE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub ownership_type: Option<FieldValue>,
    #[serde(
        rename = "PROPERTY_TYPE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_type: Option<FieldValue>,
    #[serde(
        rename = "LOAN_STATUS",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<FieldValue>,
    #[serde(
        rename = "ORIGINAL_INTEREST_RATE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_rate: Option<FieldValue>,
    #[serde(
        rename = "PROPERTY_ORIG_VALUE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_value: Option<FieldValue>,
    #[serde(
        rename = "ORIGINAL_LOAN_BAL",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_balance: Option<FieldValue>,
    /// Unrecognized attributes, keyed by wire name
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl LoanRecord {
    /// Creates a record with only an id set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: LoanId::new(id),
            program: None,
            state: None,
            city: None,
            ownership_type: None,
            property_type: None,
            status: None,
            interest_rate: None,
            original_value: None,
            original_balance: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style setter addressing a field by name
    pub fn with(mut self, field: impl Into<Field>, value: impl Into<FieldValue>) -> Self {
        self.set(field.into(), value.into());
        self
    }

    /// Sets a field. Setting `LOAN_ID` replaces the id with the value's text form.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let slot = match field {
            Field::LoanId => {
                self.id = LoanId(value.to_string());
                return;
            }
            Field::LoanProgram => &mut self.program,
            Field::PropertyState => &mut self.state,
            Field::PropertyCity => &mut self.city,
            Field::OwnershipType => &mut self.ownership_type,
            Field::PropertyType => &mut self.property_type,
            Field::LoanStatus => &mut self.status,
            Field::OriginalInterestRate => &mut self.interest_rate,
            Field::PropertyOrigValue => &mut self.original_value,
            Field::OriginalLoanBal => &mut self.original_balance,
            Field::Other(name) => {
                self.extra.insert(name, value);
                return;
            }
        };
        *slot = Some(value);
    }

    /// Looks up a field value. Missing fields return `None`.
    pub fn get(&self, field: &Field) -> Option<ValueRef<'_>> {
        let slot = match field {
            Field::LoanId => return Some(ValueRef::Text(self.id.as_str())),
            Field::LoanProgram => &self.program,
            Field::PropertyState => &self.state,
            Field::PropertyCity => &self.city,
            Field::OwnershipType => &self.ownership_type,
            Field::PropertyType => &self.property_type,
            Field::LoanStatus => &self.status,
            Field::OriginalInterestRate => &self.interest_rate,
            Field::PropertyOrigValue => &self.original_value,
            Field::OriginalLoanBal => &self.original_balance,
            Field::Other(name) => return self.extra.get(name).map(FieldValue::as_value_ref),
        };
        slot.as_ref().map(FieldValue::as_value_ref)
    }

    /// Every present field with its wire name: known columns first, then
    /// passthrough attributes in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, ValueRef<'_>)> {
        let known = [
            ("LOAN_PROGRAM", &self.program),
            ("PROPERTY_STATE", &self.state),
            ("PROPERTY_CITY", &self.city),
            ("OWNERSHIP_TYPE", &self.ownership_type),
            ("PROPERTY_TYPE", &self.property_type),
            ("LOAN_STATUS", &self.status),
            ("ORIGINAL_INTEREST_RATE", &self.interest_rate),
            ("PROPERTY_ORIG_VALUE", &self.original_value),
            ("ORIGINAL_LOAN_BAL", &self.original_balance),
        ];

        std::iter::once(("LOAN_ID", ValueRef::Text(self.id.as_str())))
            .chain(
                known
                    .into_iter()
                    .filter_map(|(name, slot)| slot.as_ref().map(|v| (name, v.as_value_ref()))),
            )
            .chain(
                self.extra
                    .iter()
                    .map(|(name, v)| (name.as_str(), v.as_value_ref())),
            )
    }
}
