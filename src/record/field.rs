//! Field names for loan records
//!
//! The known columns are strongly typed; anything else in the source
//! document is carried through as `Field::Other`.

use std::fmt;
use std::str::FromStr;

/// A record field, addressed by its wire name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    LoanId,
    LoanProgram,
    PropertyState,
    PropertyCity,
    OwnershipType,
    PropertyType,
    LoanStatus,
    OriginalInterestRate,
    PropertyOrigValue,
    OriginalLoanBal,
    /// Passthrough attribute not known to the view layer
    Other(String),
}

impl Field {
    /// Every known column, in table order
    pub const KNOWN: [Field; 10] = [
        Field::LoanId,
        Field::LoanProgram,
        Field::PropertyState,
        Field::PropertyCity,
        Field::OwnershipType,
        Field::PropertyType,
        Field::LoanStatus,
        Field::OriginalInterestRate,
        Field::PropertyOrigValue,
        Field::OriginalLoanBal,
    ];

    /// Returns the wire name of this field
    pub fn as_str(&self) -> &str {
        match self {
            Field::LoanId => "LOAN_ID",
            Field::LoanProgram => "LOAN_PROGRAM",
            Field::PropertyState => "PROPERTY_STATE",
            Field::PropertyCity => "PROPERTY_CITY",
            Field::OwnershipType => "OWNERSHIP_TYPE",
            Field::PropertyType => "PROPERTY_TYPE",
            Field::LoanStatus => "LOAN_STATUS",
            Field::OriginalInterestRate => "ORIGINAL_INTEREST_RATE",
            Field::PropertyOrigValue => "PROPERTY_ORIG_VALUE",
            Field::OriginalLoanBal => "ORIGINAL_LOAN_BAL",
            Field::Other(name) => name,
        }
    }

    /// Resolves a wire name. Unknown names become `Field::Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "LOAN_ID" => Field::LoanId,
            "LOAN_PROGRAM" => Field::LoanProgram,
            "PROPERTY_STATE" => Field::PropertyState,
            "PROPERTY_CITY" => Field::PropertyCity,
            "OWNERSHIP_TYPE" => Field::OwnershipType,
            "PROPERTY_TYPE" => Field::PropertyType,
            "LOAN_STATUS" => Field::LoanStatus,
            "ORIGINAL_INTEREST_RATE" => Field::OriginalInterestRate,
            "PROPERTY_ORIG_VALUE" => Field::PropertyOrigValue,
            "ORIGINAL_LOAN_BAL" => Field::OriginalLoanBal,
            other => Field::Other(other.to_string()),
        }
    }

    /// Returns true for one of the declared columns
    pub fn is_known(&self) -> bool {
        !matches!(self, Field::Other(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Field::from_name(s))
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::from_name(name)
    }
}
