#![allow(dead_code)]

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the detection and fill crates.
#[derive(Debug, Error, Clone)]
pub enum CoreError {
    #[error("{message}")]
    Message { message: String },
}

impl CoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Handle of a node inside one document. Only meaningful for the document
/// that produced it.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScanId(pub String);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic category a form control can be classified as.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "camelCase"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum FieldType {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
    LinkedIn,
    Website,
    Github,
    CurrentTitle,
    Company,
    Experience,
    Salary,
    WorkAuthorization,
}

impl FieldType {
    pub const ALL: [FieldType; 18] = [
        FieldType::FirstName,
        FieldType::LastName,
        FieldType::FullName,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Address,
        FieldType::City,
        FieldType::State,
        FieldType::ZipCode,
        FieldType::Country,
        FieldType::LinkedIn,
        FieldType::Website,
        FieldType::Github,
        FieldType::CurrentTitle,
        FieldType::Company,
        FieldType::Experience,
        FieldType::Salary,
        FieldType::WorkAuthorization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::FirstName => "firstName",
            FieldType::LastName => "lastName",
            FieldType::FullName => "fullName",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Address => "address",
            FieldType::City => "city",
            FieldType::State => "state",
            FieldType::ZipCode => "zipCode",
            FieldType::Country => "country",
            FieldType::LinkedIn => "linkedIn",
            FieldType::Website => "website",
            FieldType::Github => "github",
            FieldType::CurrentTitle => "currentTitle",
            FieldType::Company => "company",
            FieldType::Experience => "experience",
            FieldType::Salary => "salary",
            FieldType::WorkAuthorization => "workAuthorization",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::new(format!("unknown field type: {s}")))
    }
}

/// Signal channel that first contributed to a detection. Listed in scoring
/// order.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DetectionMethod {
    Autocomplete,
    Type,
    Pattern,
    Label,
    Keyword,
    Placeholder,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Autocomplete => "autocomplete",
            DetectionMethod::Type => "type",
            DetectionMethod::Pattern => "pattern",
            DetectionMethod::Label => "label",
            DetectionMethod::Keyword => "keyword",
            DetectionMethod::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_names_round_trip_through_from_str() {
        for ty in FieldType::ALL {
            assert_eq!(ty.as_str().parse::<FieldType>().unwrap(), ty);
        }
        assert!("nickname".parse::<FieldType>().is_err());
    }

    #[cfg(feature = "serde-full")]
    #[test]
    fn serde_names_match_wire_vocabulary() {
        assert_eq!(
            serde_json::to_string(&FieldType::LinkedIn).unwrap(),
            "\"linkedIn\""
        );
        assert_eq!(
            serde_json::to_string(&FieldType::WorkAuthorization).unwrap(),
            "\"workAuthorization\""
        );
        assert_eq!(
            serde_json::to_string(&DetectionMethod::Autocomplete).unwrap(),
            "\"autocomplete\""
        );
    }
}
