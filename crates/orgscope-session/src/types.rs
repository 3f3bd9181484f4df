//! Session value types
//!
//! Interview settings, contact identifiers, request tickets and the
//! submission payload handed to the interview service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Where the interview takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    /// At the site
    #[default]
    Onsite,
    /// Before the site visit
    Presite,
}

impl InterviewType {
    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Onsite => "onsite",
            Self::Presite => "presite",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onsite" => Ok(Self::Onsite),
            "presite" => Ok(Self::Presite),
            other => Err(format!("unknown interview type: {other}")),
        }
    }
}

/// External contact identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    /// Wrap a raw identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Contacts grouped by numeric role id
pub type ContactMap = BTreeMap<i64, Vec<ContactId>>;

/// Identifies the session state a lookup was started from
///
/// `generation` changes with every tree load; `version` with every change
/// to a lookup input (selection or questionnaire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RequestTicket {
    /// Tree generation
    pub generation: u64,
    /// Input version within the generation
    pub version: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}v{}", self.generation, self.version)
    }
}

/// Inputs of one applicability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    /// Session state the answer belongs to
    pub ticket: RequestTicket,
    /// Active questionnaire
    pub questionnaire_id: i64,
    /// Selected roles, ascending
    pub role_ids: Vec<i64>,
}

/// Inputs of one contact lookup round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    /// Session state the answer belongs to
    pub ticket: RequestTicket,
    /// Selected roles, ascending
    pub role_ids: Vec<i64>,
}

/// Payload handed to the interview service on confirm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Questionnaire the interviews use
    pub questionnaire_id: i64,
    /// Interview setting
    pub interview_type: InterviewType,
    /// Selected roles, ascending
    pub role_ids: Vec<i64>,
    /// Contacts per role; present only for public interviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ContactMap>,
}

/// A lookup answer and the ticket it was requested under
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tagged<T> {
    pub(crate) ticket: RequestTicket,
    pub(crate) value: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_type_round_trips_names() {
        assert_eq!("presite".parse::<InterviewType>().unwrap(), InterviewType::Presite);
        assert_eq!(InterviewType::Onsite.to_string(), "onsite");
        assert!("remote".parse::<InterviewType>().is_err());
    }

    #[test]
    fn submission_omits_contacts_when_private() {
        let submission = Submission {
            questionnaire_id: 7,
            interview_type: InterviewType::Presite,
            role_ids: vec![10, 11],
            contacts: None,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["questionnaireId"], 7);
        assert_eq!(json["interviewType"], "presite");
        assert!(json.get("contacts").is_none());
    }

    #[test]
    fn submission_contacts_keyed_by_role() {
        let submission = Submission {
            questionnaire_id: 7,
            interview_type: InterviewType::Onsite,
            role_ids: vec![10],
            contacts: Some(ContactMap::from([(10, vec![ContactId::from("c-1")])])),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["contacts"]["10"][0], "c-1");
    }
}
