use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque account identity (beneficiary or factory authority).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Caller-supplied metadata for a fundraiser that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFundraiser {
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub description: String,
    pub beneficiary: Option<Identity>,
}

impl NewFundraiser {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
        beneficiary: impl Into<Identity>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            image_url: image_url.into(),
            description: description.into(),
            beneficiary: Some(beneficiary.into()),
        }
    }
}

/// A single fundraiser. Immutable once created by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fundraiser {
    index: usize,
    name: String,
    url: String,
    image_url: String,
    description: String,
    beneficiary: Identity,
    custodian: Identity,
    created_at: DateTime<Utc>,
}

impl Fundraiser {
    /// Builds the record for slot `index`. Every text field and the beneficiary
    /// must be present and non-blank.
    pub fn create(index: usize, draft: NewFundraiser, custodian: Identity) -> Result<Self> {
        validate_non_empty_string("name", &draft.name)?;
        validate_non_empty_string("url", &draft.url)?;
        validate_non_empty_string("image_url", &draft.image_url)?;
        validate_non_empty_string("description", &draft.description)?;
        let beneficiary = validate_required_field("beneficiary", &draft.beneficiary)?;
        validate_non_empty_string("beneficiary", beneficiary.as_str())?;
        let beneficiary = beneficiary.clone();

        Ok(Self {
            index,
            name: draft.name,
            url: draft.url,
            image_url: draft.image_url,
            description: draft.description,
            beneficiary,
            custodian,
            created_at: Utc::now(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn beneficiary(&self) -> &Identity {
        &self.beneficiary
    }

    /// The factory authority that created this fundraiser.
    pub fn custodian(&self) -> &Identity {
        &self.custodian
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Notification emitted once per successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundraiserCreated {
    pub index: usize,
    pub beneficiary: Identity,
    pub custodian: Identity,
}

impl From<&Fundraiser> for FundraiserCreated {
    fn from(fundraiser: &Fundraiser) -> Self {
        Self {
            index: fundraiser.index(),
            beneficiary: fundraiser.beneficiary().clone(),
            custodian: fundraiser.custodian().clone(),
        }
    }
}
