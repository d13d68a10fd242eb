use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

pub const SKILL_SEPARATOR: &str = ", ";

/// One posting as the listing API returns it. Only the consumed fields are modeled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosting {
    pub company_name: String,
    pub locations: Vec<String>,
    pub job_category: String,
    pub tech_stacks: Vec<String>,
}

/// Export-ready posting. `skill` is the tech stack joined with `", "`.
///
/// Missing fields deserialize as empty strings so that hand-edited or older
/// record files still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatRecord {
    pub company_name: String,
    pub location: String,
    pub job_category: String,
    pub skill: String,
}

impl FlatRecord {
    /// Individual skill tokens, empty ones dropped.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skill
            .split(SKILL_SEPARATOR)
            .filter(|token| !token.is_empty())
    }
}

impl TryFrom<RawPosting> for FlatRecord {
    type Error = NormalizeError;

    /// Takes the first location only. A posting with no locations is rejected
    /// rather than given a placeholder.
    fn try_from(raw: RawPosting) -> Result<Self, Self::Error> {
        let location = match raw.locations.into_iter().next() {
            Some(loc) => loc,
            None => {
                return Err(NormalizeError::EmptyLocations {
                    company: raw.company_name,
                })
            }
        };

        Ok(FlatRecord {
            company_name: raw.company_name,
            location,
            job_category: raw.job_category,
            skill: raw.tech_stacks.join(SKILL_SEPARATOR),
        })
    }
}
