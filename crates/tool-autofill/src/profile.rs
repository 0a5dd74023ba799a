use std::collections::BTreeMap;

use formfill_core_types::FieldType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(rename = "linkedIn")]
    pub linked_in: String,
    pub website: String,
    pub github: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Professional {
    pub current_title: String,
    pub company: String,
    pub experience: String,
    pub salary: String,
    pub salary_min: String,
    pub salary_max: String,
    pub availability: String,
    pub work_authorization: String,
    pub preferred_location: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Documents {
    pub resume_url: String,
    pub cover_letter_url: String,
}

/// Values the orchestrator writes into detected controls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub personal_info: PersonalInfo,
    pub professional: Professional,
    pub documents: Documents,
}

impl UserProfile {
    /// Profile value for a field type; empty when the profile has none.
    pub fn value_for(&self, field: FieldType) -> &str {
        let p = &self.personal_info;
        let w = &self.professional;
        match field {
            FieldType::FirstName => &p.first_name,
            FieldType::LastName => &p.last_name,
            FieldType::FullName => &p.full_name,
            FieldType::Email => &p.email,
            FieldType::Phone => &p.phone,
            FieldType::Address => &p.address,
            FieldType::City => &p.city,
            FieldType::State => &p.state,
            FieldType::ZipCode => &p.zip_code,
            FieldType::Country => &p.country,
            FieldType::LinkedIn => &p.linked_in,
            FieldType::Website => &p.website,
            FieldType::Github => &p.github,
            FieldType::CurrentTitle => &w.current_title,
            FieldType::Company => &w.company,
            FieldType::Experience => &w.experience,
            FieldType::Salary => &w.salary,
            FieldType::WorkAuthorization => &w.work_authorization,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedProfile {
    pub name: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Named profiles plus the key of the one currently in use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileBook {
    pub current_profile: String,
    pub profiles: BTreeMap<String, NamedProfile>,
}

impl ProfileBook {
    pub fn get(&self, key: &str) -> Option<&NamedProfile> {
        self.profiles.get(key)
    }

    /// The current profile, falling back to the first one by key.
    pub fn active(&self) -> Option<(&str, &NamedProfile)> {
        self.profiles
            .get_key_value(self.current_profile.as_str())
            .or_else(|| self.profiles.iter().next())
            .map(|(key, profile)| (key.as_str(), profile))
    }

    /// Make `key` current; `false` when the book has no such profile.
    pub fn select(&mut self, key: &str) -> bool {
        if self.profiles.contains_key(key) {
            self.current_profile = key.to_string();
            true
        } else {
            false
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
