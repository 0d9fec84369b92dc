//! Static facet definitions for every directory section.
//!
//! The catalog is the only authority on which facet keys, values and flags a
//! section accepts. Anything it does not list is dropped by the filter store
//! and the URL decoder.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};


/// A directory section, addressed as `/api/<resource type>` on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    #[default]
    Resources,
    Universities,
    Grants,
    Organizations,
    Bulletins,
    Forum,
    /// Any section this build does not know about. Its catalog is empty.
    Other(String),
}

impl ResourceType {
    /// Sections shown as tabs, in display order.
    pub const SECTIONS: [ResourceType; 6] = [
        ResourceType::Resources,
        ResourceType::Universities,
        ResourceType::Grants,
        ResourceType::Organizations,
        ResourceType::Bulletins,
        ResourceType::Forum,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Resources => "resources",
            Self::Universities => "universities",
            Self::Grants => "grants",
            Self::Organizations => "organizations",
            Self::Bulletins => "bulletins",
            Self::Forum => "forum",
            Self::Other(name) => name.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Resources => "Resource Directory",
            Self::Universities => "Universities",
            Self::Grants => "Grants",
            Self::Organizations => "Organizations",
            Self::Bulletins => "Bulletins",
            Self::Forum => "Forum",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        match value {
            "resources" => Self::Resources,
            "universities" => Self::Universities,
            "grants" => Self::Grants,
            "organizations" => Self::Organizations,
            "bulletins" => Self::Bulletins,
            "forum" => Self::Forum,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// Returned when a facet or flag name is not part of the closed key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown filter key: {}", self.0)
    }
}

impl std::error::Error for UnknownKey {}


/// Multi-valued filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKey {
    State,
    Region,
    Topic,
    Cost,
    Format,
    Program,
    Funder,
    Amount,
    OrgType,
    Source,
    Crop,
}

impl FacetKey {
    pub const ALL: [FacetKey; 11] = [
        FacetKey::State,
        FacetKey::Region,
        FacetKey::Topic,
        FacetKey::Cost,
        FacetKey::Format,
        FacetKey::Program,
        FacetKey::Funder,
        FacetKey::Amount,
        FacetKey::OrgType,
        FacetKey::Source,
        FacetKey::Crop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Region => "region",
            Self::Topic => "topic",
            Self::Cost => "cost",
            Self::Format => "format",
            Self::Program => "program",
            Self::Funder => "funder",
            Self::Amount => "amount",
            Self::OrgType => "org_type",
            Self::Source => "source",
            Self::Crop => "crop",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::Region => "Region",
            Self::Topic => "Topic",
            Self::Cost => "Cost",
            Self::Format => "Format",
            Self::Program => "Program",
            Self::Funder => "Funder",
            Self::Amount => "Award Size",
            Self::OrgType => "Organization Type",
            Self::Source => "Source",
            Self::Crop => "Crop",
        }
    }
}

impl FromStr for FacetKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}


/// Single-valued boolean toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKey {
    HasLocation,
    RollingDeadline,
}

impl FlagKey {
    pub const ALL: [FlagKey; 2] = [FlagKey::HasLocation, FlagKey::RollingDeadline];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HasLocation => "has_location",
            Self::RollingDeadline => "rolling_deadline",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HasLocation => "Has location data",
            Self::RollingDeadline => "Rolling deadline",
        }
    }
}

impl FromStr for FlagKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FacetOption {
    FacetOption { value, label }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetDefinition {
    pub key: FacetKey,
    pub options: &'static [FacetOption],
}

/// The selectable facets and flags of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetCatalog {
    pub facets: &'static [FacetDefinition],
    pub flags: &'static [FlagKey],
}

impl FacetCatalog {
    pub const EMPTY: FacetCatalog = FacetCatalog { facets: &[], flags: &[] };

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty() && self.flags.is_empty()
    }

    pub fn facet(&self, key: FacetKey) -> Option<&'static FacetDefinition> {
        self.facets.iter().find(|facet| facet.key == key)
    }

    pub fn supports_facet(&self, key: FacetKey) -> bool {
        self.facet(key).is_some()
    }

    /// Ordered options for `key`, empty if the section has no such facet.
    pub fn options(&self, key: FacetKey) -> &'static [FacetOption] {
        self.facet(key).map(|facet| facet.options).unwrap_or(&[])
    }

    pub fn is_valid(&self, key: FacetKey, value: &str) -> bool {
        self.options(key).iter().any(|option| option.value == value)
    }

    pub fn label_for(&self, key: FacetKey, value: &str) -> Option<&'static str> {
        self.options(key).iter().find(|option| option.value == value).map(|option| option.label)
    }

    pub fn supports_flag(&self, flag: FlagKey) -> bool {
        self.flags.contains(&flag)
    }
}


const STATES: &[FacetOption] = &[
    opt("CA", "California"),
    opt("OR", "Oregon"),
    opt("WA", "Washington"),
    opt("ID", "Idaho"),
    opt("AZ", "Arizona"),
    opt("CO", "Colorado"),
    opt("TX", "Texas"),
    opt("FL", "Florida"),
    opt("GA", "Georgia"),
    opt("NC", "North Carolina"),
    opt("NY", "New York"),
    opt("PA", "Pennsylvania"),
    opt("MI", "Michigan"),
    opt("WI", "Wisconsin"),
    opt("MN", "Minnesota"),
    opt("IA", "Iowa"),
];

const REGIONS: &[FacetOption] = &[
    opt("northeast", "Northeast"),
    opt("southeast", "Southeast"),
    opt("midwest", "Midwest"),
    opt("great-plains", "Great Plains"),
    opt("southwest", "Southwest"),
    opt("west", "West"),
    opt("pacific-northwest", "Pacific Northwest"),
];

const TOPICS: &[FacetOption] = &[
    opt("soil-health", "Soil health"),
    opt("pest-management", "Pest management"),
    opt("irrigation", "Irrigation and water"),
    opt("marketing", "Marketing and sales"),
    opt("food-safety", "Food safety"),
    opt("organic-certification", "Organic certification"),
    opt("labor", "Farm labor"),
    opt("business-planning", "Business planning"),
];

const COSTS: &[FacetOption] = &[
    opt("free", "Free"),
    opt("paid", "Paid"),
    opt("sliding-scale", "Sliding scale"),
];

const FORMATS: &[FacetOption] = &[
    opt("guide", "Guide"),
    opt("video", "Video"),
    opt("webinar", "Webinar"),
    opt("toolkit", "Toolkit"),
    opt("course", "Course"),
];

const PROGRAMS: &[FacetOption] = &[
    opt("extension", "Cooperative extension"),
    opt("research", "Research station"),
    opt("degree", "Degree program"),
    opt("certificate", "Certificate program"),
];

const FUNDERS: &[FacetOption] = &[
    opt("federal", "Federal"),
    opt("state", "State"),
    opt("private", "Private foundation"),
    opt("nonprofit", "Nonprofit"),
];

const AMOUNTS: &[FacetOption] = &[
    opt("under-10k", "Under $10k"),
    opt("10k-50k", "$10k to $50k"),
    opt("50k-plus", "$50k and up"),
];

const ORG_TYPES: &[FacetOption] = &[
    opt("cooperative", "Cooperative"),
    opt("nonprofit", "Nonprofit"),
    opt("association", "Trade association"),
    opt("government", "Government agency"),
];

const SOURCES: &[FacetOption] = &[
    opt("university", "University"),
    opt("association", "Association"),
    opt("member", "Member submitted"),
    opt("agency", "Government agency"),
];

const CROPS: &[FacetOption] = &[
    opt("tomato", "Tomatoes"),
    opt("lettuce", "Lettuce and greens"),
    opt("berries", "Berries"),
    opt("tree-fruit", "Tree fruit"),
    opt("grapes", "Grapes"),
    opt("nuts", "Tree nuts"),
    opt("grains", "Grains"),
    opt("vegetables", "Mixed vegetables"),
];

const fn facet(key: FacetKey, options: &'static [FacetOption]) -> FacetDefinition {
    FacetDefinition { key, options }
}

const RESOURCES: FacetCatalog = FacetCatalog {
    facets: &[
        facet(FacetKey::Topic, TOPICS),
        facet(FacetKey::Format, FORMATS),
        facet(FacetKey::Cost, COSTS),
        facet(FacetKey::Region, REGIONS),
        facet(FacetKey::State, STATES),
    ],
    flags: &[FlagKey::HasLocation],
};

const UNIVERSITIES: FacetCatalog = FacetCatalog {
    facets: &[
        facet(FacetKey::State, STATES),
        facet(FacetKey::Program, PROGRAMS),
        facet(FacetKey::Topic, TOPICS),
    ],
    flags: &[FlagKey::HasLocation],
};

const GRANTS: FacetCatalog = FacetCatalog {
    facets: &[
        facet(FacetKey::Funder, FUNDERS),
        facet(FacetKey::Amount, AMOUNTS),
        facet(FacetKey::Topic, TOPICS),
        facet(FacetKey::State, STATES),
    ],
    flags: &[FlagKey::RollingDeadline],
};

const ORGANIZATIONS: FacetCatalog = FacetCatalog {
    facets: &[
        facet(FacetKey::OrgType, ORG_TYPES),
        facet(FacetKey::Region, REGIONS),
        facet(FacetKey::State, STATES),
    ],
    flags: &[FlagKey::HasLocation],
};

const BULLETINS: FacetCatalog = FacetCatalog {
    facets: &[
        facet(FacetKey::Topic, TOPICS),
        facet(FacetKey::Crop, CROPS),
        facet(FacetKey::Source, SOURCES),
        facet(FacetKey::Region, REGIONS),
    ],
    flags: &[],
};

const FORUM: FacetCatalog = FacetCatalog {
    facets: &[facet(FacetKey::Topic, TOPICS), facet(FacetKey::Crop, CROPS)],
    flags: &[],
};

static EMPTY_CATALOG: FacetCatalog = FacetCatalog::EMPTY;
static RESOURCES_CATALOG: FacetCatalog = RESOURCES;
static UNIVERSITIES_CATALOG: FacetCatalog = UNIVERSITIES;
static GRANTS_CATALOG: FacetCatalog = GRANTS;
static ORGANIZATIONS_CATALOG: FacetCatalog = ORGANIZATIONS;
static BULLETINS_CATALOG: FacetCatalog = BULLETINS;
static FORUM_CATALOG: FacetCatalog = FORUM;

/// Catalog of `resource_type`; unknown sections get an empty catalog.
pub fn catalog_for(resource_type: &ResourceType) -> &'static FacetCatalog {
    match resource_type {
        ResourceType::Resources => &RESOURCES_CATALOG,
        ResourceType::Universities => &UNIVERSITIES_CATALOG,
        ResourceType::Grants => &GRANTS_CATALOG,
        ResourceType::Organizations => &ORGANIZATIONS_CATALOG,
        ResourceType::Bulletins => &BULLETINS_CATALOG,
        ResourceType::Forum => &FORUM_CATALOG,
        ResourceType::Other(_) => &EMPTY_CATALOG,
    }
}

pub fn options_for(resource_type: &ResourceType, key: FacetKey) -> &'static [FacetOption] {
    catalog_for(resource_type).options(key)
}

pub fn is_valid_facet(resource_type: &ResourceType, key: FacetKey, value: &str) -> bool {
    catalog_for(resource_type).is_valid(key, value)
}

pub fn supports_flag(resource_type: &ResourceType, flag: FlagKey) -> bool {
    catalog_for(resource_type).supports_flag(flag)
}

pub fn flags_for(resource_type: &ResourceType) -> &'static [FlagKey] {
    catalog_for(resource_type).flags
}
