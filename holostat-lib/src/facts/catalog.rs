use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One of the six remote catalogs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr, ValueEnum, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Films,
    People,
    Planets,
    Species,
    Vehicles,
    Starships,
}

impl Catalog {
    /// The resource name, used both in API paths and cache file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Path of the collection relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Films => "films/",
            Self::People => "people/",
            Self::Planets => "planets/",
            Self::Species => "species/",
            Self::Vehicles => "vehicles/",
            Self::Starships => "starships/",
        }
    }
}
