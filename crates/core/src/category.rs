//! Category type rules.
//!
//! A category is shown on the price list (`service`), in the portfolio
//! gallery (`portfolio`), or in both places (`both`). Listing by type always
//! includes `both` categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where a category is used on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Portfolio,
    Service,
    Both,
}

/// All valid category type names, in display order.
pub const VALID_CATEGORY_TYPES: &[&str] = &["portfolio", "service", "both"];

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Portfolio => "portfolio",
            CategoryType::Service => "service",
            CategoryType::Both => "both",
        }
    }

    /// Whether a category of this type should appear when listing by `filter`.
    ///
    /// `both` matches every filter; a `both` filter matches only `both`.
    pub fn matches(self, filter: CategoryType) -> bool {
        self == filter || self == CategoryType::Both
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portfolio" => Ok(CategoryType::Portfolio),
            "service" => Ok(CategoryType::Service),
            "both" => Ok(CategoryType::Both),
            other => Err(CoreError::field(
                "type",
                format!(
                    "Недопустимый тип категории '{other}'. Допустимые значения: {}",
                    VALID_CATEGORY_TYPES.join(", ")
                ),
            )),
        }
    }
}

impl TryFrom<String> for CategoryType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
