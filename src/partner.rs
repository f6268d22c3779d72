//! Channel-partner records and the form that collects them.
//!
//! DESIGN
//! ======
//! The three partner categories share the same contact fields and differ
//! only in two category-specific details. Those details are carried as a
//! tagged variant so each category names its own pair; on the worksheet
//! they flatten into the generic `Detail_1` / `Detail_2` columns.
//!
//! The form performs no validation: every field is read as a string and
//! an absent field is an empty string.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::table::Table;

/// Worksheet header, in column order.
pub const PARTNER_COLUMNS: [&str; 10] = [
    "Timestamp",
    "Category",
    "Name",
    "Contact",
    "State",
    "City",
    "Address",
    "Detail_1",
    "Detail_2",
    "Remarks",
];

// =============================================================================
// CATEGORY
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerCategory {
    #[default]
    PrimaryStockist,
    RetailDistributor,
    LogisticsAgent,
}

impl PartnerCategory {
    pub const ALL: [Self; 3] = [Self::PrimaryStockist, Self::RetailDistributor, Self::LogisticsAgent];

    /// Display label, also the value stored in the `Category` column.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PrimaryStockist => "Primary Stockist (SS)",
            Self::RetailDistributor => "Retail Distributor (DB)",
            Self::LogisticsAgent => "Logistics Agent (CFA)",
        }
    }

    /// Short form value used by the category selector.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::PrimaryStockist => "ss",
            Self::RetailDistributor => "db",
            Self::LogisticsAgent => "cfa",
        }
    }

    #[must_use]
    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == raw)
    }

    /// Labels of the two detail inputs shown for this category.
    #[must_use]
    pub fn detail_labels(self) -> (&'static str, &'static str) {
        match self {
            Self::PrimaryStockist => ("Warehousing Capacity (Sq Ft)", "Financial Investment Capacity"),
            Self::RetailDistributor => ("Active Retail Network Size", "Existing Brand Portfolio"),
            Self::LogisticsAgent => ("GSTIN Details", "Fleet Management Details"),
        }
    }
}

// =============================================================================
// DETAILS
// =============================================================================

/// Category-specific pair of details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PartnerDetails {
    PrimaryStockist { warehousing_capacity: String, investment_capacity: String },
    RetailDistributor { retail_network_size: String, brand_portfolio: String },
    LogisticsAgent { gstin: String, fleet_details: String },
}

impl PartnerDetails {
    /// Fill the category's named pair from the two generic form slots.
    #[must_use]
    pub fn from_slots(category: PartnerCategory, detail_1: String, detail_2: String) -> Self {
        match category {
            PartnerCategory::PrimaryStockist => {
                Self::PrimaryStockist { warehousing_capacity: detail_1, investment_capacity: detail_2 }
            }
            PartnerCategory::RetailDistributor => {
                Self::RetailDistributor { retail_network_size: detail_1, brand_portfolio: detail_2 }
            }
            PartnerCategory::LogisticsAgent => Self::LogisticsAgent { gstin: detail_1, fleet_details: detail_2 },
        }
    }

    #[must_use]
    pub fn category(&self) -> PartnerCategory {
        match self {
            Self::PrimaryStockist { .. } => PartnerCategory::PrimaryStockist,
            Self::RetailDistributor { .. } => PartnerCategory::RetailDistributor,
            Self::LogisticsAgent { .. } => PartnerCategory::LogisticsAgent,
        }
    }

    #[must_use]
    pub fn detail_1(&self) -> &str {
        match self {
            Self::PrimaryStockist { warehousing_capacity, .. } => warehousing_capacity,
            Self::RetailDistributor { retail_network_size, .. } => retail_network_size,
            Self::LogisticsAgent { gstin, .. } => gstin,
        }
    }

    #[must_use]
    pub fn detail_2(&self) -> &str {
        match self {
            Self::PrimaryStockist { investment_capacity, .. } => investment_capacity,
            Self::RetailDistributor { brand_portfolio, .. } => brand_portfolio,
            Self::LogisticsAgent { fleet_details, .. } => fleet_details,
        }
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One submitted partner. Has no identifier; identical submissions are
/// indistinguishable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub timestamp: String,
    pub name: String,
    pub contact: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub details: PartnerDetails,
    pub remarks: String,
}

impl PartnerRecord {
    #[must_use]
    pub fn category(&self) -> PartnerCategory {
        self.details.category()
    }

    /// `(column, value)` pairs in worksheet order.
    #[must_use]
    pub fn cells(&self) -> [(&'static str, &str); 10] {
        [
            (PARTNER_COLUMNS[0], self.timestamp.as_str()),
            (PARTNER_COLUMNS[1], self.category().label()),
            (PARTNER_COLUMNS[2], self.name.as_str()),
            (PARTNER_COLUMNS[3], self.contact.as_str()),
            (PARTNER_COLUMNS[4], self.state.as_str()),
            (PARTNER_COLUMNS[5], self.city.as_str()),
            (PARTNER_COLUMNS[6], self.address.as_str()),
            (PARTNER_COLUMNS[7], self.details.detail_1()),
            (PARTNER_COLUMNS[8], self.details.detail_2()),
            (PARTNER_COLUMNS[9], self.remarks.as_str()),
        ]
    }

    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        self.cells().iter().map(|(_, value)| (*value).to_owned()).collect()
    }

    /// Single-row table with the partner header.
    #[must_use]
    pub fn to_table(&self) -> Table {
        Table::from_rows(PARTNER_COLUMNS.iter().map(|c| (*c).to_owned()).collect(), vec![self.to_row()])
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Raw partner form fields as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartnerForm {
    pub name: String,
    pub contact: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub detail_1: String,
    pub detail_2: String,
    pub remarks: String,
}

impl PartnerForm {
    /// Package the fields into a record for `category`. Empty fields stay
    /// empty strings.
    #[must_use]
    pub fn collect(self, category: PartnerCategory, timestamp: String) -> PartnerRecord {
        PartnerRecord {
            timestamp,
            name: self.name,
            contact: self.contact,
            state: self.state,
            city: self.city,
            address: self.address,
            details: PartnerDetails::from_slots(category, self.detail_1, self.detail_2),
            remarks: self.remarks,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Creation time as `YYYY-MM-DD HH:MM`, local time when the offset is
/// known and UTC otherwise.
#[must_use]
pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "partner_test.rs"]
mod tests;
