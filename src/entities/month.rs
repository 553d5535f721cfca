//! Calendar month of a charge period.
//!
//! Stored as its number (1-12) so that ordering in SQL matches calendar order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Month enumeration with a total order `Jan < Feb < ... < Dec`
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "UPPERCASE")]
pub enum Month {
    /// January
    #[sea_orm(num_value = 1)]
    Jan,
    /// February
    #[sea_orm(num_value = 2)]
    Feb,
    /// March
    #[sea_orm(num_value = 3)]
    Mar,
    /// April
    #[sea_orm(num_value = 4)]
    Apr,
    /// May
    #[sea_orm(num_value = 5)]
    May,
    /// June
    #[sea_orm(num_value = 6)]
    Jun,
    /// July
    #[sea_orm(num_value = 7)]
    Jul,
    /// August
    #[sea_orm(num_value = 8)]
    Aug,
    /// September
    #[sea_orm(num_value = 9)]
    Sep,
    /// October
    #[sea_orm(num_value = 10)]
    Oct,
    /// November
    #[sea_orm(num_value = 11)]
    Nov,
    /// December
    #[sea_orm(num_value = 12)]
    Dec,
}

impl Month {
    const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Calendar number, 1 for January through 12 for December.
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Month for a calendar number, `None` outside 1-12.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Three-letter uppercase code, e.g. `"JAN"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Jan => "JAN",
            Self::Feb => "FEB",
            Self::Mar => "MAR",
            Self::Apr => "APR",
            Self::May => "MAY",
            Self::Jun => "JUN",
            Self::Jul => "JUL",
            Self::Aug => "AUG",
            Self::Sep => "SEP",
            Self::Oct => "OCT",
            Self::Nov => "NOV",
            Self::Dec => "DEC",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|month| month.code() == code)
            .ok_or_else(|| format!("unknown month: {s}"))
    }
}
