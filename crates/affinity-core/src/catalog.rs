//! Category Catalog
//!
//! The twelve profile categories and the four elements they group into.
//! Every lookup here is a total function over a closed enum, so adding or
//! removing a category is a compile error everywhere it matters.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LookupError, TeamError};

/// One of the four coarse groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// All elements in canonical order
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    /// The three categories belonging to this element, in canonical order
    pub fn categories(self) -> [Category; 3] {
        match self {
            Element::Fire => [Category::Aries, Category::Leo, Category::Sagittarius],
            Element::Earth => [Category::Taurus, Category::Virgo, Category::Capricorn],
            Element::Air => [Category::Gemini, Category::Libra, Category::Aquarius],
            Element::Water => [Category::Cancer, Category::Scorpio, Category::Pisces],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A member's profile category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Category {
    /// All categories in canonical order; `ALL[c.index()] == c`
    pub const ALL: [Category; 12] = [
        Category::Aries,
        Category::Taurus,
        Category::Gemini,
        Category::Cancer,
        Category::Leo,
        Category::Virgo,
        Category::Libra,
        Category::Scorpio,
        Category::Sagittarius,
        Category::Capricorn,
        Category::Aquarius,
        Category::Pisces,
    ];

    /// Position in the canonical ordering (0..12)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        match self {
            Category::Aries | Category::Leo | Category::Sagittarius => Element::Fire,
            Category::Taurus | Category::Virgo | Category::Capricorn => Element::Earth,
            Category::Gemini | Category::Libra | Category::Aquarius => Element::Air,
            Category::Cancer | Category::Scorpio | Category::Pisces => Element::Water,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Aries => "Aries",
            Category::Taurus => "Taurus",
            Category::Gemini => "Gemini",
            Category::Cancer => "Cancer",
            Category::Leo => "Leo",
            Category::Virgo => "Virgo",
            Category::Libra => "Libra",
            Category::Scorpio => "Scorpio",
            Category::Sagittarius => "Sagittarius",
            Category::Capricorn => "Capricorn",
            Category::Aquarius => "Aquarius",
            Category::Pisces => "Pisces",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Category::Aries => '♈',
            Category::Taurus => '♉',
            Category::Gemini => '♊',
            Category::Cancer => '♋',
            Category::Leo => '♌',
            Category::Virgo => '♍',
            Category::Libra => '♎',
            Category::Scorpio => '♏',
            Category::Sagittarius => '♐',
            Category::Capricorn => '♑',
            Category::Aquarius => '♒',
            Category::Pisces => '♓',
        }
    }

    /// Category for a calendar day (tropical boundaries, year-independent)
    pub fn from_month_day(month: u32, day: u32) -> Result<Self, TeamError> {
        // Validate against a leap year so Feb 29 is accepted
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(TeamError::InvalidDate { month, day });
        }
        Ok(Self::by_month_day(month, day))
    }

    pub fn from_birth_date(date: NaiveDate) -> Self {
        Self::by_month_day(date.month(), date.day())
    }

    // Caller guarantees (month, day) is a real calendar day
    fn by_month_day(month: u32, day: u32) -> Self {
        match (month, day) {
            (3, 21..) | (4, ..=19) => Category::Aries,
            (4, _) | (5, ..=20) => Category::Taurus,
            (5, _) | (6, ..=20) => Category::Gemini,
            (6, _) | (7, ..=22) => Category::Cancer,
            (7, _) | (8, ..=22) => Category::Leo,
            (8, _) | (9, ..=22) => Category::Virgo,
            (9, _) | (10, ..=22) => Category::Libra,
            (10, _) | (11, ..=21) => Category::Scorpio,
            (11, _) | (12, ..=21) => Category::Sagittarius,
            (12, _) | (1, ..=19) => Category::Capricorn,
            (1, _) | (2, ..=18) => Category::Aquarius,
            _ => Category::Pisces,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LookupError::UnknownCategory(s.to_string()))
    }
}
