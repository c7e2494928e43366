use std::fmt;
use std::str::FromStr;

use super::*;

/// Presentation state of a managed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Value written to the element's inline `display` property.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Visible => "inline",
            Self::Hidden => "none",
        }
    }

    pub(crate) fn from_css_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("none") {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    pub(crate) fn when(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for SizeTier {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(Error::UnknownToken {
                kind: "size",
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTab {
    User,
    Order,
    Stock,
}

impl ReportTab {
    pub const ALL: [Self; 3] = [Self::User, Self::Order, Self::Stock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Order => "order",
            Self::Stock => "stock",
        }
    }
}

impl FromStr for ReportTab {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "user" => Ok(Self::User),
            "order" => Ok(Self::Order),
            "stock" => Ok(Self::Stock),
            _ => Err(Error::UnknownToken {
                kind: "report tab",
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReportTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery speed. Only `"first"` selects first class; every other token is standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShippingTier {
    First,
    #[default]
    Standard,
}

impl ShippingTier {
    pub fn from_token(token: &str) -> Self {
        if token == "first" {
            Self::First
        } else {
            Self::Standard
        }
    }

    pub fn surcharge(self) -> i64 {
        match self {
            Self::First => 2,
            Self::Standard => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Standard => "second",
        }
    }
}

impl fmt::Display for ShippingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stock inputs a product form shows: one per size, or a single count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockMode {
    Sized,
    #[default]
    Generic,
}

impl StockMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sized => "sized",
            Self::Generic => "generic",
        }
    }
}

impl FromStr for StockMode {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "sized" => Ok(Self::Sized),
            "generic" => Ok(Self::Generic),
            _ => Err(Error::UnknownToken {
                kind: "stock mode",
                token: token.to_string(),
            }),
        }
    }
}
