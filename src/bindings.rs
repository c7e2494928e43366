use std::str::FromStr;
use std::sync::LazyLock;

use fancy_regex::Regex;

use super::*;

static HANDLER_CALL: LazyLock<std::result::Result<Regex, String>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:return\s+)?([A-Za-z_$][\w$]*)\s*\((.*)\)\s*;?\s*$")
        .map_err(|err| err.to_string())
});

static HANDLER_ARG: LazyLock<std::result::Result<Regex, String>> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|(this\.value)|(this)|([+-]?\d+))\s*(?:,|$)"#,
    )
    .map_err(|err| err.to_string())
});

/// Argument of an inline handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerArg {
    Literal(String),
    /// `this.value`: the value of the element the handler is bound to.
    ThisValue,
    /// `this`: the element itself, read through its value.
    This,
}

impl HandlerArg {
    pub fn resolve<'a>(&'a self, this_value: &'a str) -> &'a str {
        match self {
            Self::Literal(value) => value,
            Self::ThisValue | Self::This => this_value,
        }
    }
}

/// A controller operation bound through an `onclick`/`onchange` attribute,
/// e.g. `selectSizeTier(this.value)` or `updateShippingTotal('first', '10')`.
/// The storefront's own function names (`tshirt`, `other`, `change_stock`,
/// `alterTotal`, `submitQuantityForm`, `reportsForm`) parse to the same variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    SelectSizedStock,
    SelectGenericStock,
    SelectSizeTier(HandlerArg),
    /// Without a total argument the displayed total label is used.
    UpdateShippingTotal {
        tier: HandlerArg,
        total: Option<HandlerArg>,
    },
    SubmitNamedForm(HandlerArg),
    SubmitShippingForm,
    SubmitSortingForm,
    SelectReportTab(HandlerArg),
}

impl Handler {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSizedStock => "selectSizedStock",
            Self::SelectGenericStock => "selectGenericStock",
            Self::SelectSizeTier(_) => "selectSizeTier",
            Self::UpdateShippingTotal { .. } => "updateShippingTotal",
            Self::SubmitNamedForm(_) => "submitNamedForm",
            Self::SubmitShippingForm => "submitShippingForm",
            Self::SubmitSortingForm => "submitSortingForm",
            Self::SelectReportTab(_) => "selectReportTab",
        }
    }
}

impl FromStr for Handler {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        let call = compiled(&HANDLER_CALL)?
            .captures(src)
            .map_err(|err| Error::HandlerParse(err.to_string()))?
            .ok_or_else(|| Error::HandlerParse(format!("not a handler call: {src:?}")))?;
        let name = call.get(1).map(|m| m.as_str()).unwrap_or_default();
        let mut args = parse_args(call.get(2).map(|m| m.as_str()).unwrap_or_default())?;

        let count = args.len();
        let arity = |expected: &str| {
            Error::HandlerParse(format!(
                "{name} expects {expected} argument(s), got {count}"
            ))
        };

        let handler = match (name, count) {
            ("selectSizedStock" | "tshirt", 0) => Self::SelectSizedStock,
            ("selectGenericStock" | "other", 0) => Self::SelectGenericStock,
            ("submitShippingForm", 0) => Self::SubmitShippingForm,
            ("submitSortingForm", 0) => Self::SubmitSortingForm,
            ("selectSizeTier" | "change_stock", 1) => Self::SelectSizeTier(args.remove(0)),
            ("submitNamedForm" | "submitQuantityForm", 1) => {
                Self::SubmitNamedForm(args.remove(0))
            }
            ("selectReportTab" | "reportsForm", 1) => Self::SelectReportTab(args.remove(0)),
            ("updateShippingTotal" | "alterTotal", 1 | 2) => {
                let tier = args.remove(0);
                Self::UpdateShippingTotal {
                    tier,
                    total: args.pop(),
                }
            }
            ("selectSizedStock" | "tshirt" | "selectGenericStock" | "other"
            | "submitShippingForm" | "submitSortingForm", _) => return Err(arity("0")),
            ("selectSizeTier" | "change_stock" | "submitNamedForm" | "submitQuantityForm"
            | "selectReportTab" | "reportsForm", _) => {
                return Err(arity("1"));
            }
            ("updateShippingTotal" | "alterTotal", _) => return Err(arity("1 or 2")),
            _ => return Err(Error::HandlerParse(format!("unknown handler: {name}"))),
        };
        Ok(handler)
    }
}

fn compiled(
    pattern: &'static LazyLock<std::result::Result<Regex, String>>,
) -> Result<&'static Regex> {
    pattern
        .as_ref()
        .map_err(|err| Error::HandlerParse(err.clone()))
}

fn parse_args(src: &str) -> Result<Vec<HandlerArg>> {
    let pattern = compiled(&HANDLER_ARG)?;
    let mut args = Vec::new();
    let mut rest = src;

    while !rest.trim().is_empty() {
        let captures = pattern
            .captures(rest)
            .map_err(|err| Error::HandlerParse(err.to_string()))?
            .ok_or_else(|| Error::HandlerParse(format!("invalid handler argument: {rest:?}")))?;

        let arg = if let Some(quoted) = captures.get(1).or_else(|| captures.get(2)) {
            HandlerArg::Literal(unescape(quoted.as_str()))
        } else if captures.get(3).is_some() {
            HandlerArg::ThisValue
        } else if captures.get(4).is_some() {
            HandlerArg::This
        } else if let Some(number) = captures.get(5) {
            HandlerArg::Literal(number.as_str().to_string())
        } else {
            return Err(Error::HandlerParse(format!(
                "invalid handler argument: {rest:?}"
            )));
        };
        args.push(arg);

        let consumed = captures.get(0).map(|m| m.end()).unwrap_or(rest.len());
        let ended_with_comma = rest[..consumed].trim_end().ends_with(',');
        rest = &rest[consumed..];
        if ended_with_comma && rest.trim().is_empty() {
            return Err(Error::HandlerParse("trailing comma in handler call".into()));
        }
    }

    Ok(args)
}

fn unescape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
