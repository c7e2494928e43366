use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;

mod bindings;
mod config;
mod controller;
mod core_dom_utils;
mod core_impl;
mod lib_parts;
mod tokens;
mod view_model;

pub use bindings::{Handler, HandlerArg};
pub use config::{ControllerConfig, ElementIds};
pub use controller::FormDisplayController;
pub use lib_parts::page_api::{FormSubmission, Page};
pub use tokens::{ReportTab, ShippingTier, SizeTier, StockMode, Visibility};
pub use view_model::{ShippingQuote, StorefrontView};

use core_dom_utils::*;
use core_impl::parse_html;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    ElementNotFound(String),
    TypeMismatch {
        id: String,
        expected: String,
        actual: String,
    },
    InvalidTotal(String),
    UnknownToken {
        kind: &'static str,
        token: String,
    },
    HandlerParse(String),
    AssertionFailed {
        id: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::ElementNotFound(id) => write!(f, "element not found: {id}"),
            Self::TypeMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {id}: expected {expected}, actual {actual}"
            ),
            Self::InvalidTotal(text) => write!(f, "total is not an integer: {text:?}"),
            Self::UnknownToken { kind, token } => write!(f, "unknown {kind} token: {token:?}"),
            Self::HandlerParse(msg) => write!(f, "handler parse error: {msg}"),
            Self::AssertionFailed {
                id,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {id}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: HashMap<String, String>,
    value: String,
    checked: bool,
    disabled: bool,
}

#[derive(Debug, Clone)]
struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

#[derive(Debug)]
struct TraceState {
    enabled: bool,
    logs: VecDeque<String>,
    log_limit: usize,
    to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

#[cfg(test)]
mod tests;
