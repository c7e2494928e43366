use super::*;

pub(crate) mod page_api;
mod trace;
