use std::collections::HashSet;

use super::*;

/// Identifiers of the elements the controller manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub small_stock: String,
    pub medium_stock: String,
    pub large_stock: String,
    pub generic_stock: String,
    pub small_tier: String,
    pub medium_tier: String,
    pub large_tier: String,
    pub delivery_cost: String,
    pub total_cost: String,
    pub shipping_form: String,
    pub sorting_form: String,
    pub users_panel: String,
    pub orders_panel: String,
    pub stock_panel: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            small_stock: "Small Stock".into(),
            medium_stock: "Medium Stock".into(),
            large_stock: "Large Stock".into(),
            generic_stock: "Stock".into(),
            small_tier: "small_stock".into(),
            medium_tier: "medium_stock".into(),
            large_tier: "large_stock".into(),
            delivery_cost: "delivery_cost".into(),
            total_cost: "total_cost".into(),
            shipping_form: "shipping_form".into(),
            sorting_form: "sorting_form".into(),
            users_panel: "users".into(),
            orders_panel: "orders".into(),
            stock_panel: "stock".into(),
        }
    }
}

impl ElementIds {
    pub fn sized_stock(&self, size: SizeTier) -> &str {
        match size {
            SizeTier::Small => &self.small_stock,
            SizeTier::Medium => &self.medium_stock,
            SizeTier::Large => &self.large_stock,
        }
    }

    pub fn size_tier(&self, size: SizeTier) -> &str {
        match size {
            SizeTier::Small => &self.small_tier,
            SizeTier::Medium => &self.medium_tier,
            SizeTier::Large => &self.large_tier,
        }
    }

    pub fn report_panel(&self, tab: ReportTab) -> &str {
        match tab {
            ReportTab::User => &self.users_panel,
            ReportTab::Order => &self.orders_panel,
            ReportTab::Stock => &self.stock_panel,
        }
    }

    fn groups(&self) -> [(&'static str, Vec<&str>); 5] {
        [
            (
                "stock inputs",
                vec![
                    self.small_stock.as_str(),
                    self.medium_stock.as_str(),
                    self.large_stock.as_str(),
                    self.generic_stock.as_str(),
                ],
            ),
            (
                "size tiers",
                SizeTier::ALL.map(|size| self.size_tier(size)).to_vec(),
            ),
            (
                "shipping labels",
                vec![self.delivery_cost.as_str(), self.total_cost.as_str()],
            ),
            (
                "forms",
                vec![self.shipping_form.as_str(), self.sorting_form.as_str()],
            ),
            (
                "report panels",
                ReportTab::ALL.map(|tab| self.report_panel(tab)).to_vec(),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub ids: ElementIds,
    /// Prefix written before amounts in the shipping labels.
    pub currency_prefix: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            currency_prefix: "£".into(),
        }
    }
}

impl ControllerConfig {
    /// Rejects empty identifiers and identifiers repeated within one group.
    pub fn validate(&self) -> Result<()> {
        for (group, ids) in self.ids.groups() {
            let mut seen = HashSet::new();
            for id in ids {
                if id.is_empty() {
                    return Err(Error::Config(format!("{group} contain an empty id")));
                }
                if !seen.insert(id) {
                    return Err(Error::Config(format!("{group} repeat the id {id:?}")));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn format_amount(&self, amount: i64) -> String {
        format!("{}{amount}", self.currency_prefix)
    }
}
