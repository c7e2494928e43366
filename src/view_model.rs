use super::*;

pub(crate) fn stock_visibility(mode: StockMode, ids: &ElementIds) -> Vec<(String, Visibility)> {
    let sized = mode == StockMode::Sized;
    let mut out = vec![(ids.generic_stock.clone(), Visibility::when(!sized))];
    for size in SizeTier::ALL {
        out.push((ids.sized_stock(size).to_string(), Visibility::when(sized)));
    }
    out
}

/// Field values a stock mode resets: the hidden inputs read `0`, the shown ones empty.
pub(crate) fn stock_values(mode: StockMode, ids: &ElementIds) -> Vec<(String, &'static str)> {
    let (generic_value, sized_value) = match mode {
        StockMode::Sized => ("0", ""),
        StockMode::Generic => ("", "0"),
    };
    let mut out = vec![(ids.generic_stock.clone(), generic_value)];
    for size in SizeTier::ALL {
        out.push((ids.sized_stock(size).to_string(), sized_value));
    }
    out
}

pub(crate) fn size_tier_visibility(selected: SizeTier, ids: &ElementIds) -> Vec<(String, Visibility)> {
    SizeTier::ALL
        .iter()
        .map(|size| (ids.size_tier(*size).to_string(), Visibility::when(*size == selected)))
        .collect()
}

pub(crate) fn report_visibility(selected: ReportTab, ids: &ElementIds) -> Vec<(String, Visibility)> {
    ReportTab::ALL
        .iter()
        .map(|tab| (ids.report_panel(*tab).to_string(), Visibility::when(*tab == selected)))
        .collect()
}

/// Order total before delivery plus the chosen tier. The total is always
/// recomputed from `base_total`, so switching tiers re-bases instead of adding up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingQuote {
    pub base_total: i64,
    pub tier: ShippingTier,
}

impl ShippingQuote {
    pub fn new(base_total: i64, tier: ShippingTier) -> Self {
        Self { base_total, tier }
    }

    pub fn surcharge(&self) -> i64 {
        self.tier.surcharge()
    }

    pub fn total(&self) -> i64 {
        self.base_total.saturating_add(self.surcharge())
    }
}

/// Selection state of a storefront page held explicitly, with visibility
/// derived from it. Sections left as `None` are not managed by this view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontView {
    pub stock_mode: Option<StockMode>,
    pub size_tier: Option<SizeTier>,
    pub report_tab: Option<ReportTab>,
    pub shipping: Option<ShippingQuote>,
}

impl StorefrontView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock_mode(mut self, mode: StockMode) -> Self {
        self.stock_mode = Some(mode);
        self
    }

    pub fn with_size_tier(mut self, size: SizeTier) -> Self {
        self.size_tier = Some(size);
        self
    }

    pub fn with_report_tab(mut self, tab: ReportTab) -> Self {
        self.report_tab = Some(tab);
        self
    }

    pub fn with_shipping(mut self, base_total: i64, tier: ShippingTier) -> Self {
        self.shipping = Some(ShippingQuote::new(base_total, tier));
        self
    }

    /// Changes the shipping tier, keeping the base total. Without a quote
    /// yet, the base total starts at zero.
    pub fn select_shipping_tier(&mut self, tier: ShippingTier) {
        let base_total = self.shipping.map(|quote| quote.base_total).unwrap_or(0);
        self.shipping = Some(ShippingQuote::new(base_total, tier));
    }

    /// Visibility of every managed element, in a stable order.
    pub fn visibility(&self, ids: &ElementIds) -> Vec<(String, Visibility)> {
        let mut out = Vec::new();
        if let Some(mode) = self.stock_mode {
            out.extend(stock_visibility(mode, ids));
        }
        if let Some(size) = self.size_tier {
            out.extend(size_tier_visibility(size, ids));
        }
        if let Some(tab) = self.report_tab {
            out.extend(report_visibility(tab, ids));
        }
        out
    }

    /// Delivery and total label text, when a quote is held.
    pub fn shipping_labels(&self, config: &ControllerConfig) -> Option<(String, String)> {
        self.shipping.map(|quote| {
            (
                config.format_amount(quote.surcharge()),
                config.format_amount(quote.total()),
            )
        })
    }

    /// Writes the view onto the page: visibility, stock field resets and
    /// shipping labels. Every id is resolved first. Rendering the same view twice leaves
    /// the page as rendering it once.
    pub fn render(&self, page: &mut Page) -> Result<()> {
        let config = page.controller().config().clone();
        let mut values = Vec::new();
        if let Some(mode) = self.stock_mode {
            for (id, value) in stock_values(mode, &config.ids) {
                values.push((page.resolve(&id)?, value));
            }
        }
        let labels = match self.shipping_labels(&config) {
            Some(labels) => Some((
                page.resolve(&config.ids.delivery_cost)?,
                page.resolve(&config.ids.total_cost)?,
                labels,
            )),
            None => None,
        };

        page.apply_displays(&self.visibility(&config.ids))?;
        for (node, value) in values {
            page.set_value_node(node, value)?;
        }
        if let Some((delivery_node, total_node, (delivery, total))) = labels {
            page.set_text_node(delivery_node, &delivery)?;
            page.set_text_node(total_node, &total)?;
        }
        Ok(())
    }
}
