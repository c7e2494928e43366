use super::*;
use crate::view_model::{report_visibility, size_tier_visibility, stock_values, stock_visibility};

/// Event-triggered operations that toggle storefront form fields and submit
/// forms. Holds no selection state: every call reads the page as rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDisplayController {
    config: ControllerConfig,
}

impl FormDisplayController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Shows the small/medium/large stock inputs and hides the generic one.
    /// The generic count becomes `0`, the per-size counts become empty.
    pub fn select_sized_stock(&self, page: &mut Page) -> Result<()> {
        self.select_stock_mode(page, StockMode::Sized)
    }

    /// Shows the generic stock input and hides the per-size ones.
    /// The generic count becomes empty, the per-size counts become `0`.
    pub fn select_generic_stock(&self, page: &mut Page) -> Result<()> {
        self.select_stock_mode(page, StockMode::Generic)
    }

    fn select_stock_mode(&self, page: &mut Page, mode: StockMode) -> Result<()> {
        let ids = &self.config.ids;
        let mut values = Vec::new();
        for (id, value) in stock_values(mode, ids) {
            values.push((page.resolve(&id)?, value));
        }

        page.apply_displays(&stock_visibility(mode, ids))?;
        for (node, value) in values {
            page.set_value_node(node, value)?;
        }
        Ok(())
    }

    pub fn select_size_tier(&self, page: &mut Page, size: SizeTier) -> Result<()> {
        page.apply_displays(&size_tier_visibility(size, &self.config.ids))
    }

    /// Token form of [`Self::select_size_tier`]. Anything other than
    /// `small`, `medium` or `large` leaves the page untouched and returns `false`.
    pub fn select_size_tier_token(&self, page: &mut Page, token: &str) -> Result<bool> {
        match token.parse::<SizeTier>() {
            Ok(size) => {
                self.select_size_tier(page, size)?;
                Ok(true)
            }
            Err(_) => {
                page.trace_line(format!("[select] ignored size token {token:?}"));
                Ok(false)
            }
        }
    }

    /// Adds the tier's surcharge to `current_total` and rewrites the delivery
    /// and total labels. The total is re-read from the argument on every call,
    /// so feeding the displayed total back in accumulates the surcharge.
    pub fn update_shipping_total(
        &self,
        page: &mut Page,
        tier: ShippingTier,
        current_total: &str,
    ) -> Result<i64> {
        let ids = &self.config.ids;
        let delivery = page.resolve(&ids.delivery_cost)?;
        let total_label = page.resolve(&ids.total_cost)?;

        let base = self.parse_total(current_total)?;
        let surcharge = tier.surcharge();
        let total = base
            .checked_add(surcharge)
            .ok_or_else(|| Error::InvalidTotal(current_total.to_string()))?;

        page.set_text_node(delivery, &self.config.format_amount(surcharge))?;
        page.set_text_node(total_label, &self.config.format_amount(total))?;
        page.trace_line(format!("[shipping] tier={tier} total {base} -> {total}"));
        Ok(total)
    }

    /// [`Self::update_shipping_total`] fed with the total label as currently displayed.
    pub fn update_shipping_total_from_display(
        &self,
        page: &mut Page,
        tier: ShippingTier,
    ) -> Result<i64> {
        let displayed = page.text(&self.config.ids.total_cost)?;
        self.update_shipping_total(page, tier, &displayed)
    }

    pub fn submit_named_form(&self, page: &mut Page, form_id: &str) -> Result<FormSubmission> {
        let form = page.resolve(form_id)?;
        page.submit_form_node(form)
    }

    pub fn submit_shipping_form(&self, page: &mut Page) -> Result<FormSubmission> {
        self.submit_named_form(page, &self.config.ids.shipping_form)
    }

    pub fn submit_sorting_form(&self, page: &mut Page) -> Result<FormSubmission> {
        self.submit_named_form(page, &self.config.ids.sorting_form)
    }

    pub fn select_report_tab(&self, page: &mut Page, tab: ReportTab) -> Result<()> {
        page.apply_displays(&report_visibility(tab, &self.config.ids))
    }

    /// Token form of [`Self::select_report_tab`]; unknown tokens are ignored.
    pub fn select_report_tab_token(&self, page: &mut Page, token: &str) -> Result<bool> {
        match token.parse::<ReportTab>() {
            Ok(tab) => {
                self.select_report_tab(page, tab)?;
                Ok(true)
            }
            Err(_) => {
                page.trace_line(format!("[select] ignored report tab token {token:?}"));
                Ok(false)
            }
        }
    }

    /// Runs an inline handler; `this_value` is the value of the element it is bound to.
    pub fn run_handler(&self, page: &mut Page, handler: &Handler, this_value: &str) -> Result<()> {
        match handler {
            Handler::SelectSizedStock => self.select_sized_stock(page),
            Handler::SelectGenericStock => self.select_generic_stock(page),
            Handler::SelectSizeTier(size) => self
                .select_size_tier_token(page, size.resolve(this_value))
                .map(|_| ()),
            Handler::UpdateShippingTotal { tier, total } => {
                let tier = ShippingTier::from_token(tier.resolve(this_value));
                match total {
                    Some(total) => {
                        self.update_shipping_total(page, tier, total.resolve(this_value))?
                    }
                    None => self.update_shipping_total_from_display(page, tier)?,
                };
                Ok(())
            }
            Handler::SubmitNamedForm(form_id) => self
                .submit_named_form(page, form_id.resolve(this_value))
                .map(|_| ()),
            Handler::SubmitShippingForm => self.submit_shipping_form(page).map(|_| ()),
            Handler::SubmitSortingForm => self.submit_sorting_form(page).map(|_| ()),
            Handler::SelectReportTab(tab) => self
                .select_report_tab_token(page, tab.resolve(this_value))
                .map(|_| ()),
        }
    }

    fn parse_total(&self, text: &str) -> Result<i64> {
        let trimmed = text.trim_start();
        let unprefixed = trimmed
            .strip_prefix(self.config.currency_prefix.as_str())
            .unwrap_or(trimmed);
        parse_leading_integer(unprefixed).map_err(|_| Error::InvalidTotal(text.to_string()))
    }
}
