use crate::core_impl::{is_checkbox_input, is_form_element, is_radio_input, is_submit_control};

use super::*;

/// A form submitted from the page, captured instead of navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub action: String,
    pub method: String,
    pub entries: Vec<(String, String)>,
}

impl FormSubmission {
    /// First submitted value for `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A rendered storefront page: the element tree the controller acts on,
/// plus the submissions and trace lines produced while acting on it.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) controller: FormDisplayController,
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) last_submitted_form: Option<NodeId>,
    pub(crate) trace_state: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, ControllerConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            controller: FormDisplayController::new(config),
            submissions: Vec::new(),
            last_submitted_form: None,
            trace_state: TraceState::default(),
        })
    }

    pub fn controller(&self) -> &FormDisplayController {
        &self.controller
    }

    pub fn exists(&self, id: &str) -> bool {
        self.dom.by_id(id).is_some()
    }

    pub fn display(&self, id: &str) -> Result<Visibility> {
        let node = self.resolve(id)?;
        Ok(Visibility::from_css_value(&self.dom.style_get(node, "display")?))
    }

    pub fn is_visible(&self, id: &str) -> Result<bool> {
        Ok(self.display(id)? == Visibility::Visible)
    }

    pub fn value(&self, id: &str) -> Result<String> {
        let node = self.resolve(id)?;
        self.dom.value(node)
    }

    pub fn text(&self, id: &str) -> Result<String> {
        let node = self.resolve(id)?;
        Ok(self.dom.text_content(node))
    }

    pub fn checked(&self, id: &str) -> Result<bool> {
        let node = self.resolve(id)?;
        Ok(self.dom.checked(node))
    }

    pub fn set_display(&mut self, id: &str, display: Visibility) -> Result<()> {
        let node = self.resolve(id)?;
        self.set_display_node(node, display)
    }

    pub fn set_value(&mut self, id: &str, value: &str) -> Result<()> {
        let node = self.resolve(id)?;
        self.set_value_node(node, value)
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> Result<()> {
        let node = self.resolve(id)?;
        self.set_text_node(node, text)
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> Result<()> {
        let node = self.resolve(id)?;
        if checked && is_radio_input(&self.dom, node) {
            self.uncheck_other_radios_in_group(node)?;
        }
        self.dom.set_checked(node, checked)
    }

    /// Clicks the element: toggles checkboxes and radios, runs its `onclick`
    /// handler, then `onchange` when the checked state moved, then submits the
    /// owner form for submit buttons, unless a handler already submitted it.
    pub fn click(&mut self, id: &str) -> Result<()> {
        let target = self.resolve(id)?;
        if self.dom.disabled(target) {
            self.trace_line(format!("[click] ignored disabled {}", self.trace_node_label(target)));
            return Ok(());
        }

        let mut changed = false;
        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target);
            self.dom.set_checked(target, !current)?;
            changed = true;
        } else if is_radio_input(&self.dom, target) && !self.dom.checked(target) {
            self.uncheck_other_radios_in_group(target)?;
            self.dom.set_checked(target, true)?;
            changed = true;
        }

        self.last_submitted_form = None;
        self.run_inline_handler(target, "onclick")?;
        if changed {
            self.run_inline_handler(target, "onchange")?;
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                if self.last_submitted_form == Some(form) {
                    self.trace_line(format!(
                        "[submit] {} already submitted by handler",
                        self.trace_node_label(form)
                    ));
                } else {
                    self.submit_form_node(form)?;
                }
            }
        }
        Ok(())
    }

    /// Sets the control's value the way a user would, then runs its `onchange` handler.
    pub fn change(&mut self, id: &str, value: &str) -> Result<()> {
        let target = self.resolve(id)?;
        if self.dom.disabled(target) {
            self.trace_line(format!("[change] ignored disabled {}", self.trace_node_label(target)));
            return Ok(());
        }
        self.set_value_node(target, value)?;
        self.run_inline_handler(target, "onchange")
    }

    /// Submits the form with this id, or the form owning the control with this id.
    pub fn submit(&mut self, id: &str) -> Result<FormSubmission> {
        let target = self.resolve(id)?;
        let form = if is_form_element(&self.dom, target) {
            target
        } else {
            self.dom
                .find_ancestor_by_tag(target, "form")
                .ok_or_else(|| Error::TypeMismatch {
                    id: id.to_string(),
                    expected: "form or form control".into(),
                    actual: self.dom.tag_name(target).unwrap_or("#text").to_string(),
                })?
        };
        self.submit_form_node(form)
    }

    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }

    pub fn take_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.submissions)
    }

    pub fn assert_text(&self, id: &str, expected: &str) -> Result<()> {
        let target = self.resolve(id)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(self.assertion_failed(id, target, expected, &actual));
        }
        Ok(())
    }

    pub fn assert_value(&self, id: &str, expected: &str) -> Result<()> {
        let target = self.resolve(id)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(self.assertion_failed(id, target, expected, &actual));
        }
        Ok(())
    }

    pub fn assert_visible(&self, id: &str) -> Result<()> {
        self.assert_display(id, Visibility::Visible)
    }

    pub fn assert_hidden(&self, id: &str) -> Result<()> {
        self.assert_display(id, Visibility::Hidden)
    }

    pub fn dump_dom(&self, id: &str) -> Result<String> {
        let target = self.resolve(id)?;
        Ok(self.dom.dump_node(target))
    }

    fn assert_display(&self, id: &str, expected: Visibility) -> Result<()> {
        let target = self.resolve(id)?;
        let actual = self.display(id)?;
        if actual != expected {
            return Err(self.assertion_failed(
                id,
                target,
                &format!("{expected:?}"),
                &format!("{actual:?}"),
            ));
        }
        Ok(())
    }

    fn assertion_failed(&self, id: &str, target: NodeId, expected: &str, actual: &str) -> Error {
        Error::AssertionFailed {
            id: id.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: truncate_chars(&self.dom.dump_node(target), 200),
        }
    }

    pub(crate) fn resolve(&self, id: &str) -> Result<NodeId> {
        self.dom
            .by_id(id)
            .ok_or_else(|| Error::ElementNotFound(id.to_string()))
    }

    pub(crate) fn set_display_node(&mut self, node: NodeId, display: Visibility) -> Result<()> {
        self.dom.style_set(node, "display", display.css_value())?;
        self.trace_line(format!(
            "[display] {} {}",
            self.trace_node_label(node),
            display.css_value()
        ));
        Ok(())
    }

    /// Resolves every id before touching any of them, so a missing element
    /// leaves the page unchanged.
    pub(crate) fn apply_displays(&mut self, displays: &[(String, Visibility)]) -> Result<()> {
        let mut resolved = Vec::with_capacity(displays.len());
        for (id, display) in displays {
            resolved.push((self.resolve(id)?, *display));
        }
        for (node, display) in resolved {
            self.set_display_node(node, display)?;
        }
        Ok(())
    }

    pub(crate) fn set_value_node(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.dom.set_value(node, value)?;
        self.trace_line(format!("[value] {} {value:?}", self.trace_node_label(node)));
        Ok(())
    }

    pub(crate) fn set_text_node(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.dom.set_text_content(node, text)?;
        self.trace_line(format!("[text] {} {text:?}", self.trace_node_label(node)));
        Ok(())
    }

    pub(crate) fn submit_form_node(&mut self, node: NodeId) -> Result<FormSubmission> {
        if !is_form_element(&self.dom, node) {
            return Err(Error::TypeMismatch {
                id: self.trace_node_label(node),
                expected: "form".into(),
                actual: self.dom.tag_name(node).unwrap_or("#text").to_string(),
            });
        }

        let submission = FormSubmission {
            form_id: self.dom.attr(node, "id"),
            action: self.dom.attr(node, "action").unwrap_or_default(),
            method: self
                .dom
                .attr(node, "method")
                .map(|method| method.to_ascii_lowercase())
                .unwrap_or_else(|| "get".to_string()),
            entries: self.dom.form_entries(node),
        };
        self.trace_line(format!(
            "[submit] {} {} {:?} entries={}",
            self.trace_node_label(node),
            submission.method,
            submission.action,
            submission.entries.len()
        ));
        self.submissions.push(submission.clone());
        self.last_submitted_form = Some(node);
        Ok(submission)
    }

    fn uncheck_other_radios_in_group(&mut self, node: NodeId) -> Result<()> {
        for other in self.dom.radio_group_members(node) {
            self.dom.set_checked(other, false)?;
        }
        Ok(())
    }

    fn run_inline_handler(&mut self, node: NodeId, attr: &str) -> Result<()> {
        let Some(source) = self.dom.attr(node, attr) else {
            return Ok(());
        };
        if source.trim().is_empty() {
            return Ok(());
        }

        let handler = source.parse::<Handler>()?;
        let this_value = self.dom.value(node)?;
        self.trace_line(format!(
            "[handler] {} {attr}={}",
            self.trace_node_label(node),
            handler.name()
        ));
        let controller = self.controller.clone();
        controller.run_handler(self, &handler, &this_value)
    }
}
