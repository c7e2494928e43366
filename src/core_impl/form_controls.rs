use super::*;

fn input_type(element: &Element) -> String {
    element
        .attrs
        .get("type")
        .map(|kind| kind.to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

pub(crate) fn is_form_element(dom: &Dom, node_id: NodeId) -> bool {
    dom.tag_name(node_id)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
}

pub(crate) fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    element.tag_name.eq_ignore_ascii_case("input") && input_type(element) == "checkbox"
}

pub(crate) fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    element.tag_name.eq_ignore_ascii_case("input") && input_type(element) == "radio"
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    element.tag_name.eq_ignore_ascii_case("input")
        && matches!(input_type(element).as_str(), "submit" | "image")
}

impl Dom {
    /// Name/value pairs a form submits, in document order.
    pub(crate) fn form_entries(&self, form: NodeId) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for node in self.element_descendants(form) {
            let Some(element) = self.element(node) else {
                continue;
            };
            if element.disabled {
                continue;
            }
            let Some(name) = element.attrs.get("name").filter(|name| !name.is_empty()) else {
                continue;
            };

            match element.tag_name.to_ascii_lowercase().as_str() {
                "input" => match input_type(element).as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => {}
                    "checkbox" | "radio" => {
                        if element.checked {
                            let value = element
                                .attrs
                                .get("value")
                                .cloned()
                                .unwrap_or_else(|| "on".to_string());
                            entries.push((name.clone(), value));
                        }
                    }
                    _ => entries.push((name.clone(), element.value.clone())),
                },
                "select" | "textarea" => entries.push((name.clone(), element.value.clone())),
                _ => {}
            }
        }
        entries
    }

    /// Radios sharing `node_id`'s name inside the same form (or the document).
    pub(crate) fn radio_group_members(&self, node_id: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attr(node_id, "name").filter(|name| !name.is_empty()) else {
            return Vec::new();
        };
        let scope = self.find_ancestor_by_tag(node_id, "form");
        self.element_descendants(scope.unwrap_or(self.root))
            .into_iter()
            .filter(|candidate| {
                *candidate != node_id
                    && is_radio_input(self, *candidate)
                    && self.attr(*candidate, "name").as_deref() == Some(name.as_str())
                    && self.find_ancestor_by_tag(*candidate, "form") == scope
            })
            .collect()
    }
}
