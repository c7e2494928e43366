use super::*;

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let disabled = attrs.contains_key("disabled");
        let element = Element {
            tag_name,
            attrs,
            value,
            checked,
            disabled,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            // First element wins, like getElementById.
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Element descendants of `node_id` in document order, excluding the node itself.
    pub(crate) fn element_descendants(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = self.nodes[node_id.0]
            .children
            .iter()
            .rev()
            .copied()
            .collect::<Vec<_>>();
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document | NodeType::Element(_) => {
                    let mut out = String::new();
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.text_content(*child));
                    }
                    out
                }
                NodeType::Text(text) => text.clone(),
            }
        })
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::TypeMismatch {
                id: self.node_label(node_id),
                expected: "element".into(),
                actual: "text".into(),
            });
        }
        if let &[only] = self.nodes[node_id.0].children.as_slice() {
            if !value.is_empty() {
                if let NodeType::Text(text) = &mut self.nodes[only.0].node_type {
                    text.clear();
                    text.push_str(value);
                    return Ok(());
                }
            }
        }

        // Detached children keep their arena slots until the page is dropped.
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self.element(node_id).ok_or_else(|| Error::TypeMismatch {
            id: self.node_label(node_id),
            expected: "element".into(),
            actual: "text".into(),
        })?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self
            .tag_name(node_id)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("select"))
        {
            return self.set_select_value(node_id, value);
        }

        let label = self.node_label(node_id);
        let element = self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            id: label,
            expected: "element".into(),
            actual: "text".into(),
        })?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.element_descendants(self.root) {
            let Some(tag) = self.tag_name(node).map(str::to_ascii_lowercase) else {
                continue;
            };
            match tag.as_str() {
                "textarea" => {
                    let text = self.text_content(node);
                    if let Some(element) = self.element_mut(node) {
                        element.value = text;
                    }
                }
                "select" => self.sync_select_value(node)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn set_select_value(&mut self, select_node: NodeId, requested: &str) -> Result<()> {
        let options = self.select_options(select_node);
        let mut matched = None;
        for option in &options {
            if matched.is_none() && self.option_effective_value(*option) == requested {
                matched = Some(*option);
            }
        }

        for option in &options {
            if let Some(option_element) = self.element_mut(*option) {
                if Some(*option) == matched {
                    option_element
                        .attrs
                        .insert("selected".to_string(), "true".to_string());
                } else {
                    option_element.attrs.remove("selected");
                }
            }
        }

        let value = matched
            .map(|option| self.option_effective_value(option))
            .unwrap_or_default();
        if let Some(element) = self.element_mut(select_node) {
            element.value = value;
        }
        Ok(())
    }

    fn sync_select_value(&mut self, select_node: NodeId) -> Result<()> {
        let options = self.select_options(select_node);
        let value = options
            .iter()
            .copied()
            .find(|option| self.attr(*option, "selected").is_some())
            .or_else(|| options.first().copied())
            .map(|option| self.option_effective_value(option))
            .unwrap_or_default();
        let label = self.node_label(select_node);
        let element = self
            .element_mut(select_node)
            .ok_or_else(|| Error::TypeMismatch {
                id: label,
                expected: "select".into(),
                actual: "text".into(),
            })?;
        element.value = value;
        Ok(())
    }

    fn select_options(&self, select_node: NodeId) -> Vec<NodeId> {
        self.element_descendants(select_node)
            .into_iter()
            .filter(|node| {
                self.tag_name(*node)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("option"))
            })
            .collect()
    }

    fn option_effective_value(&self, option_node: NodeId) -> String {
        self.attr(option_node, "value")
            .unwrap_or_else(|| self.text_content(option_node).trim().to_string())
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.checked)
    }

    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let label = self.node_label(node_id);
        let element = self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            id: label,
            expected: "element".into(),
            actual: "text".into(),
        })?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.disabled)
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(name).cloned())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, name: &str) -> Result<String> {
        let element = self.element(node_id).ok_or_else(|| Error::TypeMismatch {
            id: self.node_label(node_id),
            expected: "element".into(),
            actual: "text".into(),
        })?;
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        Ok(decls
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default())
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let label = self.node_label(node_id);
        let element = self.element_mut(node_id).ok_or_else(|| Error::TypeMismatch {
            id: label,
            expected: "element".into(),
            actual: "text".into(),
        })?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name.to_string(), value.to_string()));
        }

        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        Ok(())
    }

    fn rebuild_id_index(&mut self) {
        let mut index = HashMap::new();
        for node in self.element_descendants(self.root) {
            if let Some(id) = self.attr(node, "id") {
                index.entry(id).or_insert(node);
            }
        }
        self.id_index = index;
    }

    /// Short label used in errors and trace lines, `#id` when the element has one.
    pub(crate) fn node_label(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => "#document".into(),
            NodeType::Text(_) => "#text".into(),
            NodeType::Element(element) => match element.attrs.get("id") {
                Some(id) => format!("#{id}"),
                None => element.tag_name.clone(),
            },
        }
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => {
                    let mut out = String::new();
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out
                }
                NodeType::Text(text) => escape_html_text_for_serialization(text),
                NodeType::Element(element) => {
                    let mut out = String::new();
                    out.push('<');
                    out.push_str(&element.tag_name);
                    let mut attrs = element.attrs.iter().collect::<Vec<_>>();
                    attrs.sort_by(|(left, _), (right, _)| left.cmp(right));
                    for (k, v) in attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(&escape_html_attr_for_serialization(v));
                        out.push('"');
                    }
                    out.push('>');
                    if is_void_tag(&element.tag_name) {
                        return out;
                    }
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                    out
                }
            }
        })
    }
}
