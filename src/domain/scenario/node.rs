//! Scenario node - one entry of the scenario menu.

use serde::{Deserialize, Serialize};

use super::ScenarioError;

/// A selectable option shown to the user: the stable key plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub key: String,
    pub visible: String,
}

/// A node in the scenario tree.
///
/// Children are kept in insertion order, which is also display order.
/// An empty child list marks a leaf. Nodes are only built through `new`,
/// so there is no `Deserialize`; documents go through `schema::parse_node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioNode {
    key: String,
    visible: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt_hint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ScenarioNode>,
}

impl ScenarioNode {
    /// Creates a node. A blank key falls back to the label and a blank label
    /// falls back to the key; a node blank in both is rejected by `validate`.
    pub fn new(key: impl Into<String>, visible: impl Into<String>) -> Self {
        let mut key = key.into().trim().to_string();
        let mut visible = visible.into().trim().to_string();
        if key.is_empty() {
            key = visible.clone();
        }
        if visible.is_empty() {
            visible = key.clone();
        }
        Self {
            key,
            visible,
            prompt_hint: None,
            children: Vec::new(),
        }
    }

    /// Creates a node whose label equals its key.
    pub fn leaf(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(key.clone(), key)
    }

    /// Sets the prompt hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        self.prompt_hint = if hint.trim().is_empty() { None } else { Some(hint) };
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: ScenarioNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ScenarioNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn visible(&self) -> &str {
        &self.visible
    }

    pub fn prompt_hint(&self) -> Option<&str> {
        self.prompt_hint.as_deref()
    }

    pub fn children(&self) -> &[ScenarioNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a direct child by key.
    pub fn child(&self, key: &str) -> Option<&ScenarioNode> {
        self.children.iter().find(|c| c.key == key)
    }

    /// Children as display options, in order.
    pub fn options(&self) -> Vec<ScenarioOption> {
        self.children.iter().map(ScenarioNode::as_option).collect()
    }

    pub fn as_option(&self) -> ScenarioOption {
        ScenarioOption {
            key: self.key.clone(),
            visible: self.visible.clone(),
        }
    }

    /// Number of nodes in this subtree, including self.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ScenarioNode::size).sum::<usize>()
    }

    /// Checks the structural contract for this subtree.
    ///
    /// `ancestors` are the keys above this node; a node repeating one of them
    /// would make the menu loop back on itself.
    pub fn validate(&self, ancestors: &mut Vec<String>) -> Result<(), ScenarioError> {
        if self.key.is_empty() && self.visible.is_empty() {
            return Err(ScenarioError::malformed("node has neither key nor label"));
        }
        if ancestors.iter().any(|a| a == &self.key) {
            return Err(ScenarioError::malformed(format!(
                "cycle: '{}' repeats an ancestor key",
                self.key
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for child in &self.children {
            if !seen.insert(child.key.as_str()) {
                return Err(ScenarioError::malformed(format!(
                    "duplicate child key '{}' under '{}'",
                    child.key, self.key
                )));
            }
        }

        ancestors.push(self.key.clone());
        let result = self
            .children
            .iter()
            .try_for_each(|child| child.validate(ancestors));
        ancestors.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn blank_label_falls_back_to_key() {
            let node = ScenarioNode::new("Work", "  ");
            assert_eq!(node.visible(), "Work");
        }

        #[test]
        fn blank_key_falls_back_to_label() {
            let node = ScenarioNode::new("", "Trust issues");
            assert_eq!(node.key(), "Trust issues");
        }

        #[test]
        fn blank_hint_is_dropped() {
            let node = ScenarioNode::leaf("Yes").with_hint("   ");
            assert_eq!(node.prompt_hint(), None);
        }

        #[test]
        fn options_preserve_insertion_order() {
            let node = ScenarioNode::leaf("root")
                .with_child(ScenarioNode::new("b", "Bee"))
                .with_child(ScenarioNode::new("a", "Ay"));
            let keys: Vec<_> = node.options().into_iter().map(|o| o.key).collect();
            assert_eq!(keys, vec!["b", "a"]);
        }

        #[test]
        fn size_counts_every_node() {
            let node = ScenarioNode::leaf("r").with_children([
                ScenarioNode::leaf("a").with_child(ScenarioNode::leaf("a1")),
                ScenarioNode::leaf("b"),
            ]);
            assert_eq!(node.size(), 4);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_well_formed_subtree() {
            let node = ScenarioNode::leaf("r").with_child(ScenarioNode::leaf("a"));
            assert!(node.validate(&mut Vec::new()).is_ok());
        }

        #[test]
        fn rejects_node_without_key_or_label() {
            let node = ScenarioNode::leaf("r").with_child(ScenarioNode::new(" ", ""));
            assert!(matches!(
                node.validate(&mut Vec::new()),
                Err(ScenarioError::MalformedScenario { .. })
            ));
        }

        #[test]
        fn rejects_self_reference() {
            let node = ScenarioNode::leaf("loop").with_child(ScenarioNode::leaf("loop"));
            let err = node.validate(&mut Vec::new()).unwrap_err();
            assert!(err.to_string().contains("cycle"));
        }

        #[test]
        fn rejects_ancestor_reference() {
            let node = ScenarioNode::leaf("a")
                .with_child(ScenarioNode::leaf("b").with_child(ScenarioNode::leaf("a")));
            assert!(node.validate(&mut Vec::new()).is_err());
        }

        #[test]
        fn allows_same_key_in_different_branches() {
            let node = ScenarioNode::leaf("r").with_children([
                ScenarioNode::leaf("a").with_child(ScenarioNode::leaf("Yes")),
                ScenarioNode::leaf("b").with_child(ScenarioNode::leaf("Yes")),
            ]);
            assert!(node.validate(&mut Vec::new()).is_ok());
        }

        #[test]
        fn rejects_duplicate_siblings() {
            let node = ScenarioNode::leaf("r")
                .with_children([ScenarioNode::leaf("x"), ScenarioNode::leaf("x")]);
            let err = node.validate(&mut Vec::new()).unwrap_err();
            assert!(err.to_string().contains("duplicate child key 'x'"));
        }

        #[test]
        fn validation_leaves_ancestor_stack_untouched() {
            let node = ScenarioNode::leaf("r").with_child(ScenarioNode::leaf("a"));
            let mut ancestors = vec!["top".to_string()];
            node.validate(&mut ancestors).unwrap();
            assert_eq!(ancestors, vec!["top".to_string()]);
        }
    }
}
