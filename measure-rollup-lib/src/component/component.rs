use super::ComponentType;
use compact_str::CompactString;

/// A node of the component tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    key: CompactString,
    component_type: ComponentType,
    children: Vec<Self>,
}

impl Component {
    #[must_use]
    pub fn new(key: impl Into<CompactString>, component_type: ComponentType) -> Self {
        Self {
            key: key.into(),
            component_type,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Visit this component and all its descendants, parents before children
    pub fn walk_pre_order<'a>(&'a self, visitor: &mut impl FnMut(&'a Self, usize)) {
        self.walk_pre_order_at(0, visitor);
    }

    fn walk_pre_order_at<'a>(&'a self, depth: usize, visitor: &mut impl FnMut(&'a Self, usize)) {
        visitor(self, depth);
        for child in &self.children {
            child.walk_pre_order_at(depth + 1, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_pre_order() {
        let tree = Component::new("p", ComponentType::Project).with_children([
            Component::new("p:src", ComponentType::Directory).with_children([Component::new("p:src/a.rs", ComponentType::File)]),
            Component::new("p:b.rs", ComponentType::File),
        ]);

        let mut visited = Vec::new();
        tree.walk_pre_order(&mut |component, depth| visited.push((component.key().to_string(), depth)));

        assert_eq!(
            visited,
            vec![
                ("p".to_string(), 0),
                ("p:src".to_string(), 1),
                ("p:src/a.rs".to_string(), 2),
                ("p:b.rs".to_string(), 1),
            ]
        );
    }
}
