use std::collections::HashMap;

/// One technology stack as delivered by the backing dataset.
#[derive(Clone, Debug)]
pub struct StackEntity {
    pub id: String,
    pub display_name: String,
    pub logo_ref: Option<String>,
    pub description: String,
}

/// A deduplicated, sanitized relation from a focal entity to a target.
#[derive(Clone, Debug, PartialEq)]
pub struct RelatedStack {
    pub entity_id: String,
    pub weight: f32,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryGroup {
    Hub,
    Member,
}

#[derive(Clone, Debug)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub group: CategoryGroup,
}

/// Category-level node/link graph for the force view. Links reference
/// node indices; resolved and deduplicated at load time.
#[derive(Clone, Debug, Default)]
pub struct CategoryGraph {
    pub nodes: Vec<CategoryNode>,
    pub links: Vec<(usize, usize)>,
}

#[derive(Clone, Debug)]
pub struct RelationDataset {
    pub entities: HashMap<String, StackEntity>,
    pub relations: HashMap<String, Vec<RelatedStack>>,
    pub categories: CategoryGraph,
    pub relation_count: usize,
}

impl RelationDataset {
    pub fn entity(&self, id: &str) -> Option<&StackEntity> {
        self.entities.get(id)
    }

    pub fn related(&self, focal_id: &str) -> &[RelatedStack] {
        self.relations
            .get(focal_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities ordered for the browser list: most-connected first, then by
    /// display name so the order is stable across loads.
    pub fn browser_order(&self) -> Vec<&StackEntity> {
        let mut entities = self.entities.values().collect::<Vec<_>>();
        entities.sort_by(|a, b| {
            let a_relations = self.related(&a.id).len();
            let b_relations = self.related(&b.id).len();
            b_relations
                .cmp(&a_relations)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        entities
    }

    /// Initial focal entity when none was requested on the command line.
    pub fn default_focus(&self) -> Option<&str> {
        self.browser_order().first().map(|entity| entity.id.as_str())
    }
}
