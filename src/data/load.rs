use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::model::{
    CategoryGraph, CategoryGroup, CategoryNode, RelatedStack, RelationDataset, StackEntity,
};

#[derive(Clone, Debug, Deserialize)]
struct RawEntity {
    id: String,
    name: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawRelation {
    source: String,
    target: String,
    #[serde(default)]
    weight: f32,
    #[serde(default, rename = "relationship_type")]
    label: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawCategoryNode {
    id: String,
    name: String,
    #[serde(default)]
    group: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawCategoryLink {
    source: String,
    target: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawCategories {
    #[serde(default)]
    nodes: Vec<RawCategoryNode>,
    #[serde(default)]
    links: Vec<RawCategoryLink>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawDataset {
    entities: Vec<RawEntity>,
    #[serde(default)]
    relations: Vec<RawRelation>,
    #[serde(default)]
    categories: RawCategories,
}

pub fn load_dataset(path: &Path) -> Result<RelationDataset> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;

    let parsed: RawDataset = serde_json::from_str(&raw)
        .with_context(|| format!("invalid dataset JSON in {}", path.display()))?;

    build_dataset(parsed)
}

/// Weights must survive layout math: negative and non-finite values would
/// poison the size normalization, so they collapse to zero here.
fn sanitize_weight(weight: f32) -> f32 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn build_dataset(raw: RawDataset) -> Result<RelationDataset> {
    if raw.entities.is_empty() {
        return Err(anyhow!("dataset contains no entities"));
    }

    let mut entities = HashMap::with_capacity(raw.entities.len());
    for entity in raw.entities {
        if entity.id.is_empty() {
            continue;
        }

        let logo_ref = entity.logo.filter(|logo| !logo.is_empty());
        entities.insert(
            entity.id.clone(),
            StackEntity {
                id: entity.id,
                display_name: entity.name,
                logo_ref,
                description: entity.description,
            },
        );
    }

    if entities.is_empty() {
        return Err(anyhow!("dataset contains no entities with usable ids"));
    }

    let mut relations: HashMap<String, Vec<RelatedStack>> = HashMap::new();
    let mut relation_count = 0usize;

    for relation in raw.relations {
        if relation.source == relation.target {
            continue;
        }
        if !entities.contains_key(&relation.source) || !entities.contains_key(&relation.target) {
            log::warn!(
                "dropping relation {} -> {}: unknown entity id",
                relation.source,
                relation.target
            );
            continue;
        }

        let weight = sanitize_weight(relation.weight);
        let list = relations.entry(relation.source).or_default();

        // Dedup-by-max: a repeated target keeps its original slot but takes
        // the highest weight seen for it.
        if let Some(existing) = list
            .iter_mut()
            .find(|existing| existing.entity_id == relation.target)
        {
            if weight > existing.weight {
                existing.weight = weight;
                existing.label = relation.label;
            }
        } else {
            list.push(RelatedStack {
                entity_id: relation.target,
                weight,
                label: relation.label,
            });
            relation_count += 1;
        }
    }

    let categories = build_categories(raw.categories);

    Ok(RelationDataset {
        entities,
        relations,
        categories,
        relation_count,
    })
}

fn build_categories(raw: RawCategories) -> CategoryGraph {
    let mut nodes = Vec::with_capacity(raw.nodes.len());
    let mut index_by_id = HashMap::with_capacity(raw.nodes.len());

    for node in raw.nodes {
        if node.id.is_empty() || index_by_id.contains_key(&node.id) {
            continue;
        }

        let group = match node.group.as_deref() {
            Some("hub") | Some("root") => CategoryGroup::Hub,
            _ => CategoryGroup::Member,
        };

        index_by_id.insert(node.id.clone(), nodes.len());
        nodes.push(CategoryNode {
            id: node.id,
            name: node.name,
            group,
        });
    }

    let mut links = Vec::with_capacity(raw.links.len());
    for link in raw.links {
        if let (Some(&source), Some(&target)) =
            (index_by_id.get(&link.source), index_by_id.get(&link.target))
            && source != target
        {
            links.push((source, target));
        }
    }
    links.sort_unstable();
    links.dedup();

    CategoryGraph { nodes, links }
}
