//! Identifier sources of a query.

use anyhow::{Context, Result};
use futures::future::try_join_all;

use crate::config::{Category, Config};
use crate::source::{fetch_category, read_identifier_file};
use crate::transport::Transport;

const INPUT_KEY: &str = "input";
const INPUT_LABEL: &str = "Input addresses";

/// One list of identifiers destined for one report section.
#[derive(Debug, Clone)]
pub(crate) struct IdentifierSource {
    pub key: String,
    pub label: String,
    pub enrichable: bool,
    pub identifiers: Vec<String>,
}

/// Loads the input file, or every selected category list in selection order.
pub(crate) async fn collect_sources(
    config: &Config,
    client: &reqwest::Client,
    transport: &Transport,
) -> Result<Vec<IdentifierSource>> {
    if let Some(path) = &config.input {
        let identifiers = read_identifier_file(path).await?;
        return Ok(vec![IdentifierSource {
            key: INPUT_KEY.to_string(),
            label: INPUT_LABEL.to_string(),
            enrichable: true,
            identifiers,
        }]);
    }

    let categories = selected_categories(&config.categories);
    let lists = try_join_all(categories.iter().map(|&category| async move {
        fetch_category(client, transport, &config.list_url, category)
            .await
            .with_context(|| format!("Failed to fetch the {} list", category.as_str()))
    }))
    .await?;

    Ok(categories
        .into_iter()
        .zip(lists)
        .map(|(category, identifiers)| IdentifierSource {
            key: category.as_str().to_string(),
            label: category.display_name().to_string(),
            enrichable: category.supports_enrichment(),
            identifiers,
        })
        .collect())
}

/// Drops repeated categories, keeping first-selection order.
fn selected_categories(categories: &[Category]) -> Vec<Category> {
    let mut selected: Vec<Category> = Vec::with_capacity(categories.len());
    for &category in categories {
        if !selected.contains(&category) {
            selected.push(category);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_categories_dedup_in_order() {
        let selected = selected_categories(&[
            Category::BestProxy,
            Category::CfV4,
            Category::BestProxy,
        ]);
        assert_eq!(selected, vec![Category::BestProxy, Category::CfV4]);
    }
}
