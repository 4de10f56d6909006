//! Episode query: one upstream fetch, then in-memory filtering and projection.

use serde_json::{Map, Value};

use super::client::CatalogClient;
use super::error::CatalogError;
use super::helpers::{contains_lowercase, non_empty};
use super::models::{Episode, EpisodesInput, EPISODE_FIELDS};

/// Fetches all episodes and applies the filters and projection in `input`.
pub async fn query_episodes(
    client: &CatalogClient,
    input: EpisodesInput,
) -> Result<Vec<Episode>, CatalogError> {
    let episodes = client.fetch_episodes().await?;
    Ok(filter_episodes(episodes, input))
}

/// Filters run in order: season, title, required animals. Projection last.
pub fn filter_episodes(episodes: Vec<Episode>, input: EpisodesInput) -> Vec<Episode> {
    let title = non_empty(input.episode_title).map(|t| t.to_lowercase());
    let animals: Vec<String> = input
        .animals_featured
        .unwrap_or_default()
        .iter()
        .map(|a| a.to_lowercase())
        .collect();

    let filtered = episodes.into_iter().filter(|episode| {
        input
            .season_number
            .map_or(true, |season| episode.season() == Some(season))
            && title
                .as_deref()
                .map_or(true, |t| contains_lowercase(episode.title(), t))
            && (animals.is_empty() || has_animals(episode, &animals))
    });

    let fields = input.fields.unwrap_or_default();
    let allowed = allowed_fields(&fields);
    if allowed.is_empty() {
        filtered.collect()
    } else {
        filtered.map(|episode| project(&episode, &allowed)).collect()
    }
}

/// Every required animal (lowercase) must be a substring of some featured animal.
fn has_animals(episode: &Episode, required: &[String]) -> bool {
    let Some(featured) = episode.animals() else {
        return false;
    };
    let featured: Vec<String> = featured.iter().map(|a| a.to_lowercase()).collect();
    required
        .iter()
        .all(|req| featured.iter().any(|animal| animal.contains(req.as_str())))
}

/// Requested fields that are part of the episode schema, in request order.
fn allowed_fields(requested: &[String]) -> Vec<&str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|f| EPISODE_FIELDS.contains(f))
        .collect()
}

fn project(episode: &Episode, fields: &[&str]) -> Episode {
    let map: Map<String, Value> = fields
        .iter()
        .map(|f| (f.to_string(), episode.get(f).cloned().unwrap_or(Value::Null)))
        .collect();
    Episode(map)
}
