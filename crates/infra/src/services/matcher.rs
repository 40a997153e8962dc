use hackwatch_domain::search::{
    SearchDocument, CITY_WEIGHT, DESCRIPTION_WEIGHT, ORGANIZER_WEIGHT, TAGS_WEIGHT, TITLE_WEIGHT,
};

/// Scores how well a document matches a query. `None` means no match at
/// all. Queries arrive normalized to trimmed lowercase.
pub trait ITextMatcher: Send + Sync {
    fn relevance(&self, query: &str, document: &SearchDocument) -> Option<f64>;
}

/// Substring matcher where each field contributes its fixed weight when it
/// contains the query. Fancier matching plugs in behind the trait.
pub struct WeightedTextMatcher;

impl ITextMatcher for WeightedTextMatcher {
    fn relevance(&self, query: &str, document: &SearchDocument) -> Option<f64> {
        let mut score = 0.0;
        if document.title.to_lowercase().contains(query) {
            score += TITLE_WEIGHT;
        }
        if let Some(description) = &document.description {
            if description.to_lowercase().contains(query) {
                score += DESCRIPTION_WEIGHT;
            }
        }
        if document
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
        {
            score += TAGS_WEIGHT;
        }
        if let Some(name) = &document.organizer_name {
            if name.to_lowercase().contains(query) {
                score += ORGANIZER_WEIGHT;
            }
        }
        if let Some(city) = &document.city {
            if city.to_lowercase().contains(query) {
                score += CITY_WEIGHT;
            }
        }
        if score > 0.0 {
            Some(score)
        } else {
            None
        }
    }
}
