use serde::Deserialize;

use crate::error::{PageSpeedError, Result};

/// Lighthouse category ids, as sent in `category=` and keyed in the response.
pub const PERFORMANCE: &str = "performance";
pub const SEO: &str = "seo";
pub const BEST_PRACTICES: &str = "best-practices";

#[derive(Debug, Clone, Deserialize)]
pub struct PagespeedResponse {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LighthouseResult {
    #[serde(rename = "finalUrl")]
    pub final_url: Option<String>,
    #[serde(default)]
    pub categories: Categories,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Categories {
    pub performance: Option<Category>,
    pub seo: Option<Category>,
    #[serde(rename = "best-practices")]
    pub best_practices: Option<Category>,
}

/// A Lighthouse category. `score` is a fraction in `[0,1]`, or null when
/// Lighthouse could not compute it.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: Option<String>,
    pub title: Option<String>,
    pub score: Option<f64>,
}

/// The three category scores as raw `[0,1]` fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScores {
    pub performance: f64,
    pub seo: f64,
    pub best_practices: f64,
}

impl PagespeedResponse {
    /// Pull the three requested category scores, failing if any is absent.
    pub fn category_scores(&self) -> Result<CategoryScores> {
        let categories = self
            .lighthouse_result
            .as_ref()
            .map(|r| &r.categories)
            .ok_or_else(|| PageSpeedError::Parse("response has no lighthouseResult".into()))?;

        Ok(CategoryScores {
            performance: score_of(&categories.performance, PERFORMANCE)?,
            seo: score_of(&categories.seo, SEO)?,
            best_practices: score_of(&categories.best_practices, BEST_PRACTICES)?,
        })
    }
}

fn score_of(category: &Option<Category>, id: &'static str) -> Result<f64> {
    category
        .as_ref()
        .and_then(|c| c.score)
        .ok_or(PageSpeedError::MissingCategory(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_three_scores() {
        let resp: PagespeedResponse = serde_json::from_str(
            r#"{"lighthouseResult": {"finalUrl": "https://acme.example/", "categories": {
                "performance": {"id": "performance", "score": 0.42},
                "seo": {"id": "seo", "score": 0.9},
                "best-practices": {"id": "best-practices", "score": 1}
            }}}"#,
        )
        .unwrap();

        let scores = resp.category_scores().unwrap();
        assert_eq!(scores.performance, 0.42);
        assert_eq!(scores.seo, 0.9);
        assert_eq!(scores.best_practices, 1.0);
    }

    #[test]
    fn null_score_is_missing_category() {
        let resp: PagespeedResponse = serde_json::from_str(
            r#"{"lighthouseResult": {"categories": {
                "performance": {"score": null},
                "seo": {"score": 0.9},
                "best-practices": {"score": 0.8}
            }}}"#,
        )
        .unwrap();

        assert!(matches!(
            resp.category_scores(),
            Err(PageSpeedError::MissingCategory(PERFORMANCE))
        ));
    }

    #[test]
    fn absent_category_is_missing_category() {
        let resp: PagespeedResponse = serde_json::from_str(
            r#"{"lighthouseResult": {"categories": {
                "performance": {"score": 0.5},
                "seo": {"score": 0.9}
            }}}"#,
        )
        .unwrap();

        assert!(matches!(
            resp.category_scores(),
            Err(PageSpeedError::MissingCategory(BEST_PRACTICES))
        ));
    }

    #[test]
    fn missing_lighthouse_result_is_parse_error() {
        let resp: PagespeedResponse =
            serde_json::from_str(r#"{"error": {"code": 400}}"#).unwrap();
        assert!(matches!(resp.category_scores(), Err(PageSpeedError::Parse(_))));
    }
}
