use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::recipes::dto::{Dish, DishList, RecommendedDish};
use crate::recipes::gemini::TextModel;
use crate::recipes::youtube::VideoSearch;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("model returned a malformed dish list")]
    Parse(#[source] serde_json::Error),
    #[error("upstream request failed")]
    Upstream(#[source] anyhow::Error),
}

/// Prompt asking for exactly five dishes as strict JSON whose calories sum
/// to roughly the target.
pub fn build_prompt(ingredients: &[String], calorie_limit: f64) -> String {
    format!(
        "You are a nutrition expert specializing in Indian cuisine. Based on the following \
available ingredients: {}, recommend 5 healthy Indian dishes that:\n\
1. Can be made using these ingredients (and common Indian pantry staples)\n\
2. Are balanced and nutritious\n\
3. Together should add up to approximately {} calories for a complete meal\n\
4. Include traditional Indian cooking methods and spices\n\n\
For each dish, provide ONLY in this exact JSON format (no markdown, no extra text):\n\
{{\n  \"dishes\": [\n    {{\n      \"name\": \"Dish Name\",\n      \"calories\": number,\n      \
\"description\": \"Brief description\",\n      \"ingredients\": [\"ingredient1\", \"ingredient2\"],\n      \
\"cooking_time\": \"XX minutes\"\n    }}\n  ]\n}}\n\n\
Make sure the dishes are healthy, authentic Indian recipes. Return ONLY valid JSON.",
        ingredients.join(", "),
        calorie_limit,
    )
}

/// Models often fence their JSON despite instructions; tolerate one
/// wrapping ``` or ```json block.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Strict parse of the raw model output; fails closed on any schema
/// deviation.
pub fn parse_dishes(raw: &str) -> Result<Vec<Dish>, RecipeError> {
    let list: DishList =
        serde_json::from_str(strip_code_fence(raw)).map_err(RecipeError::Parse)?;
    Ok(list.dishes)
}

/// One text-generation call, then a bounded concurrent fan-out of video
/// lookups (one per dish, errors isolated per task).
pub async fn recommend(
    model: &dyn TextModel,
    videos: &dyn VideoSearch,
    ingredients: &[String],
    calorie_limit: f64,
) -> Result<Vec<RecommendedDish>, RecipeError> {
    if ingredients.is_empty() {
        return Err(RecipeError::InvalidInput(
            "Ingredients array is required".into(),
        ));
    }
    if calorie_limit <= 0.0 || !calorie_limit.is_finite() {
        return Err(RecipeError::InvalidInput(
            "Valid calorie_limit is required".into(),
        ));
    }

    let prompt = build_prompt(ingredients, calorie_limit);
    let raw = model.generate(&prompt).await.map_err(RecipeError::Upstream)?;
    let dishes = parse_dishes(&raw)?;

    let lookups = dishes.iter().map(|dish| async {
        match videos.find_tutorial(&dish.name).await {
            Ok(link) => link,
            Err(e) => {
                // One failed lookup degrades that dish only.
                warn!(error = %e, dish = %dish.name, "video lookup failed");
                None
            }
        }
    });
    let links = join_all(lookups).await;

    Ok(dishes
        .into_iter()
        .zip(links)
        .map(|(dish, video_link)| RecommendedDish { dish, video_link })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    const DISHES_JSON: &str = r#"{
        "dishes": [
            {"name": "Palak Paneer", "calories": 350, "description": "Spinach and paneer curry",
             "ingredients": ["Spinach", "Paneer"], "cooking_time": "30 minutes"},
            {"name": "Dal Tadka", "calories": 280, "description": "Tempered lentils",
             "ingredients": ["Lentils", "Ghee"], "cooking_time": "25 minutes"},
            {"name": "Jeera Rice", "calories": 220, "description": "Cumin rice",
             "ingredients": ["Rice", "Cumin Seeds"], "cooking_time": "20 minutes"}
        ]
    }"#;

    struct FixedModel(&'static str);
    #[async_trait]
    impl TextModel for FixedModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct RecordingModel(AtomicBool);
    #[async_trait]
    impl TextModel for RecordingModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            self.0.store(true, Ordering::SeqCst);
            anyhow::bail!("should not be called")
        }
    }

    struct FlakyVideos;
    #[async_trait]
    impl VideoSearch for FlakyVideos {
        async fn find_tutorial(&self, dish_name: &str) -> anyhow::Result<Option<String>> {
            if dish_name == "Dal Tadka" {
                anyhow::bail!("quota exceeded");
            }
            Ok(Some(format!("https://www.youtube.com/watch?v={dish_name}")))
        }
    }

    struct NoVideos;
    #[async_trait]
    impl VideoSearch for NoVideos {
        async fn find_tutorial(&self, _dish_name: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn prompt_carries_ingredients_and_target() {
        let ingredients = vec!["Rice".to_string(), "Lentils".to_string()];
        let prompt = build_prompt(&ingredients, 1800.0);
        assert!(prompt.contains("Rice, Lentils"));
        assert!(prompt.contains("approximately 1800 calories"));
        assert!(prompt.contains("recommend 5 healthy Indian dishes"));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn parses_bare_json() {
        let dishes = parse_dishes(DISHES_JSON).expect("parse");
        assert_eq!(dishes.len(), 3);
        assert_eq!(dishes[0].name, "Palak Paneer");
        assert_eq!(dishes[1].calories, 280.0);
    }

    #[test]
    fn parses_json_fenced_output() {
        let fenced = format!("```json\n{DISHES_JSON}\n```");
        assert_eq!(parse_dishes(&fenced).expect("parse").len(), 3);
    }

    #[test]
    fn parses_plain_fenced_output() {
        let fenced = format!("```\n{DISHES_JSON}\n```");
        assert_eq!(parse_dishes(&fenced).expect("parse").len(), 3);
    }

    #[test]
    fn parse_fails_closed_on_schema_deviation() {
        assert!(matches!(
            parse_dishes("Here are some tasty dishes!"),
            Err(RecipeError::Parse(_))
        ));
        // Right shape, wrong field types.
        assert!(matches!(
            parse_dishes(r#"{"dishes": [{"name": 42}]}"#),
            Err(RecipeError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn empty_ingredients_rejected_before_any_call() {
        let model = RecordingModel(AtomicBool::new(false));
        let err = recommend(&model, &NoVideos, &[], 2000.0).await.unwrap_err();
        assert!(matches!(err, RecipeError::InvalidInput(_)));
        assert!(!model.0.load(Ordering::SeqCst), "model must not be called");
    }

    #[tokio::test]
    async fn nonpositive_calorie_limit_rejected_before_any_call() {
        let model = RecordingModel(AtomicBool::new(false));
        let ingredients = vec!["Rice".to_string()];
        for limit in [0.0, -100.0, f64::NAN] {
            let err = recommend(&model, &NoVideos, &ingredients, limit)
                .await
                .unwrap_err();
            assert!(matches!(err, RecipeError::InvalidInput(_)));
        }
        assert!(!model.0.load(Ordering::SeqCst), "model must not be called");
    }

    #[tokio::test]
    async fn one_video_failure_does_not_poison_the_rest() {
        let model = FixedModel(DISHES_JSON);
        let dishes = recommend(&model, &FlakyVideos, &["Rice".to_string()], 900.0)
            .await
            .expect("recommend");
        assert_eq!(dishes.len(), 3);
        assert!(dishes[0].video_link.is_some());
        assert!(dishes[1].video_link.is_none(), "failed lookup degrades to null");
        assert!(dishes[2].video_link.is_some());
    }

    #[tokio::test]
    async fn model_failure_fails_the_whole_request() {
        struct BrokenModel;
        #[async_trait]
        impl TextModel for BrokenModel {
            async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
                anyhow::bail!("503 from upstream")
            }
        }
        let err = recommend(&BrokenModel, &NoVideos, &["Rice".to_string()], 900.0)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::Upstream(_)));
    }
}
