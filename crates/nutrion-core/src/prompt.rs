//! The fixed instruction sent with every meal photo.

/// Nutritionist instruction: itemized calories, a verdict, macro split and
/// suggestions. Not user editable.
pub const MEAL_ANALYSIS_PROMPT: &str = "\
You are an expert nutritionist. Inspect the food items from the image and calculate the total calories.
Provide details of every food item with calories in this format:
1. Item 1 - no of calories
2. Item 2 - no of calories
----
After that mention whether the meal is healthy or not and mention the percentage split of carbohydrates, proteins, fats, sugar, and total calories in the meal.
Finally give suggestions which items should be removed and which should be added to make the meal healthy if it's unhealthy.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_asks_for_itemized_calories() {
        assert!(MEAL_ANALYSIS_PROMPT.starts_with("You are an expert nutritionist."));
        assert!(MEAL_ANALYSIS_PROMPT.contains("1. Item 1 - no of calories"));
        assert!(!MEAL_ANALYSIS_PROMPT.trim().is_empty());
    }
}
