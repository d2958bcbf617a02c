//! Prompt construction
//!
//! Shared prompt-building logic:
//! - DIETARY_FILTERS: the supported dietary filter labels
//! - build_analysis_prompt: image-analysis prompt with the strict JSON
//!   output contract the parser expects

/// Dietary filter labels offered in the selection view. Matching against
/// recipe tags is exact string equality, so these are the canonical forms.
pub const DIETARY_FILTERS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Keto",
    "Gluten-Free",
    "Dairy-Free",
    "Paleo",
];

/// Build the fridge-analysis prompt.
///
/// # Arguments
/// * `image_path` - local path of the photo handed to the provider CLI
/// * `filters` - active dietary filter labels (may be empty)
pub fn build_analysis_prompt(image_path: &str, filters: &[String]) -> String {
    let filter_text = if filters.is_empty() {
        String::new()
    } else {
        format!(
            "Prioritize recipes that fit these dietary restrictions: {}.",
            filters.join(", ")
        )
    };

    format!(
        r#"You are an expert culinary AI. Read the image file at {image_path} and analyze it.
1. Identify all visible ingredients in the fridge/pantry photo.
2. Suggest 5 creative and distinct recipes that use these ingredients.
3. {filter_text}
4. For each recipe, mark ingredients as missing if they are essential but not visible.
5. Be precise with calorie counts and prep times.
6. Ensure steps are clear, actionable, and suitable for a text-to-speech system.

## Output format (output exactly this JSON object, nothing else)
{{
  "recipes": [
    {{
      "id": "short unique string",
      "title": "recipe title",
      "description": "one-sentence description",
      "prepTime": "e.g. 25 min",
      "calories": 420,
      "difficulty": "Easy | Medium | Hard",
      "dietaryTags": ["Vegan", "Gluten-Free"],
      "ingredients": [
        {{"name": "ingredient", "amount": "e.g. 200g", "isMissing": false}}
      ],
      "steps": ["step 1", "step 2"]
    }}
  ],
  "detectedIngredients": ["ingredient visible in the photo"]
}}

## Notes
- difficulty must be exactly one of Easy, Medium, Hard
- every recipe must have at least one step
- dietaryTags must only use these labels: {labels}
- output the JSON object only, no explanation"#,
        image_path = image_path,
        filter_text = filter_text,
        labels = DIETARY_FILTERS.join(", "),
    )
}
