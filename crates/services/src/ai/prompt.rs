//! Prompt text and response schema for question generation.

use satprep_core::{Difficulty, DifficultyTier};
use serde_json::{Value, json};

/// Generation guidance for each difficulty tier.
#[must_use]
pub fn tier_description(tier: DifficultyTier) -> &'static str {
    match tier {
        DifficultyTier::ExtremelyHard => {
            "Extremely Hard (SAT Question 22 level). Involves abstract constants, complex geometry, or multi-step nonlinear systems."
        }
        DifficultyTier::VeryHard => {
            "Very Hard (SAT Question 18-21 level). Requires synthesis of multiple concepts."
        }
        DifficultyTier::Hard => "Hard (SAT Module 2 Hard level). Standard advanced math.",
        DifficultyTier::MediumHard => "Medium-Hard. Foundation advanced concepts.",
    }
}

/// Build the generation prompt for a target rating.
#[must_use]
pub fn question_prompt(difficulty: Difficulty) -> String {
    let description = tier_description(difficulty.tier());
    format!(
        r#"Create a single multiple-choice Math question for the Digital SAT.

Target Difficulty: {description}

Requirements:
1. The question must simulate the 'Bluebook' app experience.
2. Focus on: Advanced Algebra, Geometry/Trigonometry, or Problem Solving/Data Analysis.
3. VISUALS:
   - If the topic is GEOMETRY or TRIGONOMETRY: You MUST provide an 'svg' field drawing the shape (triangle, circle, etc.) with labels.
   - If the topic involves FUNCTIONS (parabolas, exponentials): You MUST provide an 'explanationSvg' graphing the function to help the student understand the solution.
4. Ensure the numbers and logic are strictly accurate.
5. Provide exactly 4 distinct options.
6. Explanation: MUST be detailed. Include a breakdown of why the correct answer is right, why the specific distractors are wrong, and a 'Pro Tip'.

SVG Guidelines:
- Use <svg viewBox="0 0 300 300" xmlns="http://www.w3.org/2000/svg">.
- Use dark strokes (stroke="black" stroke-width="2").
- Use clear text labels (font-size="14" fill="black").
- Do not use markdown code blocks for the SVG, put the raw string in the JSON field.

Return the result strictly as JSON."#
    )
}

/// Response schema handed to the model. Mirrors `QuestionDraft`.
#[must_use]
pub fn question_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "stem": {
                "type": "STRING",
                "description": "The math problem text. Use unicode characters for math symbols (e.g., x², π, √, θ, ≤)."
            },
            "options": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Exactly 4 multiple choice options. Use unicode for math symbols."
            },
            "correctIndex": {
                "type": "INTEGER",
                "description": "The index (0-3) of the correct answer."
            },
            "explanation": {
                "type": "STRING",
                "description": "A comprehensive educational explanation. Must include 'Solution', 'Common Pitfalls', and 'Pro Tip'."
            },
            "topic": {
                "type": "STRING",
                "description": "The specific sub-topic (e.g., 'Nonlinear Equations', 'Circle Theorems')."
            },
            "svg": {
                "type": "STRING",
                "description": "Optional. A raw SVG string (<svg viewBox='0 0 400 300' ...>...</svg>) to visualize the problem. REQUIRED for Geometry (draw the shape) and Trigonometry. For Graphs, draw the function. Keep styling minimal (black lines, transparent background)."
            },
            "explanationSvg": {
                "type": "STRING",
                "description": "Optional. A raw SVG string to visualize the solution (e.g., the graph of the function highlighting the intercept)."
            }
        },
        "required": ["stem", "options", "correctIndex", "explanation", "topic"]
    })
}
