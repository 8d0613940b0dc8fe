//! Instruction templates and declared output shapes for the three
//! prompt operations.

use serde_json::{json, Value};

pub const STRUCTURE_SYSTEM_PROMPT: &str = "You are an AI expert in parsing natural language \
prompts into structured JSON format. Your goal is to convert the given prompt into a valid \
JSON structure and to identify any potential biases in the prompt. Output the JSON and a \
bias detection report. If no bias is detected, biasReport should be null.";

pub const ENHANCE_SYSTEM_PROMPT: &str = "You are a prompt engineering expert. Your goal is to \
help users improve their prompts to get better-structured JSON outputs. Analyze the user's \
original prompt and the resulting JSON output. Based on this, rewrite the user's prompt to be \
clearer, more specific, and better structured for a large language model. Do not just list \
suggestions. Provide a single, complete, rewritten prompt that incorporates your improvements, \
and explain the changes you made.";

pub const TITLE_SYSTEM_PROMPT: &str = "You are an expert at creating concise summaries. \
Analyze the following prompt and generate a short, descriptive title for it. The title should \
be between 3 and 6 words.";

pub fn build_structure_message(prompt: &str) -> String {
    format!("Prompt: {}", prompt)
}

pub fn build_enhance_message(prompt: &str, structured_json: &str) -> String {
    format!(
        "Original Prompt: {}\nGenerated JSON: {}",
        prompt, structured_json
    )
}

pub fn build_title_message(prompt: &str) -> String {
    format!("Prompt: {}", prompt)
}

pub fn structure_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "jsonOutput": {
                "type": "string",
                "description": "The structured JSON output of the parsed prompt."
            },
            "biasDetected": {
                "type": "boolean",
                "description": "Whether bias was detected in the prompt."
            },
            "biasReport": {
                "type": "string",
                "nullable": true,
                "description": "A report on any biases detected."
            }
        },
        "required": ["jsonOutput", "biasDetected"]
    })
}

pub fn enhance_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "enhancedPrompt": {
                "type": "string",
                "description": "A single, rewritten version of the prompt with improvements incorporated."
            },
            "reasoning": {
                "type": "string",
                "description": "An explanation of the changes made to the prompt."
            }
        },
        "required": ["enhancedPrompt", "reasoning"]
    })
}

pub fn title_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "A short, descriptive title for the prompt, between 3 and 6 words."
            }
        },
        "required": ["title"]
    })
}

/// Harm-category thresholds forwarded with Structure requests.
pub fn structure_safety_settings() -> Value {
    json!([
        { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH" },
        { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE" },
        { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
        { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_LOW_AND_ABOVE" }
    ])
}
