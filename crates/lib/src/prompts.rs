//! # Prompt Templates
//!
//! Deterministic prompt assembly for the two generation tasks: SQL query
//! generation and BigQuery ML model generation. Both templates embed the
//! rendered dataset schema, capped at [`MAX_SCHEMA_PROMPT_LEN`] bytes to keep
//! prompts bounded on very wide datasets.

use crate::{schema::SchemaContext, types::GenerationRequest};

/// Upper bound, in bytes, on the schema block embedded in a prompt. Schemas
/// beyond this are cut at a char boundary and marked as truncated.
pub const MAX_SCHEMA_PROMPT_LEN: usize = 16 * 1024;

/// Marker appended when the schema block was cut at the cap.
pub const SCHEMA_TRUNCATED_MARKER: &str = "... (schema truncated)";

const SQL_GENERATION_TEMPLATE: &str = r#"Convert the following natural language question to a SQL query for BigQuery.

Available tables and their schemas:
{schema}

Question: {input}

Rules:
1. Use only the tables and columns shown above
2. Return only the SQL query, no explanations
3. Use proper BigQuery syntax
4. Include the project and dataset in table names: `{project_id}.{dataset_id}.table_name`

SQL Query:"#;

const MODEL_GENERATION_TEMPLATE: &str = r#"Create a BigQuery ML model based on the following description.

Available tables and their schemas:
{schema}

Description: {input}

Generate a CREATE OR REPLACE MODEL statement for BigQuery ML.

Rules:
1. Use only the tables and columns shown above
2. Choose appropriate model type (LINEAR_REG, LOGISTIC_REG, KMEANS, etc.)
3. Include proper feature selection and target variable
4. Use project.dataset.model_name format: `{project_id}.{dataset_id}.model_name`
5. Return only the SQL statement, no explanations

CREATE MODEL SQL:"#;

/// Builds the full prompt for a generation request.
///
/// Pure and deterministic: the same request, schema, and project id always
/// yield the same string.
pub fn build_prompt(request: &GenerationRequest, schema: &SchemaContext, project_id: &str) -> String {
    let schema_text = truncate_schema(schema.render());
    let (template, input, dataset_id) = match request {
        GenerationRequest::SqlGeneration {
            question,
            dataset_id,
        } => (SQL_GENERATION_TEMPLATE, question, dataset_id),
        GenerationRequest::ModelGeneration {
            description,
            dataset_id,
        } => (MODEL_GENERATION_TEMPLATE, description, dataset_id),
    };

    template
        .replace("{schema}", &schema_text)
        .replace("{input}", input)
        .replace("{project_id}", project_id)
        .replace("{dataset_id}", dataset_id)
}

/// Caps the rendered schema text at [`MAX_SCHEMA_PROMPT_LEN`] bytes.
fn truncate_schema(rendered: String) -> String {
    if rendered.len() <= MAX_SCHEMA_PROMPT_LEN {
        return rendered;
    }
    let mut cut = MAX_SCHEMA_PROMPT_LEN;
    while !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}\n{SCHEMA_TRUNCATED_MARKER}", &rendered[..cut])
}
