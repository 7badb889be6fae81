use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::pipeline::RecipePipeline;

/// Recover the JSON value from a completion, as JSON text.
#[pyfunction]
#[pyo3(text_signature = "(raw)")]
fn parse_ai_response(raw: &str) -> PyResult<String> {
    let value = RecipePipeline::default()
        .normalize(raw)
        .map_err(|e| PyValueError::new_err(format!("{} (cleaned: {:?})", e, e.cleaned_preview)))?;
    Ok(value.to_string())
}

/// Recipes for a completion as a JSON array. Never raises for bad model output.
#[pyfunction]
#[pyo3(text_signature = "(raw, ingredients)")]
fn build_recipes(raw: &str, ingredients: Vec<String>) -> PyResult<String> {
    let recipes = RecipePipeline::default().run(raw, &ingredients);
    serde_json::to_string(&recipes)
        .map_err(|e| PyValueError::new_err(format!("Failed to encode recipes: {:?}", e)))
}

/// Fallback recipes for when the generation request itself failed.
#[pyfunction]
#[pyo3(text_signature = "(ingredients)")]
fn generation_failed(ingredients: Vec<String>) -> PyResult<String> {
    let recipes = RecipePipeline::default().generation_failed(&ingredients);
    serde_json::to_string(&recipes)
        .map_err(|e| PyValueError::new_err(format!("Failed to encode recipes: {:?}", e)))
}

/// A Python module for turning model completions into recipes
#[pymodule]
fn larder(_py: Python, m: &PyModule) -> PyResult<()> {
    let _ = env_logger::try_init();
    m.add_function(wrap_pyfunction!(parse_ai_response, m)?)?;
    m.add_function(wrap_pyfunction!(build_recipes, m)?)?;
    m.add_function(wrap_pyfunction!(generation_failed, m)?)?;
    Ok(())
}
