//! Template processor implementation
//!
//! Substitution runs in two passes, and the order is a contract:
//!
//! 1. Literal `{name}` placeholders are textually replaced for every
//!    supplied variable, independent of engine escaping rules. This keeps
//!    legacy flat placeholders working without double-escaping.
//! 2. The remaining content is rendered through minijinja with the same
//!    variables as context, so `{{ name }}`, conditionals, and loops all
//!    work.

use crate::{Result, TemplateError};
use indexmap::IndexMap;
use minijinja::Environment;
use serde_json::Value;
use std::path::Path;

/// Processes template text, files, and nested data structures
pub struct TemplateProcessor {
    env: Environment<'static>,
}

impl TemplateProcessor {
    /// Create a new template processor
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Preserve the final newline of rendered files; minijinja strips
        // it by default.
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render a template string with the given variables
    ///
    /// # Examples
    ///
    /// ```
    /// use hookforge_template::TemplateProcessor;
    /// use indexmap::IndexMap;
    ///
    /// let processor = TemplateProcessor::new();
    /// let mut vars = IndexMap::new();
    /// vars.insert("project_name".to_string(), "demo".to_string());
    ///
    /// let out = processor.render_str("Hello {project_name}!", &vars).unwrap();
    /// assert_eq!(out, "Hello demo!");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the engine pass fails; engine errors are
    /// propagated, never swallowed.
    pub fn render_str(&self, text: &str, variables: &IndexMap<String, String>) -> Result<String> {
        // Pass 1: literal {name} replacement, before the engine sees the
        // content.
        let mut content = text.to_string();
        for (key, value) in variables {
            content = content.replace(&format!("{{{key}}}"), value);
        }

        // Pass 2: full expression engine with the same variables.
        self.env
            .render_str(&content, variables)
            .map_err(TemplateError::from)
    }

    /// Render a template file with the given variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or rendering fails.
    pub fn render_file(&self, path: &Path, variables: &IndexMap<String, String>) -> Result<String> {
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.render_str(&content, variables)
    }

    /// Recursively render a nested data structure
    ///
    /// Strings are rendered, object keys are preserved in order, arrays
    /// are mapped element-wise, and all other values pass through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering any contained string fails.
    pub fn render_data(&self, value: &Value, variables: &IndexMap<String, String>) -> Result<Value> {
        match value {
            Value::String(s) => Ok(Value::String(self.render_str(s, variables)?)),
            Value::Object(map) => {
                let mut rendered = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    rendered.insert(key.clone(), self.render_data(item, variables)?);
                }
                Ok(Value::Object(rendered))
            }
            Value::Array(items) => {
                let rendered = items
                    .iter()
                    .map(|item| self.render_data(item, variables))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(rendered))
            }
            other => Ok(other.clone()),
        }
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_literal_placeholder() {
        let processor = TemplateProcessor::new();
        let out = processor
            .render_str("Hello {project_name}!", &vars(&[("project_name", "demo")]))
            .unwrap();
        assert_eq!(out, "Hello demo!");
    }

    #[test]
    fn test_engine_syntax() {
        let processor = TemplateProcessor::new();
        let out = processor
            .render_str("{{ project_name }}", &vars(&[("project_name", "demo")]))
            .unwrap();
        assert_eq!(out, "demo");
    }

    #[test]
    fn test_both_passes_in_one_template() {
        let processor = TemplateProcessor::new();
        let out = processor
            .render_str(
                "{name}: {% if name %}set{% else %}unset{% endif %}",
                &vars(&[("name", "x")]),
            )
            .unwrap();
        assert_eq!(out, "x: set");
    }

    #[test]
    fn test_unknown_literal_placeholder_left_for_engine() {
        // A {placeholder} with no matching variable is untouched by pass 1
        // and is not engine syntax, so it survives verbatim.
        let processor = TemplateProcessor::new();
        let out = processor.render_str("keep {other}", &vars(&[("name", "x")])).unwrap();
        assert_eq!(out, "keep {other}");
    }

    #[test]
    fn test_engine_error_propagates() {
        let processor = TemplateProcessor::new();
        let result = processor.render_str("{% if %}", &vars(&[]));
        assert!(matches!(result, Err(TemplateError::Render(_))));
    }

    #[test]
    fn test_render_file() {
        let processor = TemplateProcessor::new();
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("hook.py");
        std::fs::write(&path, "PROJECT = \"{project_name}\"\n").unwrap();

        let out = processor
            .render_file(&path, &vars(&[("project_name", "demo")]))
            .unwrap();
        assert_eq!(out, "PROJECT = \"demo\"\n");
    }

    #[test]
    fn test_render_missing_file_fails() {
        let processor = TemplateProcessor::new();
        let result = processor.render_file(Path::new("/nonexistent/hook.py"), &vars(&[]));
        assert!(matches!(result, Err(TemplateError::FileRead { .. })));
    }

    #[test]
    fn test_render_data_recurses() {
        let processor = TemplateProcessor::new();
        let data = json!({
            "matcher": "*",
            "hooks": [
                {"type": "command", "command": "run --project {project_name}"},
            ],
            "timeout": 30,
            "enabled": true,
        });

        let rendered = processor
            .render_data(&data, &vars(&[("project_name", "demo")]))
            .unwrap();

        assert_eq!(
            rendered["hooks"][0]["command"],
            json!("run --project demo")
        );
        assert_eq!(rendered["timeout"], json!(30));
        assert_eq!(rendered["enabled"], json!(true));
    }

    #[test]
    fn test_render_data_preserves_key_order() {
        let processor = TemplateProcessor::new();
        let data: Value =
            serde_json::from_str(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#).unwrap();

        let rendered = processor.render_data(&data, &vars(&[])).unwrap();
        let keys: Vec<&String> = rendered.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
