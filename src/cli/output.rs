//! JSON output for CLI commands

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

/// Shared by every command so responses have one shape:
/// `{"success": true, ...}` or `{"success": false, "error": "..."}`
#[derive(Debug, Clone)]
pub struct OutputContext {
    root: PathBuf,
}

impl OutputContext {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the working directory when it lies inside it
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Print `data`'s fields next to `success`
    pub fn print_success_flat<T: Serialize>(&self, data: T) {
        print_json(&success_flat(data));
    }

    pub fn print_error(&self, message: &str) {
        print_json(&json!({ "success": false, "error": message }));
    }
}

fn success_flat<T: Serialize>(data: T) -> Value {
    let mut response = serde_json::to_value(data).unwrap_or_else(|_| json!({}));
    match response.as_object_mut() {
        Some(obj) => {
            obj.insert("success".to_string(), json!(true));
            response
        }
        None => json!({ "success": true, "data": response }),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = OutputContext::new(PathBuf::from("/work"));
        assert_eq!(ctx.relative_path(Path::new("/work/cmd/main.go")), "cmd/main.go");
        assert_eq!(ctx.relative_path(Path::new("/other/app.py")), "/other/app.py");
    }

    #[test]
    fn test_success_flat() {
        let value = success_flat(json!({ "count": 2 }));
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);

        let wrapped = success_flat(vec!["go", "rust"]);
        assert_eq!(wrapped["success"], true);
        assert_eq!(wrapped["data"][1], "rust");
    }
}
