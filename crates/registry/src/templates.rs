//! Prompt template store: `name → template`, loaded from an ordered list
//! of directories, later directories overriding earlier ones (spec.md
//! §4.5, §9: "the only supported configuration-override primitive").

use crate::error::RegistryError;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct PromptRegistry {
    templates: BTreeMap<String, String>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(name.into(), template.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Load every `*.txt`/`*.md` file in `dir` as `stem → contents`.
    /// A later call with a later-overriding directory simply calls
    /// `register` again for names it also defines.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, RegistryError> {
        if !dir.exists() {
            return Ok(0);
        }
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let ext_ok = matches!(path.extension().and_then(|e| e.to_str()), Some("txt") | Some("md"));
            if !path.is_file() || !ext_ok {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let contents = std::fs::read_to_string(&path)?;
            self.register(stem, contents);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Load an ordered list of directories; later directories override
    /// earlier ones for any name both define.
    pub fn load_layers(&mut self, dirs: &[&Path]) -> Result<usize, RegistryError> {
        let mut total = 0;
        for dir in dirs {
            total += self.load_dir(dir)?;
        }
        Ok(total)
    }
}

/// Non-recursive `{{key}}` substitution. Unknown placeholders are left
/// untouched, so `expand(t, {}) == t` byte-for-byte.
pub fn expand(template: &str, vars: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let Some(end_rel) = rest[start..].find("}}") else {
            out.push_str(rest);
            return out;
        };
        let end = start + end_rel;
        let key = rest[start + 2..end].trim();
        out.push_str(&rest[..start]);
        match vars.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..end + 2]),
        }
        rest = &rest[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
