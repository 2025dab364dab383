//! Include/exclude filter lists and the option catalogs the form offers

use once_cell::sync::Lazy;

/// Extensions offered in the form before anything is loaded
pub static DEFAULT_EXTENSIONS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        ".py", ".js", ".ts", ".jsx", ".tsx", ".vue", ".svelte", ".java", ".kt", ".go", ".rs",
        ".c", ".h", ".cpp", ".hpp", ".cs", ".rb", ".php", ".swift", ".scala", ".sql", ".sh",
        ".md", ".json", ".yaml", ".yml", ".toml", ".html", ".css", ".scss",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// Exclusion patterns offered in the form before anything is loaded
pub static DEFAULT_EXCLUDES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "node_modules", ".git", "target", "dist", "build", ".venv", "venv", "__pycache__",
        ".idea", ".vscode", "*.min.js", "*.lock", "coverage",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

/// Normalize one extension: trimmed, lower-case, dot-prefixed.
///
/// Returns `None` for input that has nothing left after the dot.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().to_lowercase();
    let bare = trimmed.trim_start_matches('.');
    if bare.is_empty() || bare.chars().any(char::is_whitespace) {
        return None;
    }
    Some(format!(".{}", bare))
}

/// Normalize a list of extensions, dropping empties and duplicates.
///
/// First occurrence wins, so the user's ordering survives.
pub fn normalize_extensions<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for ext in raw.iter().filter_map(|e| normalize_extension(e.as_ref())) {
        if !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}

/// Trim exclusion patterns and drop empties and duplicates
pub fn normalize_patterns<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for pattern in raw.iter().map(|p| p.as_ref().trim()) {
        if !pattern.is_empty() && !out.iter().any(|p| p == pattern) {
            out.push(pattern.to_string());
        }
    }
    out
}

/// Add server-known values missing from a catalog, keeping catalog order
pub fn merge_into_catalog(catalog: &mut Vec<String>, values: &[String]) -> usize {
    let mut added = 0;
    for value in values {
        if !catalog.contains(value) {
            catalog.push(value.clone());
            added += 1;
        }
    }
    added
}

/// Split free text (commas, semicolons, whitespace) into raw entries
pub fn split_entries(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c == '，' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
