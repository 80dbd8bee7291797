//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use trove_core::{Item, PropertyIndex, PropertyValue, ValueMatch};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single item with its properties
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("Name: {}", item.name);
                println!("Id:   {}", item.id.as_deref().unwrap_or("(not yet synced)"));
                if item.properties.is_empty() {
                    println!("No properties.");
                } else {
                    println!("Properties:");
                    for (name, value) in &item.properties {
                        println!("  {}: {}", name, value);
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", item.id.as_deref().unwrap_or(&item.name));
            }
        }
    }

    /// Print a list of items
    pub fn print_items(&self, items: &[Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items found.");
                    return;
                }
                for item in items {
                    println!(
                        "{} | {} | {} propert{}",
                        item.id.as_deref().unwrap_or("-"),
                        truncate(&item.name, 40),
                        item.properties.len(),
                        if item.properties.len() == 1 { "y" } else { "ies" }
                    );
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id.as_deref().unwrap_or(&item.name));
                }
            }
        }
    }

    /// Print the property-name index
    pub fn print_properties(&self, index: &PropertyIndex) {
        match self.format {
            OutputFormat::Human => {
                if index.is_empty() {
                    println!("No properties found.");
                    return;
                }
                for name in index.names() {
                    println!("{}", name);
                }
                println!("\n{} property name(s)", index.len());
            }
            OutputFormat::Json => {
                let names: Vec<_> = index.names().collect();
                println!("{}", serde_json::to_string_pretty(&names).unwrap());
            }
            OutputFormat::Quiet => {
                for name in index.names() {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print the values collected by a name-fragment search
    pub fn print_values(&self, values: &[Option<PropertyValue>]) {
        match self.format {
            OutputFormat::Human => {
                if values.is_empty() {
                    println!("No values found.");
                    return;
                }
                for value in values {
                    match value {
                        Some(v) => println!("{}", v),
                        None => println!("(none)"),
                    }
                }
                println!("\n{} value(s)", values.len());
            }
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = values
                    .iter()
                    .map(|v| match v {
                        Some(v) => serde_json::to_value(v).unwrap(),
                        None => serde_json::Value::Null,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for value in values.iter().flatten() {
                    println!("{}", value);
                }
            }
        }
    }

    /// Print value-search matches
    pub fn print_matches(&self, matches: &[ValueMatch]) {
        match self.format {
            OutputFormat::Human => {
                if matches.is_empty() {
                    println!("No matches found.");
                    return;
                }
                for m in matches {
                    println!(
                        "{} | {} = {}",
                        truncate(&m.item_name, 40),
                        m.property,
                        m.value
                    );
                }
                println!("\n{} match(es)", matches.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = matches
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "item": m.item_name,
                            "id": m.item_id,
                            "property": m.property,
                            "value": m.value,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for m in matches {
                    println!("{}", m.item_name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_is_quiet() {
        assert!(Output::new(OutputFormat::Quiet).is_quiet());
        assert!(!Output::new(OutputFormat::Human).is_quiet());
    }
}
