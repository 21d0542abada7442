use crate::cli::OutputFormat;
use colored::Colorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_value(value: &Value, format: OutputFormat) {
    println!("{}", render(value, format));
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn success_message(operation: &str, asset_type: &str, provider: &str) -> String {
    format!("{operation} for {asset_type} asset with provider {provider} succeeded")
}

pub fn render(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(value),
        OutputFormat::Table => render_table(value),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// Dashboard responses are flat `{Status, Message, Meta}` objects; anything
// else falls back to JSON.
fn render_table(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return pretty(value);
    };
    if object.is_empty() {
        return "(empty response)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, field) in object {
        let cell = match field {
            Value::String(s) => s.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        builder.push_record([key.clone(), cell]);
    }
    builder.build().with(Style::rounded()).to_string()
}
