//! Implementation of the `strata list` command.

use serde::Serialize;

use strata_core::domain::{ArchitectureStyle, DEFAULT_METHODS, METHOD_CATALOG, StateManagement};

use crate::{
    cli::{ListArgs, ListFormat, ListTopic},
    error::CliResult,
    output::OutputManager,
};

/// One listed item, shared by every output format.
#[derive(Debug, Serialize)]
struct Row {
    topic: &'static str,
    name: &'static str,
    /// Dart signature for methods, with `Entity` as the entity class.
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    description: String,
    /// Part of the canonical set used when nothing is requested.
    default: bool,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let rows = rows(args.topic);

    match args.format {
        ListFormat::Table => {
            let mut current = "";
            for row in &rows {
                if row.topic != current {
                    if !current.is_empty() {
                        output.print("")?;
                    }
                    current = row.topic;
                    output.header(&format!("{}:", heading(row.topic)))?;
                }
                let marker = if row.default { "*" } else { " " };
                let detail = row.signature.as_deref().unwrap_or(&row.description);
                output.print(&format!("  {marker} {:<18} {detail}", row.name))?;
            }
            output.print("")?;
            output.detail("  * default")?;
        }

        ListFormat::Json => {
            // JSON must stay parseable in pipes, so it bypasses quiet mode.
            output.json(&rows)?;
        }

        ListFormat::List => {
            for row in &rows {
                println!("{}", row.name);
            }
        }

        ListFormat::Csv => {
            println!("topic,name,signature,description,default");
            for row in &rows {
                println!(
                    "{},{},{},{},{}",
                    row.topic,
                    row.name,
                    csv_field(row.signature.as_deref().unwrap_or("")),
                    csv_field(&row.description),
                    row.default
                );
            }
        }
    }

    Ok(())
}

fn rows(topic: Option<ListTopic>) -> Vec<Row> {
    let wanted = |t: ListTopic| topic.is_none_or(|only| only == t);
    let mut rows = Vec::new();

    if wanted(ListTopic::Methods) {
        rows.extend(METHOD_CATALOG.iter().map(|def| Row {
            topic: "method",
            name: def.name,
            signature: Some(def.signature("Entity")),
            description: def.doc.replace("{entity}", "entity"),
            default: DEFAULT_METHODS.contains(&def.method),
        }));
    }
    if wanted(ListTopic::Architectures) {
        rows.extend(ArchitectureStyle::ALL.iter().map(|style| Row {
            topic: "architecture",
            name: style.as_str(),
            signature: None,
            description: style.description().to_string(),
            default: *style == ArchitectureStyle::default(),
        }));
    }
    if wanted(ListTopic::States) {
        rows.extend(StateManagement::ALL.iter().map(|style| Row {
            topic: "state",
            name: style.as_str(),
            signature: None,
            description: style.description().to_string(),
            default: *style == StateManagement::default(),
        }));
    }
    rows
}

fn heading(topic: &str) -> &'static str {
    match topic {
        "method" => "Repository methods",
        "architecture" => "Architecture styles",
        _ => "State management",
    }
}

/// Quote a field when it holds a separator or a quote.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
