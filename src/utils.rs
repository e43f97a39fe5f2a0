use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::introspect::SchemaModel;

/// Rendering of a finished schema model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    Yaml,
    /// Struct-like listing of every table
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!(
                "unknown output format '{}', expected json, yaml or text",
                other
            )),
        }
    }
}

/// Render a model in the given format.
pub fn render_model(model: &SchemaModel, format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(model)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(model)?),
        OutputFormat::Text => Ok(render_text(model)),
    }
}

fn render_text(model: &SchemaModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// dialect: {}", model.dialect);
    for table in &model.tables {
        out.push('\n');
        if table.soft_delete {
            let _ = writeln!(out, "// {} uses soft deletes", table.name);
        }
        out.push_str(&table.to_string());
    }
    if !model.blacklisted.is_empty() {
        let _ = writeln!(
            out,
            "\n// no usable primary key: {}",
            model.blacklisted.join(", ")
        );
    }
    for dropped in &model.dropped_relations {
        let _ = writeln!(
            out,
            "// dropped relation {}.{} -> {}",
            dropped.table, dropped.column, dropped.referenced_table
        );
    }
    out
}

/// Write rendered output to a file, or to stdout when the path is `-`.
pub fn write_output(path: &Path, content: &str) -> crate::Result<()> {
    if path.to_string_lossy() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    } else {
        let mut out_file = File::create(path)?;
        out_file.write_all(content.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseType;
    use crate::introspect::{Column, DroppedRelation, FieldType, OrmTag, SemanticType, Table};

    fn sample_model() -> SchemaModel {
        let mut users = Table::new("users");
        users.primary_key = Some("id".to_string());
        users.soft_delete = true;
        users.columns.push(Column {
            name: "Id".to_string(),
            field_type: FieldType::Scalar(SemanticType::I64),
            tag: OrmTag {
                auto: true,
                ..OrmTag::for_column("id")
            },
        });
        SchemaModel {
            dialect: DatabaseType::MySql,
            tables: vec![users],
            blacklisted: vec!["pairs".to_string()],
            dropped_relations: vec![DroppedRelation {
                table: "orders".to_string(),
                column: "pair_id".to_string(),
                referenced_table: "pairs".to_string(),
            }],
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_text() {
        let text = render_model(&sample_model(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("// dialect: mysql\n"));
        assert!(text.contains("// users uses soft deletes\ntype Users struct {\n"));
        assert!(text.contains("Id int64 `json:\"id\" gorm:\"column:id;AUTO_INCREMENT;not null\"`"));
        assert!(text.contains("// no usable primary key: pairs"));
        assert!(text.contains("// dropped relation orders.pair_id -> pairs"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let rendered = render_model(&sample_model(), OutputFormat::Json).unwrap();
        write_output(&path, &rendered).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, rendered);
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("model.json");
        let err = write_output(&path, "{}").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_render_yaml_and_json_agree() {
        let model = sample_model();
        let yaml = render_model(&model, OutputFormat::Yaml).unwrap();
        let json = render_model(&model, OutputFormat::Json).unwrap();
        let from_yaml: SchemaModel = serde_yaml::from_str(&yaml).unwrap();
        let from_json: SchemaModel = serde_json::from_str(&json).unwrap();
        assert_eq!(from_yaml, model);
        assert_eq!(from_json, model);
    }
}
