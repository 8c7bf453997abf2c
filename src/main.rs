use clap::{Parser, Subcommand};

use fieldcheck::Result;
use fieldcheck::schema::{FieldView, SchemaDocument, SchemaRegistry};
use fieldcheck::validate::Validator;

#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(about = "Schema-driven field validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the derived schema and UI hints for one field.
    Describe {
        /// Schema document file (JSON).
        #[arg(long)]
        schemas: String,

        #[arg(long)]
        field: String,
    },
    /// Validate an input value against a field's derived schema.
    Check {
        /// Schema document file (JSON).
        #[arg(long)]
        schemas: String,

        #[arg(long)]
        field: String,

        /// Input value, parsed as JSON; anything that does not parse is
        /// treated as a plain string.
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Describe { schemas, field } => {
            let registry = load_registry(&schemas)?;
            let view = FieldView::new(&registry, &field);

            println!("field:       {}", view.field_name);
            println!("input kind:  {}", view.input_kind.as_str());
            println!("array type:  {}", view.is_array_type);
            println!("description: {}", view.description);
            println!("placeholder: {}", view.placeholder);
            if !view.input_options.is_empty() {
                println!("options:");
                for option in &view.input_options {
                    println!("  {} ({})", option.value, option.label);
                }
            }
            match &view.schema {
                Some(schema) => {
                    println!("schema:      {}", serde_json::to_string_pretty(schema)?)
                }
                None => println!("schema:      none (field is unconstrained)"),
            }
        }
        Commands::Check {
            schemas,
            field,
            input,
        } => {
            let registry = load_registry(&schemas)?;
            let view = FieldView::new(&registry, &field);

            let input: serde_json::Value = serde_json::from_str(&input)
                .unwrap_or_else(|_| serde_json::Value::String(input));

            let outcome = Validator::new().validate(
                &field,
                view.schema.as_ref(),
                &input,
                view.is_array_type,
                &registry,
            );

            if outcome.is_valid {
                println!("valid");
            } else {
                println!(
                    "invalid: {}",
                    outcome.error.as_deref().unwrap_or("Invalid input")
                );
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_registry(path: &str) -> Result<SchemaRegistry> {
    use anyhow::Context;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read schema document {}", path))?;
    let doc: SchemaDocument = serde_json::from_str(&text)
        .with_context(|| format!("parse schema document {}", path))?;
    Ok(SchemaRegistry::from_document(doc))
}
