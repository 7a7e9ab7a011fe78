use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use content_schema_core::{
    AliasResolver, ComponentParser, ComponentSchema, ContentType, Diagnostic, ItemDescription,
    OutputTree, validate_schema,
};
use content_schema_db::{ParserConfig, SchemaCatalog};
use rayon::prelude::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output document format.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

impl CliOutputFormat {
    fn extension(self) -> &'static str {
        match self {
            CliOutputFormat::Json => "json",
            CliOutputFormat::Yaml => "yaml",
        }
    }

    fn render(self, document: &serde_json::Value) -> Result<String, String> {
        match self {
            CliOutputFormat::Json => serde_json::to_string_pretty(document)
                .map_err(|err| format!("Failed to serialize JSON: {err}")),
            CliOutputFormat::Yaml => serde_yaml::to_string(document)
                .map_err(|err| format!("Failed to serialize YAML: {err}")),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "content-parse")]
#[command(about = "Validate authored content descriptions against component schemas")]
struct Cli {
    /// Emit debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse description files into validated output documents.
    Parse(ParseArgs),
    /// Check schema definition files for structural errors.
    CheckSchema(CheckSchemaArgs),
    /// List the fields a content type accepts.
    Fields(FieldsArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Content type of every input (block, item, entity, recipe).
    #[arg(long = "type")]
    content_type: ContentType,
    /// Description files (JSON, or YAML by .yaml/.yml extension).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Directory of per-content-type schema files (overrides the config).
    #[arg(long)]
    schemas: Option<PathBuf>,
    /// Parser configuration YAML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Write one `<stem>.<ext>` document per input here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckSchemaArgs {
    /// Schema files (JSON, or YAML by .yaml/.yml extension).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct FieldsArgs {
    /// Content type to list.
    #[arg(long = "type")]
    content_type: ContentType,
    /// Directory of per-content-type schema files.
    #[arg(long)]
    schemas: Option<PathBuf>,
}

/// Result of parsing one input file.
struct FileOutcome {
    path: PathBuf,
    tree: OutputTree,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::CheckSchema(args) => run_check_schema(args),
        Command::Fields(args) => run_fields(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "content_schema=debug,content_parse=debug"
    } else {
        "content_schema=error,content_parse=error"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => ParserConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ParserConfig::default(),
    };
    let schemas = args.schemas.as_ref().or(config.schemas.as_ref());
    let catalog = load_catalog(schemas)?;

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir).map_err(|err| {
            format!("Failed to create output directory '{}': {err}", dir.display())
        })?;
    }

    let parser = ComponentParser::new(catalog.registry()).with_options(config.validation);
    let content_type = args.content_type;

    let outcomes: Vec<Result<FileOutcome, String>> = args
        .inputs
        .par_iter()
        .map(|path| {
            let description: ItemDescription = read_document(path)?;
            let outcome = parser
                .parse(&description, content_type)
                .map_err(|err| format!("{}: {err}", path.display()))?;
            Ok(FileOutcome {
                path: path.clone(),
                tree: outcome.tree,
                diagnostics: outcome.diagnostics,
            })
        })
        .collect();

    let mut failed = 0usize;
    let mut diagnostic_count = 0usize;
    for outcome in outcomes {
        let outcome = outcome?;
        for diagnostic in &outcome.diagnostics {
            eprintln!("{}: {diagnostic}", outcome.path.display());
        }
        diagnostic_count += outcome.diagnostics.len();
        if config.fail_on.blocks(&outcome.diagnostics) {
            failed += 1;
        }

        let rendered = args.format.render(&outcome.tree.to_document(content_type))?;
        match &args.output {
            Some(dir) => {
                let stem = outcome
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let path = dir.join(format!("{stem}.{}", args.format.extension()));
                fs::write(&path, rendered)
                    .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            }
            None => println!("{rendered}"),
        }
    }

    debug!(
        inputs = args.inputs.len(),
        diagnostics = diagnostic_count,
        failed,
        "Parse run finished"
    );

    if failed > 0 {
        return Err(format!(
            "{failed} of {} description(s) failed validation",
            args.inputs.len()
        ));
    }
    Ok(())
}

fn run_check_schema(args: CheckSchemaArgs) -> Result<(), String> {
    let aliases = AliasResolver::default();
    let mut invalid = 0usize;

    for path in &args.inputs {
        let schema: ComponentSchema = read_document(path)?;
        let errors = validate_schema(&schema, &aliases);
        if errors.is_empty() {
            println!("{}: ok ({} field(s))", path.display(), schema.len());
        } else {
            invalid += 1;
            for err in &errors {
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    if invalid > 0 {
        return Err(format!("{invalid} schema file(s) failed validation"));
    }
    Ok(())
}

fn run_fields(args: FieldsArgs) -> Result<(), String> {
    let catalog = load_catalog(args.schemas.as_ref())?;
    let schema = catalog
        .registry()
        .resolve(args.content_type)
        .map_err(|err| err.to_string())?;

    let mut fields: Vec<(&str, String)> = schema
        .fields()
        .map(|(field, alternatives)| {
            let types = alternatives
                .iter()
                .map(|spec| spec.kind.type_name())
                .collect::<Vec<_>>()
                .join(" | ");
            (field, types)
        })
        .collect();
    fields.sort();

    for (field, types) in fields {
        println!("{field}: {types}");
    }
    Ok(())
}

fn load_catalog(schemas: Option<&PathBuf>) -> Result<SchemaCatalog, String> {
    let result = match schemas {
        Some(dir) => SchemaCatalog::from_dir(dir),
        None => SchemaCatalog::builtin(),
    };
    result.map_err(|err| format!("Failed to load schemas: {err}"))
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    } else {
        serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}
