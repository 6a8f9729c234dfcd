mod config;

use std::{
    io::Write,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use config::Config;
use graphql_typegen::{Documents, GeneratorConfig, Schema};

#[derive(Debug, Parser)]
#[command(name = "graphql-typegen", version)]
struct Interface {
    /// The configuration file to use
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() {
    let filter = tracing_subscriber::filter::EnvFilter::builder()
        .parse(std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let arguments = Interface::parse();

    let exit_code = match try_main(arguments) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error:#}");
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(arguments: Interface) -> anyhow::Result<()> {
    let config = Config::load(&arguments.config)?;

    let sdl = load_schema_text(&config)?;
    let schema: Schema = async_graphql_parser::parse_schema(&sdl)
        .map_err(|error| anyhow::anyhow!("failed to parse schema: {error}"))?
        .into();

    let documents = load_documents(&config.queries)?;
    let generator_config: GeneratorConfig = config.generator_config();

    tracing::info!(
        "generating response types for {} operation(s)",
        documents.operations.len()
    );
    let generated = graphql_typegen::generate_file(&schema, &documents, &generator_config)?;

    if let Some(parent) = config.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.output, rustfmt(&generated))?;
    tracing::info!("wrote {}", config.output.display());

    Ok(())
}

fn load_schema_text(config: &Config) -> anyhow::Result<String> {
    if !config.schema.is_empty() {
        let mut sdl = String::new();
        for path in &config.schema {
            tracing::info!("reading schema from {}", path.display());
            sdl.push_str(&std::fs::read_to_string(path)?);
            sdl.push('\n');
        }
        return Ok(sdl);
    }

    // Validated at load time: no local schema means an endpoint is set.
    let endpoint = config.endpoint.as_ref().expect("validated by Config::load");
    tracing::info!("introspecting schema from {}", endpoint.url);

    let headers: Vec<(&str, &str)> = endpoint
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(graphql_typegen_introspection::introspect(&endpoint.url, &headers))?)
}

fn load_documents(queries: &[PathBuf]) -> anyhow::Result<Documents> {
    let mut parsed = Vec::new();
    for path in queries {
        for file in document_files(path)? {
            tracing::info!("reading operations from {}", file.display());
            let source = std::fs::read_to_string(&file)?;
            let document = async_graphql_parser::parse_query(&source).map_err(|error| {
                anyhow::anyhow!("failed to parse {}: {error}", file.display())
            })?;
            parsed.push(document);
        }
    }

    Ok(Documents::collect(parsed)?)
}

/// A path entry is either one document or a directory scanned (one level)
/// for `.graphql` and `.gql` files in name order.
fn document_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        let extension = entry_path.extension().and_then(|extension| extension.to_str());
        if matches!(extension, Some("graphql") | Some("gql")) {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Formats generated code through rustfmt when available; the unformatted
/// text is already valid Rust, so a missing rustfmt is not an error.
fn rustfmt(code: &str) -> String {
    let spawned = process::Command::new("rustfmt")
        .arg("--edition=2021")
        .stdin(process::Stdio::piped())
        .stdout(process::Stdio::piped())
        .stderr(process::Stdio::null())
        .spawn();

    let Ok(mut child) = spawned else {
        return code.to_owned();
    };

    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(code.as_bytes()).is_err() {
            return code.to_owned();
        }
    }

    match child.wait_with_output() {
        Ok(output) if output.status.success() => {
            String::from_utf8(output.stdout).unwrap_or_else(|_| code.to_owned())
        }
        _ => {
            tracing::warn!("rustfmt failed, writing unformatted output");
            code.to_owned()
        }
    }
}
