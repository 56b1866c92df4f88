// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use document_validator::{DocumentValidator, ValidationError, parse_document};
use schema_model::Schema;

const GQLCHECK_LOG: &str = "GQLCHECK_LOG";

/// Validate GraphQL documents against a captured introspection schema.
#[derive(Parser)]
#[command(name = "gqlcheck", version)]
struct Cli {
    /// Path to the introspection schema JSON
    #[arg(short, long, value_name = "FILE")]
    schema: PathBuf,

    /// GraphQL document files to validate
    #[arg(required = true, value_name = "DOCUMENT")]
    documents: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let schema_json = std::fs::read_to_string(&cli.schema)
        .with_context(|| format!("Failed to read schema file '{}'", cli.schema.display()))?;
    let schema = Schema::from_introspection_json(&schema_json)
        .with_context(|| format!("Failed to load schema from '{}'", cli.schema.display()))?;

    let mut failures = 0;
    for document_path in &cli.documents {
        let source = std::fs::read_to_string(document_path)
            .with_context(|| format!("Failed to read document '{}'", document_path.display()))?;

        match check_document(&schema, &source) {
            Ok(()) => {
                println!("{} {}", "✓".green(), document_path.display());
            }
            Err(error) => {
                failures += 1;
                report(document_path, &error);
            }
        }
    }

    if failures > 0 {
        exit(1);
    }

    Ok(())
}

fn check_document(schema: &Schema, source: &str) -> Result<(), ValidationError> {
    let document = parse_document(source)?;
    DocumentValidator::new(schema).validate(&document)?;
    Ok(())
}

/// Diagnostics are surfaced with the originating file path prepended, so
/// editors and CI logs can jump to the offending position.
fn report(document_path: &Path, error: &ValidationError) {
    let pos = error.position();
    eprintln!(
        "{}:{}:{}: {} {}",
        document_path.display(),
        pos.line,
        pos.column,
        "error:".red().bold(),
        error
    );
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(GQLCHECK_LOG)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .init();
}
