//! CLI command implementations.

use std::path::PathBuf;

use sift::{Config, DeclaredType, FilterRequest, Predicate, TimestampPolicy, Translator};

/// Options shared by every subcommand.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub strict_timestamps: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Sift(#[from] sift::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format: {0} (expected json or sql)")]
    UnknownFormat(String),

    #[error("Format sql needs a numeric or date field, got {0}")]
    NotSql(DeclaredType),
}

type Result<T> = std::result::Result<T, CommandError>;

fn translator(opts: &GlobalOptions) -> Result<Translator> {
    let mut config = match &opts.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if opts.strict_timestamps {
        config.timestamps = TimestampPolicy::Strict;
    }
    Ok(Translator::new(config))
}

fn request(field: &str, declared_type: &str, values: Vec<String>) -> Result<FilterRequest> {
    let declared_type: DeclaredType = declared_type.parse()?;
    Ok(FilterRequest::new(field, declared_type, values))
}

/// Translate tokens and print the rendered predicate.
pub fn translate(
    opts: &GlobalOptions,
    field: &str,
    declared_type: &str,
    values: Vec<String>,
    format: &str,
) -> Result<()> {
    let translator = translator(opts)?;
    let request = request(field, declared_type, values)?;

    match format {
        "json" => {
            let predicate = translator.translate(&request)?;
            println!("{}", serde_json::to_string_pretty(&predicate)?);
        }
        "sql" => match translator.translate(&request)? {
            Predicate::Sql(sql) => {
                println!("{}", sql.fragment);
                println!("{}", serde_json::to_string(&sql.params)?);
            }
            Predicate::Document(_) => return Err(CommandError::NotSql(request.declared_type)),
        },
        other => return Err(CommandError::UnknownFormat(other.to_string())),
    }
    Ok(())
}

/// Print the intents for the tokens without rendering them.
pub fn intent(
    opts: &GlobalOptions,
    field: &str,
    declared_type: &str,
    values: Vec<String>,
) -> Result<()> {
    let translator = translator(opts)?;
    let request = request(field, declared_type, values)?;
    let intents = translator.intents(&request)?;
    println!("{}", serde_json::to_string_pretty(&intents)?);
    Ok(())
}
