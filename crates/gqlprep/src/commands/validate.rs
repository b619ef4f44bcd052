use anyhow::Context;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use graphql_prepare::Document;
use graphql_prepare::DocumentValidator;
use graphql_prepare::SchemaBuilder;
use graphql_prepare::ValidationResult;
use std::collections::HashSet;
use std::fmt::Write;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for \
             executable documents within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Emit validation results as JSON instead of human-readable \
             text.",
        long,
    )]
    json: bool,

    #[arg(
        help="Path to the SDL file defining the schema to validate against.",
        long,
        required=true,
    )]
    schema: PathBuf,

    #[arg(
        help="Paths to one or more GraphQL documents or directories \
             containing GraphQL documents which need to be validated.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub fn run(self, _cli: Cli) -> CommandResult {
        let schema = match SchemaBuilder::from_file(&self.schema)
            .and_then(SchemaBuilder::build)
        {
            Ok(schema) => schema,
            Err(errors) => {
                let mut details = String::new();
                for error in &errors {
                    let _ = writeln!(details, "  * {error}");
                }
                return CommandResult::stderr(format_args!(
                    "{} Errors building schema from {:?}:\n{details}",
                    output_utils::RED_X,
                    self.schema,
                ));
            },
        };

        let file_paths = match collect_document_paths(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        ) {
            Ok(paths) => paths,
            Err(error) => return CommandResult::stderr(format_args!(
                "{} {error}",
                output_utils::RED_X,
            )),
        };
        log::debug!("Found {} GraphQL documents to validate.", file_paths.len());

        let validator = DocumentValidator::new();
        let mut failures: Vec<(PathBuf, ValidationResult)> = vec![];
        for path in &file_paths {
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(error) => return CommandResult::stderr(format_args!(
                    "{} Failure reading {path:?}: {error}",
                    output_utils::RED_X,
                )),
            };
            let document = match Document::parse(content, Some(path.as_path())) {
                Ok(document) => document,
                Err(error) => return CommandResult::stderr(format_args!(
                    "{} Failure parsing {path:?}: {error}",
                    output_utils::RED_X,
                )),
            };

            let result = validator.validate(&schema, &document);
            if result.has_errors() {
                failures.push((path.clone(), result));
            }
        }

        if self.json {
            let report: Vec<_> = failures.iter()
                .map(|(path, result)| serde_json::json!({
                    "errors": result.errors,
                    "path": path,
                }))
                .collect();
            let body = serde_json::to_string_pretty(&report)
                .expect("validation results serialize");
            return if failures.is_empty() {
                CommandResult::stdout(format_args!("{body}"))
            } else {
                CommandResult::stderr(format_args!("{body}"))
            };
        }

        if failures.is_empty() {
            CommandResult::stdout(format_args!(
                "{} All {} GraphQL documents validated successfully.",
                output_utils::GREEN_CHECK,
                file_paths.len(),
            ))
        } else {
            let mut details = String::new();
            for (path, result) in &failures {
                let _ = writeln!(details, "{path:?}:");
                for error in &result.errors {
                    let _ = writeln!(details, "  * {error}");
                }
            }
            CommandResult::stderr(format_args!(
                "{} {} of {} GraphQL documents failed validation:\n{details}",
                output_utils::RED_X,
                failures.len(),
                file_paths.len(),
            ))
        }
    }
}

/// Gather document files from each input path. An explicitly-named file is
/// always included, even when its extension does not match the configured
/// filter; directories are walked recursively with the filter applied.
fn collect_document_paths(
    file_or_dir_paths: &[PathBuf],
    graphql_file_exts: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let graphql_file_exts: HashSet<String> = graphql_file_exts.iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect();
    let matches_ext = |path: &std::path::Path| {
        path.extension().is_some_and(|ext|
            graphql_file_exts.contains(&ext.to_string_lossy().to_string())
        )
    };

    let mut file_paths = vec![];
    for path in file_or_dir_paths {
        if path.is_file() {
            if !matches_ext(path) {
                log::warn!(
                    "Proceeding to validate {path:?} even though it doesn't \
                    match any of the --graphql-file-exts.",
                );
            }
            file_paths.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = entry.with_context(||
                format!("while scanning filesystem entries under {path:?}")
            )?;
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {:?}.", entry.path());
                continue;
            }
            if matches_ext(entry.path()) {
                file_paths.push(entry.path().to_path_buf());
            } else {
                log::trace!(
                    "Skipping file with unmatched extension: {:?}.",
                    entry.path(),
                );
            }
        }
    }

    Ok(file_paths)
}
