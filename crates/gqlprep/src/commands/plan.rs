use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use graphql_prepare::prepare::PrepareOptions;
use graphql_prepare::Document;
use graphql_prepare::PrepareError;
use graphql_prepare::SchemaBuilder;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct PlanCmd {
    #[arg(
        help="Path to the executable GraphQL document to prepare.",
        name="DOCUMENT_PATH",
        required=true,
    )]
    document_path: PathBuf,

    #[arg(
        help="Maximum number of selections allowed in one merged selection \
             list.",
        long,
    )]
    max_breadth: Option<usize>,

    #[arg(
        help="Maximum field-nesting depth allowed in the document.",
        long,
    )]
    max_depth: Option<usize>,

    #[arg(
        help="Name of the operation to prepare. Required when the document \
             defines more than one operation.",
        long,
        short='o',
    )]
    operation: Option<String>,

    #[arg(
        help="Path to the SDL file defining the schema to prepare against.",
        long,
        required=true,
    )]
    schema: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for PlanCmd {
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

        let content = match std::fs::read_to_string(&self.document_path) {
            Ok(content) => content,
            Err(error) => return CommandResult::stderr(format_args!(
                "{} Failure reading {:?}: {error}",
                output_utils::RED_X,
                self.document_path,
            )),
        };
        let document = match Document::parse(
            content,
            Some(self.document_path.as_path()),
        ) {
            Ok(document) => document,
            Err(error) => return CommandResult::stderr(format_args!(
                "{} Failure parsing {:?}: {error}",
                output_utils::RED_X,
                self.document_path,
            )),
        };

        let defaults = PrepareOptions::default();
        let options = PrepareOptions {
            max_breadth: self.max_breadth.unwrap_or(defaults.max_breadth),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
        };

        let operation = match graphql_prepare::prepare(
            &schema,
            &document,
            self.operation.as_deref(),
            &options,
        ) {
            Ok(operation) => operation,

            Err(PrepareError::Validation(result)) =>
                return CommandResult::stderr(format_args!(
                    "{} The document failed validation:\n{result}",
                    output_utils::RED_X,
                )),

            Err(error) => return CommandResult::stderr(format_args!(
                "{} {error}",
                output_utils::RED_X,
            )),
        };

        log::debug!(
            "Prepared operation `{}` against {:?}.",
            operation.name().unwrap_or("<anonymous>"),
            self.schema,
        );
        CommandResult::stdout(format_args!(
            concat!(
                "{} Prepared {} operation{}\n",
                "  * id: {}\n",
                "  * root type: {}\n",
                "  * root selections: {}\n",
                "  * proposed tasks: {}\n",
                "\n{}",
            ),
            output_utils::GREEN_CHECK,
            operation.operation_kind_name(),
            match operation.name() {
                Some(name) => format!(" `{name}`:"),
                None => ":".to_string(),
            },
            operation.id(),
            operation.root_type().name(),
            operation.get_root_selections().len(),
            operation.proposed_task_count(),
            operation.print(),
        ))
    }
}
