mod plan;
mod validate;

use crate::Cli;
use crate::CommandResult;
use plan::PlanCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlprep")]
pub(crate) enum CommandEnum {
    Plan(Box<PlanCmd>),
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Plan(cmd) => cmd.run(cli),
            Self::Validate(cmd) => cmd.run(cli),
        }
    }
}
