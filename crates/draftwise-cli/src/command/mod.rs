use clap::{Parser, Subcommand};

use self::{aggregate::AggregateArg, evaluate::EvaluateArg, suggest::SuggestArg};

mod aggregate;
mod evaluate;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Aggregate raw match rows into a metrics bundle
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Evaluate both teams of a draft
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Suggest picks for the side on turn
    Suggest(#[clap(flatten)] SuggestArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Aggregate(arg) => aggregate::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
    }
    Ok(())
}
