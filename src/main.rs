use clap::{Parser, Subcommand};

mod cmd;
mod core;

#[derive(Parser, Debug)]
#[command(
    name = "bbm-recap",
    version,
    about = "Daily fuel stock movement recaps from transaction history"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Consolidated daily movement table across all fuel types
    Recap(cmd::recap::RecapCommand),
    /// Flat per-fuel daily movement listing
    Daily(cmd::daily::DailyCommand),
    /// Surface data quality issues in the transaction history
    Validate(cmd::validate::ValidateCommand),
    /// Export the recap as a self-contained HTML table
    Html(cmd::html_report::HtmlCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Recap(cmd) => cmd.exec(),
        Command::Daily(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::Html(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
