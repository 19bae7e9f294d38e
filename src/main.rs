use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sonic_sessions::io::template::TemplateSource;
use sonic_sessions::{Result, export, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init_cli(cli.verbose)?;
    match cli.command {
        Command::Dump(args) => execute_dump(args),
    }
}

fn execute_dump(args: DumpArgs) -> Result<()> {
    let template = TemplateSource::from(args.template);
    export::dump(&args.testbed_file, &template, &args.output_file)?;
    println!("Successfully dump to: {}", args.output_file.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate terminal SSH sessions from SONiC testbed inventories."
)]
struct Cli {
    /// Log pipeline details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dump ssh sessions based on a template.
    Dump(DumpArgs),
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Tera template path. Defaults to the bundled SecureCRT sample.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Testbed yaml file path.
    testbed_file: PathBuf,

    /// Output file path.
    output_file: PathBuf,
}
