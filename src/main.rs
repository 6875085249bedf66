use clap::{Parser, Subcommand};
use daypages::types::BuildStamp;
use daypages::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daypages")]
#[command(about = "Static site generator for a multilingual events & holidays calendar")]
#[command(long_about = "\
Static site generator for a multilingual events & holidays calendar

Reads a JSON array of event records and writes one page per language and
calendar day of the target year, one page per month, a language-detecting
/today/ redirect, robots.txt and sitemap.xml.

Output structure:

  dist/
  ├── today/index.html             # Redirects to the viewer's current date
  ├── uk/index.html                # Forwards to /today/
  ├── uk/2026/03/index.html        # Month calendar
  ├── uk/2026/03/08/index.html     # Events of one day
  ├── en/ ...
  ├── assets/style.css
  ├── robots.txt
  └── sitemap.xml

Only records with \"verified\": true are shown. Records dated in another year
are skipped; records without a year recur every year.

Run 'daypages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Path to config.toml (stock defaults when the file does not exist)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site into the output directory
    Build,
    /// Validate config and dataset without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Building {}", site_config.target_year);
            let summary = generate::build(&site_config, BuildStamp::today())?;
            output::print_build_output(&summary);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", site_config.data_file.display());
            let report = generate::check(&site_config)?;
            output::print_check_output(&report);
            println!("==> Dataset is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
