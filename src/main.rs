use anyhow::{Context, Result};
use antfarm::{
    init_logging, plan_file, ClassifierChoice, JsonSink, LogFormat, PlanOverrides, BUILD_DATE,
    VERSION,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan tool-center paths for a job file (JSON or TOML)
    Plan {
        #[arg(value_name = "JOB")]
        job: PathBuf,

        /// Output file for the planned paths; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of isolation passes (gerber jobs only)
        #[arg(long)]
        passes: Option<u32>,

        /// Tool diameter in job units
        #[arg(long)]
        tool_diameter: Option<f64>,

        /// External contour selection for profile jobs
        #[arg(long, value_enum, default_value_t = ClassifierChoice::Largest)]
        classifier: ClassifierChoice,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;
    tracing::debug!("antfarm {} built {}", VERSION, BUILD_DATE);

    match cli.command {
        Command::Plan {
            job,
            output,
            passes,
            tool_diameter,
            classifier,
            pretty,
        } => {
            let overrides = PlanOverrides {
                passes,
                tool_diameter,
                classifier,
            };

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create output file: {:?}", path))?;
                    let mut sink = JsonSink::new(BufWriter::new(file)).pretty(pretty);
                    plan_file(&job, &overrides, &mut sink)?;
                }
                None => {
                    let mut sink = JsonSink::new(io::stdout().lock()).pretty(pretty);
                    plan_file(&job, &overrides, &mut sink)?;
                }
            }
        }
    }

    Ok(())
}
