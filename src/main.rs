use clap::{Parser, Subcommand, ValueEnum};
use scalene_config::utils::logger::{self, LogFormat};
use scalene_config::utils::validation::Validate;
use scalene_config::{write_native_header, ConfigError, NativeHeader, ScaleneConfig, NATIVE_HEADER};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scalene-config")]
#[command(about = "Inspect the profiler's build identity and native allocator constants")]
#[command(disable_version_flag = true)]
struct Args {
    /// Print "<version> (<release date>)" and exit
    #[arg(short = 'V', long)]
    version: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the configuration record
    Show {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print or write the generated sampling-heap header
    Header {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that a native header agrees with the trigger length
    Check {
        /// Path to the allocator header to inspect
        #[arg(long)]
        header: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Toml,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ScaleneConfig::current();

    if args.version {
        println!("{}", config.version().version_line());
        return Ok(());
    }

    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(args.verbose, format);
    tracing::debug!("args: {:?}", args);

    if let Err(e) = run(config, args.command.unwrap_or(Command::Show { format: Format::Text })) {
        tracing::error!("{}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        let exit_code = match e {
            ConfigError::NativeDriftError { .. }
            | ConfigError::NativeConstantMissing { .. }
            | ConfigError::NativeConstantAmbiguous { .. } => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run(config: &ScaleneConfig, command: Command) -> scalene_config::Result<()> {
    config.validate()?;

    match command {
        Command::Show { format } => match format {
            Format::Text => {
                let threshold = config.threshold();
                println!("version:                {}", config.version().version());
                println!("release date:           {}", config.version().release_date());
                println!("ui port:                {}", config.ui_port());
                println!("newline trigger length: {}", threshold.trigger_length());
                println!("sampleheap newline:     {}", threshold.rollover());
            }
            Format::Json => println!("{}", config.to_json()?),
            Format::Toml => print!("{}", config.to_toml()?),
        },
        Command::Header { output } => match output {
            Some(path) => write_native_header(&path)?,
            None => print!("{}", NATIVE_HEADER),
        },
        Command::Check { header } => {
            let native = NativeHeader::from_file(&header)?;
            native.verify(&config.threshold())?;
            tracing::info!("{} is in sync", header.display());
            println!(
                "✅ {}: NEWLINE = {} matches trigger length {} + 1",
                header.display(),
                native.newline(),
                config.threshold().trigger_length()
            );
        }
    }

    Ok(())
}
