use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dn_ast::{TransformConfig, WrapperCall};
use dn_parser::parse_module;
use dn_printer::{splice_module, PrintOptions};
use dn_transform::{default_to_named, Diagnostic};
use swc_common::{sync::Lrc, SourceMap};

#[derive(Parser)]
#[command(name = "defname", about = "Rewrite default exports into named exports")]
struct Cli {
    /// Log every stage decision (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite default exports and relative default imports.
    Transform {
        /// Input .js/.jsx/.ts/.tsx files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (stdout if omitted). Only valid with a single input;
        /// several inputs need --in-place.
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,
        /// Overwrite each input with its rewritten source.
        #[arg(long)]
        in_place: bool,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Run the rewrite without writing anything and report diagnostics.
    Check {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Parse the file and dump its AST.
    Parse {
        input: PathBuf,
        /// Dump as JSON instead of the debug representation.
        #[arg(long)]
        ast: bool,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// Wrapper call recognised in `export default <wrapper>(Name)`.
    #[arg(long, default_value_t = WrapperCall::default())]
    wrapper: WrapperCall,
    /// JSON file with print options (`indentWidth`, `minify`, ...).
    #[arg(long)]
    print_options: Option<PathBuf>,
}

impl PipelineArgs {
    fn config(&self) -> TransformConfig {
        TransformConfig {
            wrapper: self.wrapper.clone(),
        }
    }

    fn print_options(&self) -> Result<PrintOptions> {
        let Some(path) = &self.print_options else {
            return Ok(PrintOptions::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid print options in {}", path.display()))
    }
}

/// Result of running the pipeline over one file.
struct Rewritten {
    source: String,
    diagnostics: Vec<Diagnostic>,
    source_map: Lrc<SourceMap>,
}

fn rewrite_file(
    input: &Path,
    config: &TransformConfig,
    options: &PrintOptions,
) -> Result<Rewritten> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let filename = input.display().to_string();

    let parsed = parse_module(&source, &filename)?;
    let original = parsed.module.body.clone();
    let output = default_to_named(parsed.module, &parsed.comments, &filename, config)
        .with_context(|| format!("failed to rewrite {filename}"))?;

    let printed = splice_module(
        &source,
        &original,
        &output.module,
        &parsed.comments,
        parsed.source_map.clone(),
        options,
    )?;

    Ok(Rewritten {
        source: printed,
        diagnostics: output.diagnostics,
        source_map: parsed.source_map,
    })
}

fn report(rewritten: &Rewritten, verbose: bool) {
    for diagnostic in &rewritten.diagnostics {
        if verbose && !diagnostic.span.is_dummy() {
            let loc = rewritten.source_map.lookup_char_pos(diagnostic.span.lo);
            eprintln!(
                "{diagnostic} ({}:{}:{})",
                diagnostic.file,
                loc.line,
                loc.col_display + 1
            );
        } else {
            eprintln!("{diagnostic}");
        }
    }
}

/// Several rewritten files cannot share stdout or a single `-o` file.
fn check_destination(inputs: &[PathBuf], in_place: bool) -> Result<()> {
    if inputs.len() > 1 && !in_place {
        bail!(
            "{} inputs given: rewriting several files requires --in-place",
            inputs.len()
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut failed = 0usize;

    match cli.command {
        Commands::Transform {
            inputs,
            output,
            in_place,
            pipeline,
        } => {
            check_destination(&inputs, in_place)?;
            let config = pipeline.config();
            let options = pipeline.print_options()?;

            for input in &inputs {
                let rewritten = match rewrite_file(input, &config, &options) {
                    Ok(rewritten) => rewritten,
                    Err(e) => {
                        eprintln!("ERROR: {e:#}");
                        failed += 1;
                        continue;
                    }
                };
                report(&rewritten, cli.verbose);

                match (&output, in_place) {
                    (Some(path), _) => std::fs::write(path, &rewritten.source)?,
                    (None, true) => std::fs::write(input, &rewritten.source)?,
                    (None, false) => print!("{}", rewritten.source),
                }
            }
        }
        Commands::Check { inputs, pipeline } => {
            let config = pipeline.config();
            let options = pipeline.print_options()?;

            for input in &inputs {
                match rewrite_file(input, &config, &options) {
                    Ok(rewritten) => {
                        report(&rewritten, cli.verbose);
                        eprintln!(
                            "OK: {} ({} warning(s))",
                            input.display(),
                            rewritten.diagnostics.len()
                        );
                    }
                    Err(e) => {
                        eprintln!("ERROR: {e:#}");
                        failed += 1;
                    }
                }
            }
        }
        Commands::Parse { input, ast } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();
            let parsed = parse_module(&source, &filename)?;

            if ast {
                let json = serde_json::to_string_pretty(&parsed.module)?;
                println!("{json}");
            } else {
                println!("{:#?}", parsed.module);
            }
        }
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
