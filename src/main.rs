use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use csvtint::cli::{decode_input, resolve_scan_config, CliArgs, OutputFormat};
use csvtint::config::ViewerConfig;
use csvtint::emit::{emit, AnsiMarkup, Markup, RtfMarkup};
use csvtint::scan::{scan, scan_all};
use csvtint::theme::{self, ThemeSource};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    csvtint::tracing::init();

    if args.list_themes {
        for info in theme::list_available_themes() {
            let source = match info.source {
                ThemeSource::User => "user",
                ThemeSource::Builtin => "builtin",
            };
            println!("{:<20} {:<24} ({})", info.id, info.name, source);
        }
        return Ok(());
    }

    let mut config = ViewerConfig::load();
    args.apply_to(&mut config);
    if args.save_config {
        config
            .save()
            .map_err(anyhow::Error::msg)
            .context("Failed to save config")?;
    }

    let content = read_input(&args)?;
    let scan_config = resolve_scan_config(&config, args.extension_delimiter(), &content)
        .context("Invalid scan configuration")?;
    tracing::debug!(?scan_config, "Resolved scan configuration");

    let rendered = match args.format {
        OutputFormat::Runs => {
            let runs = scan_all(&content, &scan_config);
            let mut json = serde_json::to_string_pretty(&runs).context("Failed to encode runs")?;
            json.push('\n');
            json
        }
        OutputFormat::Ansi | OutputFormat::Rtf => {
            let theme = theme::load_theme(&config.theme)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Failed to load theme '{}'", config.theme))?;
            let markup: &dyn Markup = match args.format {
                OutputFormat::Rtf => &RtfMarkup,
                _ => &AnsiMarkup,
            };
            emit(
                scan(&content, &scan_config),
                &theme.palette(),
                &config.display_options(),
                markup,
            )
        }
    };

    write_output(&args, &rendered)
}

fn read_input(args: &CliArgs) -> Result<String> {
    let bytes = match &args.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };
    Ok(decode_input(bytes))
}

fn write_output(args: &CliArgs, rendered: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write stdout")?;
        }
    }
    Ok(())
}
