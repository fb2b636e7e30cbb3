use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use umlseq::{Editor, Model, SvgOptions};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Normalized UML text
    Uml,
    /// SVG document
    Svg,
    /// Plain-text editing panel
    Panel,
}

#[derive(Parser)]
#[command(name = "umlseq", version, about = "Edit sequence diagrams as UML text and render them to SVG")]
struct Cli {
    /// Input file with UML text (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "svg")]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Diagram width in SVG user units
    #[arg(long, short = 'w')]
    width: Option<f64>,

    /// Start from the built-in example diagram instead of reading input
    #[arg(long, conflicts_with = "file")]
    seed: bool,

    /// Fail when a line is neither a message nor a note
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let editor = if cli.seed {
        Editor::new()
    } else {
        let input = read_input(cli.file.as_ref())?;
        if cli.strict {
            Editor::with_model(umlseq::parse_uml(&input).into_strict()?)?
        } else {
            let mut editor = Editor::with_model(Model::default())?;
            editor.apply_uml(&input);
            editor
        }
    };

    let options = match cli.width {
        Some(width) => SvgOptions::with_width(width)?,
        None => SvgOptions::default(),
    };

    let mut output = match cli.format {
        Format::Uml => editor.uml_text(),
        Format::Svg => umlseq::render_model_svg(editor.model(), &options),
        Format::Panel => umlseq::panel::render(editor.model()),
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match cli.output {
        Some(path) => {
            std::fs::write(&path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote diagram");
        }
        None => print!("{output}"),
    }
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
