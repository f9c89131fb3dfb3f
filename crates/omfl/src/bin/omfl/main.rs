mod cli;

use anyhow::Context;
use omfl::{Kind, Node, Parsed};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("OMFL_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Convert(convert_cli) => convert(convert_cli),
        cli::Command::Check(check_cli) => check(check_cli),
        cli::Command::Get(get_cli) => get(get_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn convert(cli: cli::ConvertCommand) -> anyhow::Result<()> {
    let root = load_valid(&cli.input)?;
    let format = omfl::Format::from(cli.format);

    match &cli.output_file {
        Some(path) => root
            .write(format, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", root.render(format)),
    }

    Ok(())
}

pub fn check(cli: cli::CheckCommand) -> anyhow::Result<()> {
    let parsed = load(&cli.input)?;

    for issue in &parsed.issues {
        println!("{issue}");
    }

    anyhow::ensure!(
        parsed.root.is_valid(),
        "Invalid document ({} issues)",
        parsed.issues.len()
    );
    Ok(())
}

pub fn get(cli: cli::GetCommand) -> anyhow::Result<()> {
    let root = load_valid(&cli.input)?;

    let node = root.get(&cli.path);
    anyhow::ensure!(node.kind() != Kind::Missing, "No value at {}", cli.path);

    output(cli.format, node)
}

/// Read and parse the input; a missing file is an error here
fn load(input: &cli::InputArgs) -> anyhow::Result<Parsed> {
    let text = match &input.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    Ok(omfl::parse_report(&text))
}

fn load_valid(input: &cli::InputArgs) -> anyhow::Result<Node> {
    let parsed = load(input)?;
    if !parsed.root.is_valid() {
        for issue in &parsed.issues {
            eprintln!("{issue}");
        }
    }

    parsed.into_result().context("Invalid document")
}

fn output(format: cli::ValueFormat, node: &Node) -> anyhow::Result<()> {
    match format {
        cli::ValueFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), node)?,
        cli::ValueFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), node)?;
            println!();
        }
    };

    Ok(())
}
