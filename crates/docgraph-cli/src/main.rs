use anyhow::{Context, Result, bail};
use docgraph_config::StyleConfig;
use docgraph_engine::{DocumentGraph, DocumentInput, StaticNumbering, TextFormat, build_document};
use std::{env, path::PathBuf, process};

struct Args {
    document_path: PathBuf,
    styles_path: PathBuf,
    format: TextFormat,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let (document, styles, format) = match args {
        [_, document, styles] => (document, styles, None),
        [_, document, styles, format] => (document, styles, Some(format)),
        _ => bail!("expected a document and a style config"),
    };
    let format = match format {
        Some(name) => name.parse::<TextFormat>()?,
        None => TextFormat::Plain,
    };
    Ok(Args {
        document_path: PathBuf::from(document),
        styles_path: PathBuf::from(styles),
        format,
    })
}

fn load(args: &Args) -> Result<DocumentGraph> {
    let Some(config) = StyleConfig::load_from_path(&args.styles_path)? else {
        bail!("style config '{}' does not exist", args.styles_path.display());
    };

    let json = std::fs::read_to_string(&args.document_path)
        .with_context(|| format!("reading '{}'", args.document_path.display()))?;
    let input: DocumentInput = serde_json::from_str(&json)
        .with_context(|| format!("parsing '{}'", args.document_path.display()))?;
    log::info!(
        "loaded {} blocks and {} list levels from {}",
        input.blocks.len(),
        input.lists.len(),
        args.document_path.display()
    );

    let lists = StaticNumbering::from_records(&input.lists)?;
    Ok(build_document(&input.blocks, &config, &lists)?)
}

fn print_outline(graph: &DocumentGraph, format: TextFormat) {
    for (depth, node) in graph.walk() {
        let indent = "  ".repeat(depth);
        let identifier = node.identifier().replace('\n', " ");
        match node.numbering_label() {
            Some(label) => println!("{indent}{identifier}  {label} {}", node.render(format)),
            None => println!("{indent}{identifier}  {}", node.render(format)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Usage: {} <document.json> <styles.toml> [html|markdown|plain]",
                args.first().map_or("docgraph", String::as_str)
            );
            process::exit(1);
        }
    };

    let graph = load(&args)?;
    log::info!(
        "built outline with {} nodes under {} roots",
        graph.len(),
        graph.roots().len()
    );
    print_outline(&graph, args.format);
    Ok(())
}
