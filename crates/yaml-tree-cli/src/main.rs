use clap::Parser;
use yaml_tree::{DumpOptions, Dumped, RawDocument, Warning};

#[derive(clap::Parser, Debug)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Read a YAML stream and write its document trees as JSON.
    Load {
        #[clap(value_parser, short, long, default_value = "-")]
        input: clio::Input,
        #[clap(value_parser, short, long, default_value = "-")]
        output: clio::Output,
        #[clap(long)]
        pretty: bool,
    },
    /// Read document trees as JSON and write them as a YAML stream.
    Dump {
        #[clap(value_parser, short, long, default_value = "-")]
        input: clio::Input,
        #[clap(value_parser, short, long, default_value = "-")]
        output: clio::Output,
        #[clap(long)]
        canonical: bool,
        #[clap(long)]
        indent: Option<i32>,
        /// Preferred line width, negative for unlimited.
        #[clap(long, allow_negative_numbers = true)]
        width: Option<i32>,
        #[clap(long)]
        unicode: bool,
    },
}

#[derive(Debug)]
enum Error {
    Yaml(yaml_tree::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl From<yaml_tree::Error> for Error {
    fn from(err: yaml_tree::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Yaml(err) => write!(f, "YAML error: {err}"),
            Error::Json(err) => write!(f, "JSON error: {err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Load {
            mut input,
            mut output,
            pretty,
        } => yaml_to_json(&mut input, &mut output, pretty),
        Command::Dump {
            mut input,
            mut output,
            canonical,
            indent,
            width,
            unicode,
        } => {
            let options = DumpOptions {
                canonical,
                indent,
                width,
                unicode,
            };
            json_to_yaml(&mut input, &mut output, &options).map(|warnings| {
                for warning in warnings {
                    eprintln!("warning: {warning}");
                }
            })
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn yaml_to_json(
    input: &mut dyn std::io::Read,
    output: &mut dyn std::io::Write,
    pretty: bool,
) -> Result<(), Error> {
    let mut reader = std::io::BufReader::new(input);
    let documents = yaml_tree::load_from_reader(&mut reader)?;
    let raw: Vec<RawDocument> = documents.iter().map(RawDocument::from).collect();
    if pretty {
        serde_json::to_writer_pretty(&mut *output, &raw)?;
    } else {
        serde_json::to_writer(&mut *output, &raw)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn json_to_yaml(
    input: &mut dyn std::io::Read,
    output: &mut dyn std::io::Write,
    options: &DumpOptions,
) -> Result<Vec<Warning>, Error> {
    let reader = std::io::BufReader::new(input);
    let raw: Vec<RawDocument> = serde_json::from_reader(reader)?;
    // Nothing is written unless the whole stream converts.
    let Dumped { yaml, warnings } = yaml_tree::dump_raw(raw, options)?;
    output.write_all(yaml.as_bytes())?;
    output.flush()?;
    Ok(warnings)
}
