use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};
use env_logger::Env;
use gbplot::batch::{SourceJob, prepare_batch, read_descriptor, write_layout_tsv};
use gbplot::classifier::LabelStyle;
use gbplot::config::{Settings, default_entry_types};
use log::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn command() -> Command {
    Command::new("gbplot")
        .version(VERSION)
        .about("Extract the genes between two loci of GenBank files and lay them out for plotting.")
        .arg(
            Arg::new("input")
                .long("input")
                .num_args(4)
                .value_names(["GENBANK_FILE", "START_GENE", "STOP_GENE", "ORIENTATION"])
                .action(ArgAction::Append)
                .help("GenBank file, start and stop gene, and forward or reverse. Can be given multiple times"),
        )
        .arg(
            Arg::new("input_file")
                .long("input-file")
                .value_name("BATCH_FILE")
                .help("csv file with GenBank file, start gene, stop gene and forward/reverse per line"),
        )
        .group(
            ArgGroup::new("sources")
                .args(["input", "input_file"])
                .required(true),
        )
        .arg(
            Arg::new("entry_type")
                .long("entry-type")
                .num_args(1..)
                .value_name("KIND")
                .help("Feature kinds to draw (default: CDS rRNA tRNA)"),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .value_parser(LabelStyle::NAMES)
                .default_value("gene_name")
                .help("What to print as label; gene names are emphasized"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .value_parser(value_parser!(i64))
                .default_value("0")
                .help("Width of the plot in bp; 0 uses the longest region of all inputs"),
        )
        .arg(
            Arg::new("color_file")
                .long("color-file")
                .value_name("COLOR_CSV")
                .help("csv with locus, gene or product to color; comma, semicolon or tab separated"),
        )
        .arg(
            Arg::new("name_file")
                .long("name-file")
                .value_name("NAME_CSV")
                .help("csv with locus, gene or product to label; comma, semicolon or tab separated"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("LAYOUT_TSV")
                .help("Output TSV with the features to draw (default: <input>.<start>_<stop>.tsv)"),
        )
        .arg_required_else_help(true)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = command().get_matches();
    info!("version: {VERSION}");

    let label_style = matches
        .get_one::<String>("label")
        .map(|s| s.parse::<LabelStyle>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(LabelStyle::GeneName);

    let settings = Settings {
        entry_types: matches
            .get_many::<String>("entry_type")
            .map(|kinds| kinds.cloned().collect())
            .unwrap_or_else(default_entry_types),
        label_style,
        scale: matches.get_one::<i64>("scale").copied().unwrap_or(0),
        color_file: matches.get_one::<String>("color_file").cloned(),
        name_file: matches.get_one::<String>("name_file").cloned(),
    };

    let jobs = if let Some(occurrences) = matches.get_occurrences::<String>("input") {
        let mut jobs = Vec::new();
        for values in occurrences {
            let values: Vec<&String> = values.collect();
            jobs.push(SourceJob::new(values[0], values[1], values[2], values[3])?);
        }
        jobs
    } else {
        let batch_file = matches
            .get_one::<String>("input_file")
            .context("either --input or --input-file is required")?;
        read_descriptor(batch_file).with_context(|| format!("reading {batch_file}"))?
    };
    let first = jobs.first().context("no input given")?;

    let output = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| format!("{}.{}_{}.tsv", first.path, first.start_id, first.stop_id));

    let layout = prepare_batch(&jobs, &settings)?;
    write_layout_tsv(&layout, &settings, &output)?;
    info!("{output} written successfully");

    Ok(())
}
