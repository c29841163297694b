use crate::classifier::label;
use crate::config::Settings;
use crate::error::{PlotError, Result};
use crate::genbank::parse_genbank;
use crate::overrides::{OverrideTable, detect_separator, table_lines};
use crate::structures::{CoordinateWindow, Feature, FeatureSequence, Orientation};
use crate::window::{reflect, resolve_window, select_plotted};
use log::info;
use std::fs::File;
use std::io::Write;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

/// One GenBank file and the genes bounding the region to plot.
#[derive(Debug, Clone)]
pub struct SourceJob {
    pub path: String,
    pub start_id: String,
    pub stop_id: String,
    pub orientation: Orientation,
}

impl SourceJob {
    pub fn new(path: &str, start_id: &str, stop_id: &str, orientation: &str) -> Result<Self> {
        if !Path::new(path).is_file() {
            return Err(PlotError::SourceNotFound { path: path.to_string() });
        }
        Ok(Self {
            path: path.to_string(),
            start_id: start_id.to_string(),
            stop_id: stop_id.to_string(),
            orientation: Orientation::from_token(orientation),
        })
    }
}

/// Reads a batch file with `path, start, stop, forward|reverse` per line.
pub fn read_descriptor(path: &str) -> Result<Vec<SourceJob>> {
    let reader = BufReader::new(File::open(path)?);
    read_descriptor_from(reader, path)
}

pub fn read_descriptor_from(reader: impl BufRead, path: &str) -> Result<Vec<SourceJob>> {
    let mut jobs = Vec::new();
    for line in table_lines(reader) {
        let line = line?;
        let fields: Vec<&str> = match detect_separator(&line) {
            Some(separator) => line.split(separator).map(str::trim).collect(),
            None => vec![line.as_str()],
        };
        if fields.len() != 4 {
            return Err(PlotError::DescriptorFieldCountMismatch {
                line: line.clone(),
                path: path.to_string(),
                found: fields.len(),
            });
        }
        jobs.push(SourceJob::new(fields[0], fields[1], fields[2], fields[3])?);
    }
    Ok(jobs)
}

/// A parsed source with its window, already mirrored when drawn in reverse.
#[derive(Debug, Clone)]
pub struct PreparedSource {
    pub job: SourceJob,
    pub sequence: FeatureSequence,
    pub window: CoordinateWindow,
}

impl PreparedSource {
    pub fn plotted(&self, kinds: &[String]) -> Vec<&Feature> {
        select_plotted(&self.sequence, &self.job.start_id, &self.job.stop_id, kinds)
    }
}

#[derive(Debug, Clone)]
pub struct BatchLayout {
    /// Width in bp shared by all sources.
    pub scale: i64,
    pub sources: Vec<PreparedSource>,
    pub labels: OverrideTable,
}

/// Parses every source, resolves its window and works out the common scale.
///
/// Any error aborts the whole batch. Each file is parsed once and the result is
/// reused for the layout.
pub fn prepare_batch(jobs: &[SourceJob], settings: &Settings) -> Result<BatchLayout> {
    if let Some(missing) = jobs.iter().find(|job| !Path::new(&job.path).is_file()) {
        return Err(PlotError::SourceNotFound { path: missing.path.clone() });
    }

    let colors = settings.load_colors()?;
    let labels = settings.load_names()?;

    let mut sources = Vec::with_capacity(jobs.len());
    for job in jobs {
        let sequence = parse_genbank(&job.path, &colors)?;
        let window = resolve_window(&sequence, &job.start_id, &job.stop_id, &settings.entry_types)?;
        sources.push(PreparedSource { job: job.clone(), sequence, window });
    }

    let scale = if settings.scale > 0 {
        settings.scale
    } else {
        sources.iter().map(|s| s.window.span()).fold(0, i64::max)
    };
    info!("longest stretch of DNA is: {scale}");

    for source in &mut sources {
        if source.job.orientation == Orientation::Reverse {
            reflect(&mut source.sequence, source.window);
        }
    }

    Ok(BatchLayout { scale, sources, labels })
}

/// Writes the features to draw, one line per feature, for an external renderer.
pub fn write_layout_tsv(layout: &BatchLayout, settings: &Settings, out_path: &str) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(out_path)?);
    writeln!(writer, "# scale\t{}", layout.scale)?;
    writeln!(
        writer,
        "source\torganism\torientation\tkind\tstart\tstop\tstrand\tcolor\tlabel\tintrons"
    )?;

    for source in &layout.sources {
        let organism = source.sequence.organism_name.to_mathtext();
        for feature in source.plotted(&settings.entry_types) {
            let introns: Vec<String> = feature
                .drawable_introns()
                .map(|i| format!("{}-{}", i.begin, i.end))
                .collect();
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                source.job.path,
                organism,
                source.job.orientation,
                feature.kind,
                feature.start,
                feature.stop,
                feature.strand_symbol(),
                feature.color,
                label(feature, settings.label_style, &layout.labels),
                introns.join(",")
            )?;
        }
    }

    Ok(())
}
