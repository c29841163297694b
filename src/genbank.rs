//! Line scanner for the FEATURES table of GenBank flat files.
//!
//! Only what is needed for plotting is read: feature kind, location, a handful of
//! qualifiers and the organism name. The table is taken to start at the first
//! `gene` record and ends at `ORIGIN`.

use crate::classifier::classify;
use crate::error::{PlotError, Result};
use crate::location::{resolve, strip_operators};
use crate::organism::DisplayName;
use crate::overrides::OverrideTable;
use crate::structures::{Feature, FeatureSequence};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const QUALIFIER_INDENT: &str = "                     ";
const RECORD_INDENT: &str = "     ";
const TABLE_START: &str = "     gene            ";
const TABLE_END: &str = "ORIGIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Seeking,
    InTable,
    Done,
}

#[derive(Debug)]
enum OpenRecord {
    /// Location text still continues on the following lines.
    Continuing {
        kind: String,
        complement: bool,
        location: String,
    },
    Decoded(Feature),
}

struct FeatureTableScanner<'a> {
    colors: &'a OverrideTable,
    state: ScanState,
    current: Option<OpenRecord>,
    features: Vec<Feature>,
    organism: DisplayName,
}

impl<'a> FeatureTableScanner<'a> {
    fn new(colors: &'a OverrideTable) -> Self {
        Self {
            colors,
            state: ScanState::Seeking,
            current: None,
            features: Vec::new(),
            organism: DisplayName::default(),
        }
    }

    fn feed(&mut self, line: &str) -> Result<()> {
        // The organism may be given before the table opens.
        self.scan_organism(line);

        match self.state {
            ScanState::Done => return Ok(()),
            ScanState::Seeking if line.starts_with(TABLE_START) => self.state = ScanState::InTable,
            ScanState::Seeking => return Ok(()),
            ScanState::InTable => (),
        }

        if line.starts_with(TABLE_END) {
            self.finish_record()?;
            self.state = ScanState::Done;
            return Ok(());
        }

        if is_record_line(line) {
            self.finish_record()?;
            self.current = Some(open_record(line)?);
            return Ok(());
        }

        let trimmed = line.trim();
        if let Some(OpenRecord::Continuing { kind, complement, location }) = &mut self.current {
            if !trimmed.starts_with('/') {
                location.push_str(trimmed);
                return Ok(());
            }
            let decoded = resolve(location, *complement)
                .map_err(|e| PlotError::malformed(location, e))?;
            self.current = Some(OpenRecord::Decoded(Feature::new(kind, decoded)));
        }

        self.apply_qualifier(trimmed)
    }

    fn scan_organism(&mut self, line: &str) {
        let Some(qualifier) = line.strip_prefix(QUALIFIER_INDENT) else {
            return;
        };
        if qualifier.starts_with("/organism=") {
            self.organism = DisplayName::from_organism_line(line);
        } else if qualifier.starts_with("/strain=") {
            self.organism.add_strain(line);
        } else if qualifier.starts_with("/sub_strain=") {
            self.organism.add_sub_strain(line);
        }
    }

    fn apply_qualifier(&mut self, trimmed: &str) -> Result<()> {
        let unquoted = trimmed.replace('"', "");
        let Some((key, value)) = unquoted.split_once('=') else {
            return Ok(());
        };
        if !matches!(
            key,
            "/gene" | "/product" | "/locus_tag" | "/old_locus_tag" | "/protein_id"
        ) {
            return Ok(());
        }

        let Some(OpenRecord::Decoded(feature)) = &mut self.current else {
            return Err(PlotError::malformed(trimmed, "qualifier without an open feature"));
        };
        let value = value.to_string();
        match key {
            "/gene" => feature.gene_name = value,
            "/product" => feature.product = value,
            "/locus_tag" => feature.locus = value,
            "/old_locus_tag" => feature.old_locus = value,
            _ => feature.protein_id = value,
        }
        Ok(())
    }

    /// Colors the open feature and appends it.
    fn finish_record(&mut self) -> Result<()> {
        match self.current.take() {
            None => Ok(()),
            Some(OpenRecord::Decoded(mut feature)) => {
                feature.color = classify(&feature, self.colors);
                self.features.push(feature);
                Ok(())
            }
            Some(OpenRecord::Continuing { location, .. }) => Err(PlotError::malformed(
                &location,
                "feature ended before its location was complete",
            )),
        }
    }

    fn finish(mut self, path: &str) -> Result<FeatureSequence> {
        if self.state != ScanState::Done {
            self.finish_record()?;
        }
        if self.features.is_empty() {
            return Err(PlotError::malformed(path, "no feature with a location was found"));
        }
        Ok(FeatureSequence {
            path: path.to_string(),
            organism_name: self.organism,
            features: self.features,
        })
    }
}

fn is_record_line(line: &str) -> bool {
    line.starts_with(RECORD_INDENT)
        && !line.starts_with(QUALIFIER_INDENT)
        && !line.contains("source")
        && !line.trim().is_empty()
}

fn open_record(line: &str) -> Result<OpenRecord> {
    let mut tokens = line.split_whitespace();
    let kind = tokens.next().unwrap_or_default().to_string();
    let raw_location = tokens.last().unwrap_or(kind.as_str());

    let (location, complement) =
        strip_operators(raw_location).map_err(|e| PlotError::malformed(line, e))?;

    // Multi-part locations without their closing bracket continue on the next lines.
    if line.matches("..").count() <= 1 || line.ends_with(')') {
        let decoded = resolve(&location, complement).map_err(|e| PlotError::malformed(line, e))?;
        Ok(OpenRecord::Decoded(Feature::new(&kind, decoded)))
    } else {
        Ok(OpenRecord::Continuing { kind, complement, location })
    }
}

/// Reads the feature table of a GenBank file, coloring features with the override table.
pub fn parse_genbank(path: &str, colors: &OverrideTable) -> Result<FeatureSequence> {
    if !Path::new(path).is_file() {
        return Err(PlotError::SourceNotFound { path: path.to_string() });
    }
    info!("processing: {path}");
    let reader = BufReader::new(File::open(path)?);
    scan_features(reader, path, colors)
}

pub fn scan_features(
    reader: impl BufRead,
    path: &str,
    colors: &OverrideTable,
) -> Result<FeatureSequence> {
    let mut scanner = FeatureTableScanner::new(colors);
    for line in reader.lines() {
        let line = line?;
        scanner.feed(line.trim_end_matches('\r'))?;
    }
    let sequence = scanner.finish(path)?;
    debug!(
        "{path}: {} features, organism [{}]",
        sequence.len(),
        sequence.organism_name
    );
    Ok(sequence)
}
