use std::fmt;

use log::warn;

use crate::classifier::colors;
use crate::location::Location;
use crate::organism::DisplayName;

/// How a source should be laid out.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// Anything other than `reverse` is drawn forward.
    pub fn from_token(token: &str) -> Orientation {
        match token {
            "reverse" => Orientation::Reverse,
            "forward" => Orientation::Forward,
            other => {
                warn!("Unknown orientation [{other}], using forward");
                Orientation::Forward
            }
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "forward"),
            Orientation::Reverse => write!(f, "reverse"),
        }
    }
}

/// A `(begin, end)` pair of an exon or intron.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Span {
    pub begin: i64,
    pub end: i64,
}

impl Span {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> i64 {
        self.end - self.begin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub kind: String,
    pub start: i64,
    pub stop: i64,
    pub complement: bool,
    pub exons: Vec<Span>,
    pub introns: Vec<Span>,
    pub product: String,
    pub gene_name: String,
    pub locus: String,
    pub old_locus: String,
    pub protein_id: String,
    pub color: String,
}

impl Feature {
    pub fn new(kind: &str, location: Location) -> Self {
        Self {
            kind: kind.to_string(),
            start: location.start,
            stop: location.stop,
            complement: location.complement,
            exons: location.exons,
            introns: location.introns,
            product: String::new(),
            gene_name: String::new(),
            locus: String::new(),
            old_locus: String::new(),
            protein_id: String::new(),
            color: colors::GREY.to_string(),
        }
    }

    /// Identifier fields in lookup priority. Empty fields are skipped.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        [
            self.locus.as_str(),
            self.old_locus.as_str(),
            self.protein_id.as_str(),
            self.gene_name.as_str(),
            self.product.as_str(),
        ]
        .into_iter()
        .filter(|id| !id.is_empty())
    }

    pub fn is_named(&self, identifier: &str) -> bool {
        self.identifiers().any(|id| id == identifier)
    }

    /// Introns that still have a positive length, e.g. after reflection.
    pub fn drawable_introns(&self) -> impl Iterator<Item = &Span> {
        self.introns.iter().filter(|intron| intron.len() > 0)
    }

    pub fn strand_symbol(&self) -> &'static str {
        if self.complement { "-" } else { "+" }
    }
}

/// All features of one source in file order.
#[derive(Debug, Clone)]
pub struct FeatureSequence {
    pub path: String,
    pub organism_name: DisplayName,
    pub features: Vec<Feature>,
}

impl FeatureSequence {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CoordinateWindow {
    pub start: i64,
    pub stop: i64,
}

impl CoordinateWindow {
    pub fn span(&self) -> i64 {
        self.stop - self.start
    }
}
