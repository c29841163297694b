use std::fmt;
use std::str::FromStr;

use crate::organism::emphasize;
use crate::overrides::OverrideTable;
use crate::structures::Feature;

pub mod colors {
    pub const MAGENTA: &str = "#FF00FF";
    pub const RED: &str = "red";
    pub const MAROON: &str = "#800000";
    pub const GREEN: &str = "#008000";
    pub const BLUE: &str = "blue";
    pub const LIME: &str = "#00FF00";
    pub const GREY: &str = "grey";
}

/// Keyword groups checked against the lower-cased product, in order.
const PRODUCT_COLORS: [(&[&str], &str); 5] = [
    (&["transpos", "phage", "integras"], colors::RED),
    (&["flagel"], colors::MAROON),
    (&["transport", "abc ", "pts ", "mfs", "membrane"], colors::GREEN),
    (&["ase "], colors::BLUE),
    (&["ribosom"], colors::LIME),
];

/// Color for a finished feature. Values from the override table are not validated.
pub fn classify(feature: &Feature, overrides: &OverrideTable) -> String {
    if let Some(color) = overrides.first_hit(feature.identifiers()) {
        return color.to_string();
    }
    if feature.kind == "tRNA" || feature.kind == "rRNA" {
        return colors::MAGENTA.to_string();
    }

    let product = feature.product.to_lowercase();
    PRODUCT_COLORS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| product.contains(k)))
        .map_or(colors::GREY, |(_, color)| *color)
        .to_string()
}

/// What to print next to each feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    GeneName,
    Locus,
    Product,
    LocusProduct,
    LocusGeneName,
    GeneNameProduct,
}

impl LabelStyle {
    pub const NAMES: [&'static str; 6] = [
        "gene_name",
        "locus",
        "product",
        "locus+product",
        "locus+gene_name",
        "gene_name+product",
    ];
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene_name" => Ok(LabelStyle::GeneName),
            "locus" => Ok(LabelStyle::Locus),
            "product" => Ok(LabelStyle::Product),
            "locus+product" => Ok(LabelStyle::LocusProduct),
            "locus+gene_name" => Ok(LabelStyle::LocusGeneName),
            "gene_name+product" => Ok(LabelStyle::GeneNameProduct),
            other => Err(format!("Invalid label style [{other}]")),
        }
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelStyle::GeneName => "gene_name",
            LabelStyle::Locus => "locus",
            LabelStyle::Product => "product",
            LabelStyle::LocusProduct => "locus+product",
            LabelStyle::LocusGeneName => "locus+gene_name",
            LabelStyle::GeneNameProduct => "gene_name+product",
        };
        write!(f, "{name}")
    }
}

/// Label text for a feature. Gene names are emphasized; the label table wins over the style.
pub fn label(feature: &Feature, style: LabelStyle, names: &OverrideTable) -> String {
    if let Some(name) = names.first_hit(feature.identifiers()) {
        return name.to_string();
    }

    let gene = &feature.gene_name;
    match style {
        LabelStyle::GeneName if !gene.is_empty() => emphasize(gene),
        LabelStyle::Locus if !feature.locus.is_empty() => feature.locus.clone(),
        LabelStyle::Product if !feature.product.is_empty() => feature.product.clone(),
        // Composite styles only need their gene name; the locus may be empty.
        LabelStyle::LocusGeneName if !gene.is_empty() => {
            format!("{} {}", feature.locus, emphasize(gene))
        }
        LabelStyle::GeneNameProduct if !gene.is_empty() => {
            format!("{} {}", emphasize(gene), feature.product)
        }
        LabelStyle::LocusProduct if !feature.locus.is_empty() || !feature.product.is_empty() => {
            format!("{} {}", feature.locus, feature.product)
        }
        _ => feature.locus.clone(),
    }
}
