use crate::classifier::LabelStyle;
use crate::error::Result;
use crate::overrides::OverrideTable;

pub fn default_entry_types() -> Vec<String> {
    // Genes are left out since they would be drawn on top of their CDS.
    ["CDS", "rRNA", "tRNA"].iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Feature kinds used for windows and drawing.
    pub entry_types: Vec<String>,
    pub label_style: LabelStyle,
    /// Width of the plot in bp; 0 means the longest window of the batch.
    pub scale: i64,
    pub color_file: Option<String>,
    pub name_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_types: default_entry_types(),
            label_style: LabelStyle::GeneName,
            scale: 0,
            color_file: None,
            name_file: None,
        }
    }
}

impl Settings {
    pub fn load_colors(&self) -> Result<OverrideTable> {
        load_table(self.color_file.as_deref())
    }

    pub fn load_names(&self) -> Result<OverrideTable> {
        load_table(self.name_file.as_deref())
    }
}

fn load_table(path: Option<&str>) -> Result<OverrideTable> {
    match path {
        Some(path) => OverrideTable::from_file(path),
        None => Ok(OverrideTable::new()),
    }
}
