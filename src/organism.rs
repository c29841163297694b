use std::fmt;

/// Words never set in italics.
const NOT_EMPHASIZED: [&str; 2] = ["sp.", "subsp."];

/// Words starting the strain part of a name; they and everything after them stay upright.
const STRAIN_MARKERS: [&str; 3] = ["DSM", "ATCC", "str."];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameWord {
    pub text: String,
    pub emphasized: bool,
}

/// Organism name for display, with the words that should be set in italics marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayName {
    pub words: Vec<NameWord>,
}

impl DisplayName {
    /// Builds the name from an `/organism="..."` qualifier line.
    pub fn from_organism_line(line: &str) -> Self {
        let mut words = Vec::new();
        let mut in_strain = false;

        for word in qualifier_value(line).split_whitespace() {
            if STRAIN_MARKERS.contains(&word) {
                in_strain = true;
            }
            // Digits or all capitals mean a strain identifier rather than a taxon.
            let upright = in_strain
                || NOT_EMPHASIZED.contains(&word)
                || word.chars().any(|c| c.is_ascii_digit())
                || !word.chars().any(char::is_lowercase);
            words.push(NameWord { text: word.to_string(), emphasized: !upright });
        }

        Self { words }
    }

    /// Appends ` str. <value>` from a `/strain=` line.
    pub fn add_strain(&mut self, line: &str) {
        self.append_upright("str.", qualifier_value(line));
    }

    /// Appends ` substr. <value>` from a `/sub_strain=` line.
    pub fn add_sub_strain(&mut self, line: &str) {
        self.append_upright("substr.", qualifier_value(line));
    }

    fn append_upright(&mut self, prefix: &str, value: &str) {
        if self.plain().contains(value) {
            return;
        }
        for text in std::iter::once(prefix).chain(value.split_whitespace()) {
            self.words.push(NameWord { text: text.to_string(), emphasized: false });
        }
    }

    pub fn plain(&self) -> String {
        self.render(|word| word.text.clone())
    }

    /// Name with italic words in mathtext markup, e.g. `$\it{Escherichia}$ $\it{coli}$ K-12`.
    pub fn to_mathtext(&self) -> String {
        self.render(|word| {
            if word.emphasized {
                emphasize(&word.text)
            } else {
                word.text.clone()
            }
        })
    }

    fn render(&self, word_text: impl Fn(&NameWord) -> String) -> String {
        self.words.iter().map(word_text).collect::<Vec<_>>().join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

pub fn emphasize(text: &str) -> String {
    format!("$\\it{{{text}}}$")
}

/// Value of a `/key=value` qualifier line without the surrounding quotes.
pub(crate) fn qualifier_value(line: &str) -> &str {
    line.trim()
        .split_once('=')
        .map(|(_, value)| value.trim_matches('"'))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDENT: &str = "                     ";

    fn emphasized(name: &DisplayName) -> Vec<&str> {
        name.words
            .iter()
            .filter(|w| w.emphasized)
            .map(|w| w.text.as_str())
            .collect()
    }

    #[test]
    fn test_species_is_emphasized() {
        let name = DisplayName::from_organism_line(&format!("{INDENT}/organism=\"Escherichia coli\""));
        assert_eq!(name.plain(), "Escherichia coli");
        assert_eq!(emphasized(&name), vec!["Escherichia", "coli"]);
        assert_eq!(name.to_mathtext(), "$\\it{Escherichia}$ $\\it{coli}$");
    }

    #[test]
    fn test_strain_words_stay_upright() {
        let name = DisplayName::from_organism_line(
            "/organism=\"Clostridioides difficile str. Lumc 630 ab\"",
        );
        assert_eq!(emphasized(&name), vec!["Clostridioides", "difficile"]);

        let name = DisplayName::from_organism_line("/organism=\"Bacillus sp. KR2 subsp. alpha\"");
        assert_eq!(emphasized(&name), vec!["Bacillus", "alpha"]);

        let name = DisplayName::from_organism_line("/organism=\"Thermus aquaticus DSM strainx\"");
        assert_eq!(emphasized(&name), vec!["Thermus", "aquaticus"]);
    }

    #[test]
    fn test_strain_append_is_idempotent() {
        let mut name = DisplayName::from_organism_line("/organism=\"Escherichia coli\"");
        name.add_strain(&format!("{INDENT}/strain=\"K-12\""));
        name.add_strain(&format!("{INDENT}/strain=\"K-12\""));
        assert_eq!(name.plain(), "Escherichia coli str. K-12");

        name.add_sub_strain(&format!("{INDENT}/sub_strain=\"MG1655\""));
        name.add_sub_strain(&format!("{INDENT}/sub_strain=\"MG1655\""));
        assert_eq!(name.plain(), "Escherichia coli str. K-12 substr. MG1655");
        assert_eq!(emphasized(&name), vec!["Escherichia", "coli"]);
    }

    #[test]
    fn test_strain_already_in_name() {
        let mut name = DisplayName::from_organism_line("/organism=\"Escherichia coli K-12\"");
        name.add_strain("/strain=\"K-12\"");
        assert_eq!(name.plain(), "Escherichia coli K-12");
    }
}
