use crate::error::{PlotError, Result};
use crate::structures::{CoordinateWindow, Feature, FeatureSequence, Span};

/// Window from the start of the first feature named `start_id` to the stop of the
/// first feature named `stop_id`, only looking at features of the given kinds.
///
/// Later features with the same identifier are ignored; a signal peptide sharing
/// the locus tag of its gene must not move the window.
pub fn resolve_window(
    sequence: &FeatureSequence,
    start_id: &str,
    stop_id: &str,
    kinds: &[String],
) -> Result<CoordinateWindow> {
    let accepted = |feature: &&Feature| kinds.iter().any(|k| *k == feature.kind);

    let start = sequence
        .features
        .iter()
        .filter(accepted)
        .find(|f| f.is_named(start_id))
        .map(|f| f.start);
    let stop = sequence
        .features
        .iter()
        .filter(accepted)
        .find(|f| f.is_named(stop_id))
        .map(|f| f.stop);

    match (start, stop) {
        (Some(start), Some(stop)) => Ok(CoordinateWindow { start, stop }),
        _ => Err(PlotError::IdentifierNotFound {
            start: start_id.to_string(),
            stop: stop_id.to_string(),
            path: sequence.path.clone(),
        }),
    }
}

/// Mirrors every coordinate into the window for reverse display.
///
/// Intron bounds are mapped without swapping them. Applying this twice with the
/// same window restores the original coordinates.
pub fn reflect(sequence: &mut FeatureSequence, window: CoordinateWindow) {
    let mirror = |value: i64| window.stop - value + window.start;

    for feature in &mut sequence.features {
        feature.start = mirror(feature.start);
        feature.stop = mirror(feature.stop);
        for intron in &mut feature.introns {
            *intron = Span::new(mirror(intron.end), mirror(intron.begin));
        }
    }
}

/// Features drawn between the start and stop identifiers, in file order.
///
/// Drawing starts at a start match and ends right after the first stop match.
/// An empty `kinds` list accepts every feature.
pub fn select_plotted<'a>(
    sequence: &'a FeatureSequence,
    start_id: &str,
    stop_id: &str,
    kinds: &[String],
) -> Vec<&'a Feature> {
    let accepted = |feature: &Feature| kinds.is_empty() || kinds.iter().any(|k| *k == feature.kind);
    let mut plotted = Vec::new();
    let mut printing = false;

    for feature in &sequence.features {
        if !accepted(feature) {
            continue;
        }
        if feature.is_named(start_id) {
            printing = true;
        }
        if printing {
            plotted.push(feature);
        }
        if feature.is_named(stop_id) {
            break;
        }
    }
    plotted
}
