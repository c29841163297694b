use gbplot::batch::{SourceJob, prepare_batch, read_descriptor, write_layout_tsv};
use gbplot::classifier::colors;
use gbplot::config::Settings;
use gbplot::error::PlotError;
use gbplot::genbank::parse_genbank;
use gbplot::overrides::OverrideTable;
use gbplot::structures::{CoordinateWindow, Span};
use gbplot::window::resolve_window;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

fn record(kind: &str, location: &str) -> String {
    format!("     {kind:<16}{location}\n")
}

fn qualifier(text: &str) -> String {
    format!("{:21}{text}\n", "")
}

/// A small GenBank file: a gene/CDS pair, a tRNA and a spliced mRNA after them.
fn genbank_text() -> String {
    [
        "LOCUS       NC_TEST                 3000 bp    DNA     circular CON 01-JAN-2020\n".to_string(),
        "FEATURES             Location/Qualifiers\n".to_string(),
        record("source", "1..3000"),
        qualifier("/organism=\"Escherichia coli\""),
        qualifier("/strain=\"K-12\""),
        qualifier("/sub_strain=\"MG1655\""),
        record("gene", "100..400"),
        qualifier("/locus_tag=\"L1\""),
        record("CDS", "100..400"),
        qualifier("/locus_tag=\"L1\""),
        qualifier("/product=\"ABC transporter ATP-binding protein\""),
        record("tRNA", "complement(500..580)"),
        qualifier("/locus_tag=\"L2\""),
        qualifier("/product=\"tRNA-Leu\""),
        record("mRNA", "join(1000..1100,1200..1300,"),
        qualifier("1400..1500)"),
        qualifier("/locus_tag=\"L3\""),
        record("CDS", "join(1000..1100,1200..1300,1400..1500)"),
        qualifier("/locus_tag=\"L3\""),
        qualifier("/gene=\"spl\""),
        qualifier("/product=\"DNA gyrase subunit B\""),
        "ORIGIN\n".to_string(),
        "        1 atgcatgcat gcatgcatgc\n".to_string(),
        "//\n".to_string(),
    ]
    .concat()
}

#[test]
fn minimal_two_record_window() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let gbk_path = dir.path().join("test.gbk");
    {
        let mut gbk = File::create(&gbk_path)?;
        write!(gbk, "{}", genbank_text())?;
    }
    let gbk = gbk_path.to_str().unwrap();

    let sequence = parse_genbank(gbk, &OverrideTable::new())?;
    assert_eq!(sequence.len(), 5);
    assert_eq!(
        sequence.organism_name.plain(),
        "Escherichia coli str. K-12 substr. MG1655"
    );

    let kinds = vec!["CDS".to_string(), "tRNA".to_string()];
    let window = resolve_window(&sequence, "L1", "L2", &kinds)?;
    let l1 = &sequence.features[1];
    let l2 = &sequence.features[2];
    assert_eq!(window, CoordinateWindow { start: l1.start, stop: l2.stop });
    assert_eq!(l1.color, colors::GREEN);
    assert_eq!(l2.color, colors::MAGENTA);

    let err = resolve_window(&sequence, "missing", "L2", &kinds).unwrap_err();
    assert!(matches!(
        err,
        PlotError::IdentifierNotFound { ref start, ref stop, .. } if start == "missing" && stop == "L2"
    ));

    Ok(())
}

#[test]
fn batch_with_reverse_source() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let gbk_path = dir.path().join("test.gbk");
    let colors_path = dir.path().join("colors.csv");
    let batch_path = dir.path().join("batch.csv");
    let layout_path = dir.path().join("layout.tsv");

    File::create(&gbk_path)?.write_all(genbank_text().as_bytes())?;
    {
        let mut colors = File::create(&colors_path)?;
        writeln!(colors, "# locus to color")?;
        writeln!(colors, "L3;#0000AA")?;
        writeln!(colors, "L3;#FFFFFF")?;
    }
    let gbk = gbk_path.to_str().unwrap();
    {
        let mut batch = File::create(&batch_path)?;
        writeln!(batch, "{gbk},L1,L2,forward")?;
        writeln!(batch, "{gbk},L1,L3,reverse")?;
    }

    let jobs = read_descriptor(batch_path.to_str().unwrap())?;
    let settings = Settings {
        color_file: Some(colors_path.to_str().unwrap().to_string()),
        ..Settings::default()
    };
    let layout = prepare_batch(&jobs, &settings)?;

    assert_eq!(layout.scale, 1400);
    assert_eq!(layout.sources[0].window, CoordinateWindow { start: 100, stop: 580 });

    let reversed = &layout.sources[1];
    assert_eq!(reversed.window, CoordinateWindow { start: 100, stop: 1500 });
    let spliced = &reversed.sequence.features[4];
    assert_eq!(spliced.color, "#0000AA");
    assert_eq!((spliced.start, spliced.stop), (600, 100));
    assert_eq!(spliced.introns, vec![Span::new(400, 500), Span::new(200, 300)]);

    let plotted = reversed.plotted(&settings.entry_types);
    assert_eq!(plotted.len(), 3);

    write_layout_tsv(&layout, &settings, layout_path.to_str().unwrap())?;
    let written = std::fs::read_to_string(&layout_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "# scale\t1400");
    assert_eq!(lines.len(), 2 + 2 + 3);
    assert!(lines[6].contains("$\\it{spl}$"));
    assert!(lines[6].ends_with("400-500,200-300"));

    Ok(())
}

#[test]
fn missing_source_aborts_batch() {
    let err = SourceJob::new("/no/such/file.gbk", "L1", "L2", "forward").unwrap_err();
    assert!(matches!(err, PlotError::SourceNotFound { .. }));
}
