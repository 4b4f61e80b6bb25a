use std::fs;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use pepscan::{run, PepscanError, ScanConfig, ScanOutcome};

const PROTEOME: &str = "\
>sp|P11111|KIN1_HUMAN Serine kinase OS=Homo sapiens OX=9606
MSRILDTAGQEEYSAMRD
>sp|P22222|KIN2_HUMAN Second kinase OS=Homo sapiens OX=9606
ILDTAGKEEY
>sp|P33333|KIN3_HUMAN Third kinase OS=Homo sapiens OX=9606
MKVLDSAGKEEFRRILDTAGKDEYPP
>sp|P44444|FRAG_HUMAN Fragment OS=Homo sapiens OX=9606
ILDTA
";

#[test]
fn e2e_scan_writes_report_in_proteome_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proteome.fasta");
    fs::write(&input, PROTEOME).unwrap();
    let output = dir.path().join("hits.tsv");

    let config = ScanConfig::new("ILDTAGKEEY", &input)
        .with_max_mismatches(3)
        .with_output(&output);
    let summary = run(&config).unwrap();

    assert_eq!(summary.outcome, ScanOutcome::Saved { path: output.clone(), matches: 3 });
    assert_eq!(summary.stats.proteins, 4);
    assert_eq!(summary.message(), format!("Saved 3 matches to {}", output.display()));

    let content = fs::read_to_string(&output).unwrap();
    let rows: Vec<Vec<&str>> = content.lines().skip(1).map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0][1], "sp|P11111|KIN1_HUMAN");
    assert_eq!(rows[0][3..], ["4", "13", "ILDTAGQEEY", "1", "Q10K"]);

    assert_eq!(rows[1][1], "sp|P33333|KIN3_HUMAN");
    assert_eq!(rows[1][3..], ["3", "12", "VLDSAGKEEF", "3", "V3I; S6T; F12Y"]);

    assert_eq!(rows[2][1], "sp|P33333|KIN3_HUMAN");
    assert_eq!(rows[2][3..], ["15", "24", "ILDTAGKDEY", "1", "D22E"]);
}

#[test]
fn e2e_scan_without_matches_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proteome.fasta");
    fs::write(&input, PROTEOME).unwrap();
    let output = dir.path().join("hits.tsv");

    let config = ScanConfig::new("WWWWWWWWWW", &input).with_output(&output);
    let summary = run(&config).unwrap();

    assert_eq!(summary.outcome, ScanOutcome::NoMatches);
    assert_eq!(summary.message(), "No matches found.");
    assert!(!output.exists());
}

#[test]
fn e2e_scan_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proteome.fasta");
    fs::write(&input, PROTEOME).unwrap();

    let mut reports = Vec::new();
    for name in ["first.csv", "second.csv"] {
        let output = dir.path().join(name);
        let config = ScanConfig::new("ILDTAGKEEY", &input).with_output(&output);
        run(&config).unwrap();
        reports.push(fs::read(&output).unwrap());
    }
    assert_eq!(reports[0], reports[1]);
}

#[test]
fn e2e_scan_gzip_in_gzip_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proteome.fasta.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::default());
    encoder.write_all(PROTEOME.as_bytes()).unwrap();
    encoder.finish().unwrap();
    let output = dir.path().join("hits.tsv.gz");

    let config = ScanConfig::new("ILDTAGKEEY", &input)
        .with_max_mismatches(1)
        .with_output(&output);
    let summary = run(&config).unwrap();
    assert_eq!(summary.outcome, ScanOutcome::Saved { path: output.clone(), matches: 2 });

    let mut content = String::new();
    GzDecoder::new(fs::File::open(&output).unwrap())
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("Q10K"));
    assert!(content.contains("D22E"));
}

#[test]
fn e2e_scan_malformed_proteome_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.fasta");
    fs::write(&input, "this is not fasta\n").unwrap();
    let output = dir.path().join("hits.tsv");

    let config = ScanConfig::new("ILDTAGKEEY", &input).with_output(&output);
    let err = run(&config).unwrap_err();
    assert!(matches!(err, PepscanError::Proteome { .. }));
    assert!(!output.exists());
}

#[test]
fn e2e_scan_failing_after_a_match_leaves_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("truncated.fasta");
    fs::write(&input, ">P1 ok\nAAAAB\n>\nAAAB\n").unwrap();

    for name in ["hits.tsv", "hits.tsv.gz"] {
        let output = dir.path().join(name);
        let config = ScanConfig::new("AAAA", &input)
            .with_max_mismatches(1)
            .with_output(&output);

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PepscanError::Proteome { record: 2, .. }));
        assert!(!output.exists());
    }
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(leftovers, vec![input]);
}

#[test]
fn e2e_scan_rejects_bad_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("proteome.fasta");
    fs::write(&input, PROTEOME).unwrap();

    let empty = ScanConfig::new("", &input);
    assert!(run(&empty).unwrap_err().to_string().contains("peptide"));

    let xlsx = ScanConfig::new("ILDTAGKEEY", &input).with_output(dir.path().join("out.xlsx"));
    assert!(run(&xlsx).unwrap_err().to_string().contains("out.xlsx"));
}
