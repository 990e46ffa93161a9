use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use text_reports::app::{run_converter, RunStatus};
use text_reports::diagnostics::Diagnostics;
use text_reports::pipeline::convert_numbers;
use text_reports::report::{FileSink, InMemorySink};

fn write(dir: &std::path::Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Everything but the elapsed-time line.
fn stable_part(report: &str) -> String {
    report
        .lines()
        .filter(|line| !line.starts_with("Elapsed Time:"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_mixed_file_report() -> Result<()> {
    let dir = tempdir()?;
    let input = write(dir.path(), "numbers.txt", "10\n-3\nabc\n255\n")?;
    let sink = InMemorySink::new();

    let status = run_converter(&[input.clone()], &sink);
    assert_eq!(status, RunStatus::Completed);

    let report = sink.get("ConvertionResults.txt").expect("report written");
    let rows: Vec<&str> = report
        .lines()
        .filter(|l| l.starts_with("1 ") || l.starts_with("2 "))
        .collect();
    assert_eq!(
        rows,
        vec![
            format!("{:<5} {:<15} {:<30} {:<15}", 1, 10, "1010", "A"),
            format!("{:<5} {:<15} {:<30} {:<15}", 2, 255, "11111111", "FF"),
        ]
    );
    assert!(report.contains(&format!("Results for file: {}\n", input.display())));
    assert!(report.contains(&format!("Invalid Data Count in {}: 2\n", input.display())));
    assert!(report.contains("Total Invalid Data Count: 2\n"));
    Ok(())
}

#[test]
fn test_forty_digit_value_is_converted() -> Result<()> {
    let dir = tempdir()?;
    let wide = format!("1{}", "0".repeat(39));
    let input = write(dir.path(), "wide.txt", &format!("{wide}\n"))?;
    let sink = InMemorySink::new();

    let status = run_converter(&[input], &sink);
    assert_eq!(status, RunStatus::Completed);

    let report = sink.get("ConvertionResults.txt").expect("report written");
    let row = report
        .lines()
        .find(|l| l.starts_with("1 "))
        .expect("one converted row");
    let fields: Vec<&str> = row.split_whitespace().collect();
    assert_eq!(fields[1], wide);
    assert_eq!(fields[2].len(), 130);
    assert_eq!(fields[3], "2F050FE938943ACC45F65568000000000");
    assert!(report.contains("Total Invalid Data Count: 0\n"));
    Ok(())
}

#[test]
fn test_sections_follow_argument_order() -> Result<()> {
    let dir = tempdir()?;
    let first = write(dir.path(), "b.txt", "1\n")?;
    let second = write(dir.path(), "a.txt", "2\n")?;
    let sink = InMemorySink::new();

    run_converter(&[first.clone(), second.clone()], &sink);

    let report = sink.get("ConvertionResults.txt").expect("report written");
    let first_at = report.find(&first.display().to_string()).unwrap();
    let second_at = report.find(&second.display().to_string()).unwrap();
    assert!(first_at < second_at);
    // item numbers restart per file
    assert_eq!(report.lines().filter(|l| l.starts_with("1 ")).count(), 2);
    Ok(())
}

#[test]
fn test_total_counts_files_without_valid_rows() -> Result<()> {
    let dir = tempdir()?;
    let good = write(dir.path(), "good.txt", "7\nx\n")?;
    let bad = write(dir.path(), "bad.txt", "nope\n-1\n")?;
    let mut diagnostics = Diagnostics::new();

    let run = convert_numbers(&[good, bad.clone()], &mut diagnostics)?;
    let report = run.render().text;

    assert_eq!(run.total_invalid(), 3);
    assert_eq!(diagnostics.len(), 3);
    assert!(!report.contains(&format!("Results for file: {}", bad.display())));
    assert!(report.contains("Total Invalid Data Count: 3\n"));
    Ok(())
}

#[test]
fn test_missing_file_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let present = write(dir.path(), "present.txt", "1\n2\n")?;
    let missing = dir.path().join("missing.txt");
    let sink = FileSink::new(dir.path());

    let status = run_converter(&[present, missing], &sink);

    assert_eq!(status, RunStatus::Failed);
    assert!(!sink.path_for("ConvertionResults.txt").exists());
    Ok(())
}

#[test]
fn test_missing_first_file_stops_before_later_files() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.txt");
    let later = write(dir.path(), "later.txt", "oops\n")?;
    let mut diagnostics = Diagnostics::new();

    assert!(convert_numbers(&[missing, later], &mut diagnostics).is_err());
    // the later file was never read, so its bad line was never reported
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.messages()[0].starts_with("Error: File '"));
    Ok(())
}

#[test]
fn test_file_sink_matches_rendered_report_and_is_repeatable() -> Result<()> {
    let dir = tempdir()?;
    let input = write(dir.path(), "n.txt", "0\n16\n1024\n")?;
    let sink = FileSink::new(dir.path());

    run_converter(&[input.clone()], &sink);
    let first = fs::read_to_string(sink.path_for("ConvertionResults.txt"))?;
    run_converter(&[input], &sink);
    let second = fs::read_to_string(sink.path_for("ConvertionResults.txt"))?;

    assert!(first.ends_with(" seconds\n"));
    assert_eq!(stable_part(&first), stable_part(&second));
    assert!(first.contains(&format!("{:<5} {:<15} {:<30} {:<15}", 1, 0, "0", "0")));
    Ok(())
}
