use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SQUARE_10: &str = r#"{"points": [[0, 0], [10, 0], [10, 10], [0, 10]]}"#;

// Helper function to get the path to the compiled binary, isolated from the
// caller's environment
fn tumvol_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tumvol").expect("Failed to find tumvol binary");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TUMVOL_SLICE_THICKNESS_MM")
        .env_remove("TUMVOL_PIXELS_PER_MM")
        .env_remove("TUMVOL_REJECT_DUPLICATE_FRAMES");
    cmd
}

fn write_frames(dir: &Path, frames: &[u32]) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    for frame in frames {
        fs::write(dir.join(format!("frame_{frame:04}.json")), SQUARE_10)?;
    }
    Ok(())
}

#[test]
fn test_measure_prints_summary() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    tumvol_cmd()
        .arg("measure")
        .arg("--annotations")
        .arg(dir.path())
        .args(["--ratio", "10", "-t", "2"])
        .assert()
        .success()
        .stderr(contains("2.000 mm³"))
        .stderr(contains("Max width"))
        .stderr(contains("1.000 mm"));

    Ok(())
}

#[test]
fn test_measure_json_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    let output = tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--ratio", "10", "-t", "2", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["volume_mm3"], 2.0);
    assert_eq!(json["max_width_mm"], 1.0);
    assert_eq!(json["length_mm"], 2.0);
    Ok(())
}

#[test]
fn test_measure_with_reference_line() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    // 50 px over the default 5 mm reference gives 10 px/mm
    let output = tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--reference-line", "0,0,50,0", "-t", "2", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["volume_mm3"], 2.0);
    Ok(())
}

#[test]
fn test_measure_single_frame_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[3])?;

    tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--ratio", "10", "-t", "1"])
        .assert()
        .failure()
        .stderr(contains("Insufficient data"));

    Ok(())
}

#[test]
fn test_measure_zero_ratio_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--ratio", "0", "-t", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid calibration"));

    Ok(())
}

#[test]
fn test_measure_without_calibration_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["-t", "1"])
        .assert()
        .failure()
        .stderr(contains("provide --ratio"));

    Ok(())
}

#[test]
fn test_measure_requires_slice_thickness() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--ratio", "10"])
        .assert()
        .failure()
        .stderr(contains("--slice-thickness"));

    // The environment variable satisfies the requirement
    let output = tumvol_cmd()
        .env("TUMVOL_SLICE_THICKNESS_MM", "2")
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--ratio", "10", "--json"])
        .output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["volume_mm3"], 2.0);
    Ok(())
}

#[test]
fn test_reference_line_ignores_bad_ratio() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    write_frames(dir.path(), &[0, 1])?;

    // A zero ratio from the environment is unused once a reference line is given
    let output = tumvol_cmd()
        .env("TUMVOL_PIXELS_PER_MM", "0")
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["--reference-line", "0,0,50,0", "-t", "2", "--json"])
        .output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["volume_mm3"], 2.0);
    Ok(())
}

#[test]
fn test_measure_invalid_thickness() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    // Expect failure due to clap parsing/validation
    tumvol_cmd()
        .arg("measure")
        .arg("-a")
        .arg(dir.path())
        .args(["-t", "thick"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));

    Ok(())
}

#[test]
fn test_sample_prints_indices() -> Result<(), Box<dyn Error>> {
    let output = tumvol_cmd()
        .args(["sample", "--start", "0", "--end", "99"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let indices: Vec<u32> = stdout.lines().map(str::parse).collect::<Result<_, _>>()?;
    assert_eq!(indices.len(), 10);
    assert_eq!(indices.first(), Some(&0));
    assert_eq!(indices.last(), Some(&99));
    Ok(())
}

#[test]
fn test_sample_reversed_range_fails() {
    tumvol_cmd()
        .args(["sample", "--start", "10", "--end", "2"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));
}

#[test]
fn test_batch_writes_report_and_reports_failures() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_frames(&input.path().join("good"), &[0, 1])?;
    write_frames(&input.path().join("bad"), &[5])?;

    tumvol_cmd()
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["--ratio", "10", "-t", "2"])
        .assert()
        .failure()
        .stderr(contains("1 of 2 sweeps failed"));

    // The report is written even when a sweep fails
    let reports: Vec<_> = fs::read_dir(output.path())?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("tumour_volume_results_") && name.ends_with(".json"))
        .collect();
    assert_eq!(reports.len(), 1);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join(&reports[0]))?)?;
    assert_eq!(report["rows"][0]["sweep"], "bad");
    assert_eq!(report["rows"][0]["status"], "failed");
    assert_eq!(report["rows"][1]["status"], "ok");
    assert_eq!(report["rows"][1]["measurement"]["volume_mm3"], 2.0);
    assert!(report["rows"][0]["measured_at"].is_string());
    Ok(())
}

#[test]
fn test_batch_all_sweeps_succeed() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_frames(&input.path().join("a"), &[0, 1])?;
    write_frames(&input.path().join("b"), &[0, 2])?;
    fs::write(
        input.path().join("b").join("calibration.json"),
        r#"{"pixel_to_mm_ratio": 5.0}"#,
    )?;

    tumvol_cmd()
        .arg("batch")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["--ratio", "10"])
        .assert()
        .success()
        .stderr(contains("Measured 2 sweeps"));

    Ok(())
}

#[test]
fn test_normalize_closes_and_resamples() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    fs::write(input.path().join("frame_3.json"), SQUARE_10)?;

    tumvol_cmd()
        .arg("normalize")
        .arg("-a")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["--resample", "9"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("frame_00003.json"))?)?;
    let points = written["points"].as_array().unwrap();
    // 9 evenly spaced points around a closed square of perimeter 40
    assert_eq!(points.len(), 9);
    assert_eq!(points[0], serde_json::json!([0.0, 0.0]));
    assert_eq!(points[2], serde_json::json!([10.0, 0.0]));
    assert_eq!(points[8], points[0]);
    Ok(())
}

#[test]
fn test_log_dir_creates_run_log() -> Result<(), Box<dyn Error>> {
    let logs = tempdir()?;

    tumvol_cmd()
        .args(["sample", "--start", "0", "--end", "19"])
        .arg("--log-dir")
        .arg(logs.path())
        .assert()
        .success();

    let log_files: Vec<_> = fs::read_dir(logs.path())?
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("tumvol_run_"))
        .collect();
    assert_eq!(log_files.len(), 1);
    assert!(fs::read_to_string(log_files[0].path())?.contains("Annotate 2 of 20 frames"));
    Ok(())
}
