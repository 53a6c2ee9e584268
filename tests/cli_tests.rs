use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const INPUT: &str = "\
Student ID,Full Name,Gender,Gmail,Program,Year Level,University
1,Ana Cruz,Female,ana@x.com,BSCS,3,ABC U
2,Ben Reyes,Male,ben@x.com,BSIT,1,ABC U
";

fn roster_etl(dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_roster-etl"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn test_no_arguments_converts_with_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("students_data_2.0.csv"), INPUT)?;

    let output = roster_etl(dir.path(), &[])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, "students.json created successfully!\n");
    assert!(dir.path().join("students.json").exists());
    Ok(())
}

#[test]
fn test_missing_input_exits_nonzero_and_names_stage() -> Result<()> {
    let dir = TempDir::new()?;

    let output = roster_etl(dir.path(), &[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("load stage failed"));
    assert!(!dir.path().join("students.json").exists());
    Ok(())
}

#[test]
fn test_config_file_paths() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("export.tsv"), INPUT.replace(',', "\t"))?;
    std::fs::write(
        dir.path().join("roster.toml"),
        "[input]\npath = \"export.tsv\"\ndelimiter = \"\\t\"\n\n[output]\npath = \"roster.json\"\n",
    )?;

    let output = roster_etl(dir.path(), &["--config", "roster.toml"])?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "roster.json created successfully!\n");
    let roster: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("roster.json"))?)?;
    assert_eq!(roster.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_roster_commands() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("students_data_2.0.csv"), INPUT)?;
    assert!(roster_etl(dir.path(), &[])?.status.success());

    let added = roster_etl(
        dir.path(),
        &[
            "add",
            "--student-id",
            "3",
            "--name",
            "Cara Lim",
            "--gender",
            "female",
            "--email",
            "cara@gmail.com",
            "--course",
            "BSN",
        ],
    )?;
    assert!(added.status.success());

    let listed = roster_etl(dir.path(), &["list", "--gender", "Female"])?;
    let table = String::from_utf8(listed.stdout)?;
    assert!(table.contains("Ana Cruz"));
    assert!(table.contains("Cara Lim"));
    assert!(!table.contains("Ben Reyes"));

    assert!(roster_etl(dir.path(), &["remove", "2"])?.status.success());
    let missing = roster_etl(dir.path(), &["remove", "2"])?;
    assert_eq!(missing.status.code(), Some(1));

    let invalid = roster_etl(
        dir.path(),
        &[
            "add",
            "--student-id",
            "4",
            "--name",
            "D4n",
            "--gender",
            "male",
            "--email",
            "dan@gmail.com",
        ],
    )?;
    assert_eq!(invalid.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_remove_without_roster_points_at_conversion() -> Result<()> {
    let dir = TempDir::new()?;

    let output = roster_etl(dir.path(), &["remove", "7"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("roster stage failed: Roster file not found: students.json"));
    assert!(stderr.contains("Run the conversion first"));
    assert!(!stderr.contains("--input"));
    Ok(())
}
