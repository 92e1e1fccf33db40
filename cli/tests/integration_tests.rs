use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const FSTAB: &str = "\
# /etc/fstab
/dev/mapper/rhel-root /                       xfs     defaults        0 0
/dev/sdb1 /hdfs/data1 xfs rw,relatime,seclabel,attr2,inode64,noquota 0 0
nfs.example.com:/share     /srv/cases  nfs     ro,nfsvers=3,rsize=32768     0
";

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mounttab"))
}

fn write_fstab(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("fstab");
    fs::write(&path, content).expect("failed to write fstab");
    path
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("failed to run mounttab")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fstab(&dir, FSTAB);

    let output = run(&["parse", "--input", path.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success(), "parse should succeed");

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["fs_spec"], "/dev/mapper/rhel-root");
    assert_eq!(rows[1]["fs_mntops"]["relatime"], true);
    assert_eq!(rows[1]["fs_mntops"]["ro"], false);
    assert_eq!(rows[2]["fs_mntops"]["nfsvers"], "3");
    assert_eq!(rows[2]["fs_passno"], 0);
}

#[test]
fn parse_reads_stdin_when_no_input() {
    let mut child = bin()
        .args(["parse", "--format", "table"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn mounttab");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(FSTAB.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("fs_spec"));
    assert!(lines[3].starts_with("nfs.example.com:/share"));
}

#[test]
fn parse_reports_malformed_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fstab(&dir, "/dev/a / xfs defaults x 0\n");

    let output = run(&["parse", "--input", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "{stderr}");
    assert!(stderr.contains("fs_freq"), "{stderr}");
}

#[test]
fn parse_with_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("layout.yml");
    fs::write(
        &config,
        "header: 'NAME    SIZE'\nsplit_mode: positional\nschema:\n  integer_columns: [SIZE]\n  options_column: null\n  key_column: NAME\n",
    )
    .unwrap();
    let data = write_fstab(&dir, "sda     100\nsdb\n");

    let output = run(&[
        "parse",
        "--input",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows, serde_json::json!([
        {"NAME": "sda", "SIZE": 100},
        {"NAME": "sdb", "SIZE": 0}
    ]));
}

// ---------------------------------------------------------------------------
// lookup
// ---------------------------------------------------------------------------

#[test]
fn lookup_finds_mount_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fstab(&dir, FSTAB);

    let output = run(&[
        "lookup",
        "/hdfs/data1",
        "--input",
        path.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success());
    let row: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(row["fs_spec"], "/dev/sdb1");
    assert_eq!(row["fs_vfstype"], "xfs");
}

#[test]
fn lookup_returns_last_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fstab(&dir, "/dev/a /data xfs ro\n/dev/b /data xfs rw\n");

    let output = run(&["lookup", "/data", "--input", path.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());
    let row: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(row["fs_spec"], "/dev/b");
}

#[test]
fn lookup_missing_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fstab(&dir, FSTAB);

    let output = run(&["lookup", "/nowhere", "--input", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no row with fs_file '/nowhere'"), "{stderr}");
}

// ---------------------------------------------------------------------------
// options
// ---------------------------------------------------------------------------

#[test]
fn options_adds_well_known_flags() {
    let output = run(&["options", "ro,nfsvers=3", "--format", "json"]);
    assert!(output.status.success());
    let opts: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(opts["ro"], true);
    assert_eq!(opts["nfsvers"], "3");
    assert_eq!(opts["rw"], false);
    assert_eq!(opts["noquota"], false);
}

#[test]
fn options_without_defaults() {
    let output = run(&["options", "rw,vers=4", "--no-defaults", "--format", "json"]);
    assert!(output.status.success());
    let opts: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(opts, serde_json::json!({"rw": true, "vers": "4"}));
}
