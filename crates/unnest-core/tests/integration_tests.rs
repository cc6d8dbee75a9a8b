//! Integration tests for unnest-core.
//!
//! These tests run the real subprocess path against a POSIX shell stand-in
//! for 7-Zip. A fake archive holds either `exit:<code>` or the absolute path
//! of a directory whose contents the stand-in copies into the output
//! directory. Every invocation appends a line to `<archive>.calls`.

#![cfg(unix)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;
use tempfile::TempDir;
use unnest_core::Driver;
use unnest_core::RunConfig;
use unnest_core::RunEvent;
use unnest_core::RunObserver;
use unnest_core::SevenZip;
use unnest_core::StopReason;
use unnest_core::UnnestError;
use unnest_core::run;

const STAND_IN: &str = r#"#!/bin/sh
[ "$1" = "x" ] || exit 7
[ "$4" = "-y" ] || exit 7
archive="$2"
out="${3#-o}"
echo run >> "$archive.calls"
content=$(cat "$archive")
case "$content" in
  exit:*)
    printf 'partial \377 output\n'
    echo "simulated failure for $archive" >&2
    exit "${content#exit:}"
    ;;
esac
cp -R "$content/." "$out/" || exit 2
echo "Everything is Ok"
"#;

struct Tools {
    _dir: TempDir,
    sevenz: PathBuf,
    vanishing: PathBuf,
}

// Scripts are written once, before any test spawns a process, so no child
// can inherit a write handle to them.
static TOOLS: LazyLock<Tools> = LazyLock::new(|| {
    let dir = TempDir::new().expect("failed to create tool dir");
    let sevenz = write_script(dir.path(), "7z", STAND_IN);
    let vanishing = write_script(
        dir.path(),
        "7z-vanishing",
        &STAND_IN.replacen("#!/bin/sh\n", "#!/bin/sh\nrm -f \"$0\"\n", 1),
    );
    Tools {
        _dir: dir,
        sevenz,
        vanishing,
    }
});

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config(max: usize) -> RunConfig {
    RunConfig::with_max_iterations(max).unwrap()
}

/// Creates a fake archive whose extraction copies `source`.
fn pack(archive: &Path, source: &Path) {
    fs::write(archive, source.to_str().unwrap()).unwrap();
}

/// Creates a fake archive whose extraction exits with `code`.
fn failing(archive: &Path, code: i32) {
    fs::write(archive, format!("exit:{code}")).unwrap();
}

fn calls(archive: &Path) -> usize {
    let log = PathBuf::from(format!("{}.calls", archive.display()));
    fs::read_to_string(log).map_or(0, |s| s.lines().count())
}

fn dir_with_file(parent: &Path, name: &str, file: &str, content: &str) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
    dir
}

#[test]
fn test_empty_directory() {
    let work = TempDir::new().unwrap();

    let summary = run(work.path(), &TOOLS.sevenz, &config(5)).unwrap();

    assert_eq!(summary.iterations, 1);
    assert_eq!(summary.successes, 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.stop_reason, StopReason::NoArchives);
}

#[test]
fn test_single_archive() {
    let work = TempDir::new().unwrap();
    let sources = TempDir::new().unwrap();
    let payload = dir_with_file(sources.path(), "payload", "hello.txt", "hello");
    let archive = work.path().join("a.zip");
    pack(&archive, &payload);
    let before = fs::read(&archive).unwrap();

    let summary = run(work.path(), &TOOLS.sevenz, &config(5)).unwrap();

    assert_eq!(summary.successes, 1);
    assert_eq!(summary.errors, 0);
    assert_eq!(
        fs::read_to_string(work.path().join("a/hello.txt")).unwrap(),
        "hello"
    );
    assert_eq!(fs::read(&archive).unwrap(), before);
    assert_eq!(calls(&archive), 1);
}

#[test]
fn test_nested_archives_continue_to_cap() {
    let work = TempDir::new().unwrap();
    let sources = TempDir::new().unwrap();
    let inner_src = dir_with_file(sources.path(), "inner_src", "readme.txt", "deep");
    let outer_src = sources.path().join("outer_src");
    fs::create_dir(&outer_src).unwrap();
    pack(&outer_src.join("inner.tar.gz"), &inner_src);
    pack(&work.path().join("outer.zip"), &outer_src);

    let summary = run(work.path(), &TOOLS.sevenz, &config(4)).unwrap();

    assert_eq!(summary.successes, 2);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.iterations, 4);
    assert_eq!(summary.stop_reason, StopReason::IterationCap);
    assert!(work.path().join("outer/inner.tar.gz").is_file());
    assert_eq!(
        fs::read_to_string(work.path().join("outer/inner/readme.txt")).unwrap(),
        "deep"
    );
}

#[test]
fn test_second_run_is_idempotent() {
    let work = TempDir::new().unwrap();
    let sources = TempDir::new().unwrap();
    let inner_src = dir_with_file(sources.path(), "inner_src", "data.txt", "v1");
    let outer_src = sources.path().join("outer_src");
    fs::create_dir(&outer_src).unwrap();
    pack(&outer_src.join("inner.7z"), &inner_src);
    pack(&work.path().join("outer.zip"), &outer_src);

    let first = run(work.path(), &TOOLS.sevenz, &config(3)).unwrap();
    let second = run(work.path(), &TOOLS.sevenz, &config(3)).unwrap();

    assert_eq!(first.successes, second.successes);
    assert_eq!(first.errors, second.errors);
    assert_eq!(
        fs::read_to_string(work.path().join("outer/inner/data.txt")).unwrap(),
        "v1"
    );
}

#[test]
fn test_exit_code_two_retried_each_pass() {
    let work = TempDir::new().unwrap();
    let archive = work.path().join("broken.zip");
    failing(&archive, 2);

    let summary = run(work.path(), &TOOLS.sevenz, &config(3)).unwrap();

    assert_eq!(calls(&archive), 3);
    assert_eq!(summary.errors, 3);
    assert_eq!(summary.successes, 0);
    assert_eq!(summary.iterations, 3);
}

#[test]
fn test_exit_code_three_not_retried() {
    let work = TempDir::new().unwrap();
    let archive = work.path().join("odd.tar");
    failing(&archive, 3);

    let summary = run(work.path(), &TOOLS.sevenz, &config(4)).unwrap();

    assert_eq!(calls(&archive), 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.archives_considered, 1);
}

#[test]
fn test_cap_stops_with_archives_left() {
    let work = TempDir::new().unwrap();
    let sources = TempDir::new().unwrap();
    let c_src = dir_with_file(sources.path(), "c_src", "leaf.txt", "leaf");
    let b_src = sources.path().join("b_src");
    fs::create_dir(&b_src).unwrap();
    pack(&b_src.join("c.zip"), &c_src);
    let a_src = sources.path().join("a_src");
    fs::create_dir(&a_src).unwrap();
    pack(&a_src.join("b.zip"), &b_src);
    pack(&work.path().join("a.zip"), &a_src);

    let summary = run(work.path(), &TOOLS.sevenz, &config(2)).unwrap();

    assert_eq!(summary.iterations, 2);
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.errors, 0);
    assert!(work.path().join("a/b/c.zip").is_file());
    assert!(!work.path().join("a/b/c").exists());
}

#[derive(Default)]
struct WarningCapture {
    stdout: Vec<String>,
}

impl RunObserver for WarningCapture {
    fn on_event(&mut self, event: &RunEvent<'_>) {
        if let RunEvent::ExtractedWithWarnings { output, .. } = event {
            self.stdout.push(output.stdout.clone());
        }
    }
}

#[test]
fn test_warning_output_decoded_lossily() {
    let work = TempDir::new().unwrap();
    let archive = work.path().join("locked.7z");
    failing(&archive, 1);
    let mut capture = WarningCapture::default();

    let summary = Driver::new(
        work.path(),
        SevenZip::new(&TOOLS.sevenz),
        &mut capture,
        config(2),
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(summary.successes, 1);
    assert_eq!(calls(&archive), 1);
    assert_eq!(capture.stdout.len(), 1);
    assert!(capture.stdout[0].contains('\u{FFFD}'));
}

#[test]
fn test_tool_disappearing_aborts() {
    let work = TempDir::new().unwrap();
    let sources = TempDir::new().unwrap();
    let payload = dir_with_file(sources.path(), "payload", "f.txt", "x");
    pack(&work.path().join("a.zip"), &payload);
    pack(&work.path().join("b.zip"), &payload);

    let err = run(work.path(), &TOOLS.vanishing, &config(3)).unwrap_err();

    assert!(matches!(err, UnnestError::ToolVanished { .. }));
    assert_eq!(calls(&work.path().join("a.zip")), 1);
    assert_eq!(calls(&work.path().join("b.zip")), 0);
}

#[test]
fn test_missing_work_dir_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("not-there");

    let err = run(&missing, &TOOLS.sevenz, &config(5)).unwrap_err();

    assert!(err.is_startup_failure());
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
