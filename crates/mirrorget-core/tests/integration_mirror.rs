//! Integration tests: local HTTP server, full resolve -> stage -> publish runs.

mod common;

use std::path::{Path, PathBuf};
use std::time::Duration;

use mirrorget_core::fetch::FetchOptions;
use mirrorget_core::report::UrlStatus;
use mirrorget_core::staging::staging_path;
use mirrorget_core::{download, mirror_urls, resolve, Outcome, TaskFailure};
use tempfile::tempdir;

fn opts() -> FetchOptions {
    FetchOptions {
        connect_timeout: Some(Duration::from_secs(5)),
        timeout: Some(Duration::from_secs(10)),
        max_redirections: 5,
        user_agent: None,
    }
}

struct Dirs {
    _tmp: tempfile::TempDir,
    root: PathBuf,
    staging: PathBuf,
}

fn dirs() -> Dirs {
    let tmp = tempdir().unwrap();
    let base = std::fs::canonicalize(tmp.path()).unwrap();
    Dirs {
        root: base.join("mirror"),
        staging: base.join("stage"),
        _tmp: tmp,
    }
}

fn staging_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn download_publishes_file_and_leaves_staging_empty() {
    let body: Vec<u8> = (0u8..251).cycle().take(64 * 1024).collect();
    let server = common::file_server::start(&[("/pub/debian-12.iso", &body)]);
    let d = dirs();

    let url = server.url("/pub/debian-12.iso");
    let report = mirror_urls([url.as_str()], &d.root, &d.staging, 2, &opts()).unwrap();

    assert_eq!(report.succeeded(), 1, "{report}");
    let dest = d.root.join(&server.host).join("pub/debian-12.iso");
    assert_eq!(std::fs::read(&dest).unwrap(), body);
    assert!(staging_is_empty(&d.staging));
    assert_eq!(report.bytes_downloaded(), body.len() as u64);
}

#[test]
fn second_run_skips_without_requests() {
    let server = common::file_server::start(&[("/a.txt", b"alpha"), ("/b/c.txt", b"gamma")]);
    let d = dirs();
    let urls = [server.url("/a.txt"), server.url("/b/c.txt")];

    let first = mirror_urls(&urls, &d.root, &d.staging, 4, &opts()).unwrap();
    assert_eq!(first.succeeded(), 2, "{first}");
    let requests_after_first = server.request_count();
    assert_eq!(requests_after_first, 2);

    let second = mirror_urls(&urls, &d.root, &d.staging, 4, &opts()).unwrap();
    assert_eq!(second.skipped(), 2, "{second}");
    assert_eq!(server.request_count(), requests_after_first);
    assert_eq!(
        std::fs::read(d.root.join(&server.host).join("b/c.txt")).unwrap(),
        b"gamma"
    );
}

#[test]
fn http_error_leaves_nothing_behind() {
    let server = common::file_server::start::<&[u8]>(&[]);
    let d = dirs();
    let url = server.url("/missing.bin");

    let report = mirror_urls([url.as_str()], &d.root, &d.staging, 1, &opts()).unwrap();
    assert_eq!(report.failed(), 1);
    let entry = report.entry(&url).unwrap();
    assert_eq!(entry.status.to_string(), "failed:network_error");
    assert!(!d.root.join(&server.host).join("missing.bin").exists());
    assert!(staging_is_empty(&d.staging));
}

#[test]
fn path_is_percent_encoded_but_destination_is_raw() {
    let server = common::file_server::start(&[("/docs/my%20file%2B1.txt", b"spaced")]);
    let d = dirs();
    let url = server.url("/docs/my file+1.txt");

    let report = mirror_urls([url.as_str()], &d.root, &d.staging, 1, &opts()).unwrap();
    assert_eq!(report.succeeded(), 1, "{report}");
    assert_eq!(server.requests(), vec!["/docs/my%20file%2B1.txt".to_string()]);
    let dest = d.root.join(&server.host).join("docs/my file+1.txt");
    assert_eq!(std::fs::read(dest).unwrap(), b"spaced");
}

#[test]
fn dot_segments_are_sent_as_written() {
    let server = common::file_server::start(&[("/a/../b.bin", b"bee")]);
    let d = dirs();
    let url = server.url("/a/../b.bin");

    let report = mirror_urls([url.as_str()], &d.root, &d.staging, 1, &opts()).unwrap();
    assert_eq!(report.succeeded(), 1, "{report}");
    assert_eq!(server.requests(), vec!["/a/../b.bin".to_string()]);
    assert_eq!(
        std::fs::read(d.root.join(&server.host).join("b.bin")).unwrap(),
        b"bee"
    );
}

#[test]
fn staging_collision_fails_and_keeps_existing_file() {
    let server = common::file_server::start(&[("/x.bin", b"fresh")]);
    let d = dirs();
    std::fs::create_dir_all(&d.root).unwrap();
    std::fs::create_dir_all(&d.staging).unwrap();
    let url = server.url("/x.bin");
    let target = resolve(&url, &d.root).unwrap();
    std::fs::create_dir_all(target.destination_path().parent().unwrap()).unwrap();

    let staged = staging_path(&d.staging, &url);
    std::fs::write(&staged, b"someone else's bytes").unwrap();

    let outcome = download(&target, &d.staging, &opts());
    assert!(
        matches!(outcome, Outcome::Failed(TaskFailure::StagingCollision(ref p)) if *p == staged),
        "{outcome}"
    );
    assert_eq!(std::fs::read(&staged).unwrap(), b"someone else's bytes");
    assert!(!target.destination_path().exists());
}

#[test]
fn failed_rename_removes_staging_file() {
    let server = common::file_server::start(&[("/gone/x.bin", b"fresh")]);
    let d = dirs();
    std::fs::create_dir_all(&d.root).unwrap();
    std::fs::create_dir_all(&d.staging).unwrap();
    // Parent directory never created, so the final rename fails.
    let url = server.url("/gone/x.bin");
    let target = resolve(&url, &d.root).unwrap();

    let outcome = download(&target, &d.staging, &opts());
    assert!(
        matches!(outcome, Outcome::Failed(TaskFailure::Io { .. })),
        "{outcome}"
    );
    assert_eq!(server.request_count(), 1);
    assert!(staging_is_empty(&d.staging));
    assert!(!target.destination_path().exists());
}

#[test]
fn mixed_batch_reports_every_url() {
    let server = common::file_server::start(&[("/ok.bin", b"ok")]);
    let d = dirs();
    let ok = server.url("/ok.bin");
    let escaping = server.url("/../../etc/passwd");
    let urls = vec![
        ok.clone(),
        "ftp://example.com/file.bin".to_string(),
        server.url("/dir/"),
        escaping.clone(),
        server.url("/gone.bin"),
    ];

    let report = mirror_urls(&urls, &d.root, &d.staging, 3, &opts()).unwrap();
    assert_eq!(report.entries.len(), 5);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.rejected(), 3);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.entry(&escaping).unwrap().status,
        UrlStatus::Rejected(_)
    ));
    assert_eq!(
        report.entry(&escaping).unwrap().status.to_string(),
        "rejected:escapes_root"
    );
    // Rejected URLs never reach the network.
    let mut seen = server.requests();
    seen.sort();
    assert_eq!(seen, vec!["/gone.bin".to_string(), "/ok.bin".to_string()]);
}

#[test]
fn stale_staging_file_from_crashed_run_is_reused() {
    let server = common::file_server::start(&[("/resume.bin", b"complete body")]);
    let d = dirs();
    std::fs::create_dir_all(&d.staging).unwrap();
    let url = server.url("/resume.bin");
    std::fs::write(staging_path(&d.staging, &url), b"compl").unwrap();

    let report = mirror_urls([url.as_str()], &d.root, &d.staging, 1, &opts()).unwrap();
    assert_eq!(report.succeeded(), 1, "{report}");
    assert_eq!(
        std::fs::read(d.root.join(&server.host).join("resume.bin")).unwrap(),
        b"complete body"
    );
    assert!(staging_is_empty(&d.staging));
}
