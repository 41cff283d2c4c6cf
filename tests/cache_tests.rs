use std::{
    fs::{self, File},
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, SystemTime},
};

use quai::{prelude::*, source};
use tempfile::TempDir;

const VALIDATIONS: &str = "libelle_arret;cat_jour;trnc_horr_60;pourcentage_validations\nNATION;JOHV;7H-8H;6.5\n";

fn touch(path: &std::path::Path, modified: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

#[test]
fn memoized_reuses_until_modified() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("validations.csv");
    fs::write(&path, VALIDATIONS).unwrap();
    let start = SystemTime::now() - Duration::from_secs(3600);
    touch(&path, start);

    let source = Source::file(&path);
    let cache: Memoized<Vec<ValidationRecord>> = Memoized::new();
    let loads = AtomicUsize::new(0);
    let load = || {
        loads.fetch_add(1, Ordering::SeqCst);
        load_validations(source.clone())
    };

    let first = cache.get_or_load(&[&source], load).unwrap();
    let second = cache.get_or_load(&[&source], load).unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(first.len(), 1);
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    fs::write(&path, format!("{VALIDATIONS}OPERA;JOHV;8H-9H;2.0\n")).unwrap();
    touch(&path, start + Duration::from_secs(60));
    let third = cache.get_or_load(&[&source], load).unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert_eq!(third.len(), 2);
}

#[test]
fn memoized_missing_source() {
    let dir = TempDir::new().unwrap();
    let missing = Source::file(dir.path().join("missing.csv"));
    let cache: Memoized<Vec<ValidationRecord>> = Memoized::new();
    let result = cache.get_or_load(&[&missing], || load_validations(missing.clone()));
    assert!(matches!(result, Err(source::Error::FileNotFound(_))));
    assert!(cache.fingerprints().is_none());
}

#[test]
fn fingerprint_records_modification_time() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("validations.csv");
    fs::write(&path, VALIDATIONS).unwrap();
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    touch(&path, modified);

    let fingerprint = Fingerprint::of(&Source::file(&path)).unwrap();
    assert_eq!(fingerprint.path, path);
    assert_eq!(fingerprint.modified.timestamp(), 1_700_000_000);
}

#[test]
fn fingerprint_unreadable_path_is_not_missing() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("plain.csv");
    fs::write(&plain, VALIDATIONS).unwrap();

    let result = Fingerprint::of(&Source::file(plain.join("inner.csv")));
    assert!(matches!(result, Err(source::Error::Io(_))));

    let result = Fingerprint::of(&Source::file(dir.path().join("missing.csv")));
    assert!(matches!(result, Err(source::Error::FileNotFound(_))));
}
