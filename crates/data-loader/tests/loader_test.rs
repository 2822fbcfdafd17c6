use data_loader::{LoaderError, RecordFormat, SeriesLoader};
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn loader(dir: &Path) -> SeriesLoader {
    SeriesLoader::new(dir, "csv", RecordFormat::default())
}

#[tokio::test]
async fn loads_every_source_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "XRP_values.csv",
        "timestamp,symbol,price\n100,XRP,0.5\n200,XRP,0.8\n50,XRP,0.6\n",
    );
    write(
        dir.path(),
        "BTC_values.csv",
        "timestamp,symbol,price\n1641009600000,BTC,46813.21\n",
    );
    write(dir.path(), "ETH_values.csv", "timestamp,symbol,price\n");

    let series = loader(dir.path()).load_all().await.unwrap();

    let symbols: Vec<_> = series.iter().map(|s| s.symbol()).collect();
    assert_eq!(symbols, vec!["BTC", "ETH", "XRP"]);
    assert_eq!(series[0].points()[0].price, dec!(46813.21));
    assert!(series[1].is_empty());
    assert_eq!(series[2].len(), 3);
}

#[tokio::test]
async fn ignores_other_extensions_and_hidden_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "XRP_values.csv", "timestamp,symbol,price\n100,XRP,0.5\n");
    write(dir.path(), "README.md", "not a price file");
    write(dir.path(), ".DOGE_values.csv", "timestamp,symbol,price\n100,DOGE,0.1\n");
    fs::create_dir(dir.path().join("archive.csv")).unwrap();

    let series = loader(dir.path()).load_all().await.unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].symbol(), "XRP");
}

#[tokio::test]
async fn one_malformed_source_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "XRP_values.csv", "timestamp,symbol,price\n100,XRP,0.5\n");
    write(dir.path(), "LTC_values.csv", "timestamp,symbol,price\n100,LTC,abc\n");

    let err = loader(dir.path()).load_all().await.unwrap_err();

    match err {
        LoaderError::MalformedRecord { file, line, .. } => {
            assert_eq!(file, "LTC_values.csv");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader(dir.path()).load_all().await.unwrap_err();
    assert!(matches!(err, LoaderError::NoSources(_)));
}

#[tokio::test]
async fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader(&dir.path().join("nope")).load_all().await.unwrap_err();
    assert!(matches!(err, LoaderError::Io { .. }));
}

#[test]
fn two_sources_for_one_symbol_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "XRP_2022.csv", "timestamp,symbol,price\n");
    write(dir.path(), "xrp_2023.csv", "timestamp,symbol,price\n");

    let err = loader(dir.path()).sources().unwrap_err();
    assert!(matches!(err, LoaderError::DuplicateSymbol { ref symbol, .. } if symbol == "XRP"));
}

#[test]
fn builds_from_data_settings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "ETH_values.txt", "ts;price\n100;3000\n");

    let settings = configuration::DataSettings {
        prices_dir: dir.path().to_path_buf(),
        extension: "txt".to_string(),
        delimiter: ";".to_string(),
        price_column: 1,
    };
    let loader = SeriesLoader::from_settings(&settings).unwrap();
    let sources = loader.sources().unwrap();
    let series = loader.load_source(&sources[0]).unwrap();

    assert_eq!(series.symbol(), "ETH");
    assert_eq!(series.points()[0].price, dec!(3000));
}

#[cfg(unix)]
#[tokio::test]
async fn follows_symlinked_sources() {
    let store = tempfile::tempdir().unwrap();
    write(store.path(), "xrp-archive.txt", "timestamp,symbol,price
100,XRP,0.5
");

    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(
        store.path().join("xrp-archive.txt"),
        dir.path().join("XRP_values.csv"),
    )
    .unwrap();

    let series = loader(dir.path()).load_all().await.unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].symbol(), "XRP");
    assert_eq!(series[0].points()[0].price, dec!(0.5));
}

#[cfg(unix)]
#[tokio::test]
async fn dangling_symlink_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing.csv"), dir.path().join("XRP_values.csv"))
        .unwrap();

    let err = loader(dir.path()).load_all().await.unwrap_err();
    assert!(matches!(err, LoaderError::Io { .. }));
}
