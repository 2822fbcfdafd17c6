use crate::error::LoaderError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A backing file for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSource {
    pub symbol: String,
    pub path: PathBuf,
}

impl PriceSource {
    /// File name used to label errors and log lines.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Derives the asset symbol from a source file name.
///
/// Files are named `<SYMBOL>_<suffix>.<ext>`; the symbol is everything before the first
/// underscore, upper-cased. A name without an underscore uses its whole stem.
pub fn symbol_from_path(path: &Path) -> Result<String, LoaderError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| LoaderError::InvalidSourceName(path.to_path_buf()))?;

    let symbol = match stem.split_once('_') {
        Some((symbol, _)) => symbol,
        None => stem,
    }
    .trim();

    if symbol.is_empty() {
        return Err(LoaderError::InvalidSourceName(path.to_path_buf()));
    }
    Ok(symbol.to_ascii_uppercase())
}

/// Lists the price sources in `dir`, one per asset, ordered by path.
///
/// Only non-hidden files with the given extension are considered. Symlinks are followed, so a
/// link to a regular file counts as a source; a dangling link is an I/O error.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PriceSource>, LoaderError> {
    let io_error = |source: std::io::Error| LoaderError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let is_file = |path: &Path| {
        fs::metadata(path)
            .map(|metadata| metadata.is_file())
            .map_err(|source| LoaderError::Io {
                path: path.to_path_buf(),
                source,
            })
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));
        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if !hidden && matches_extension && is_file(&path)? {
            paths.push(path);
        } else {
            tracing::trace!(path = %path.display(), "Skipping non-source entry.");
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(LoaderError::NoSources(dir.to_path_buf()));
    }

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let symbol = symbol_from_path(&path)?;
        if let Some(first) = seen.get(&symbol) {
            return Err(LoaderError::DuplicateSymbol {
                symbol,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(symbol.clone(), path.clone());
        sources.push(PriceSource { symbol, path });
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_prefix_before_first_underscore() {
        assert_eq!(symbol_from_path(Path::new("prices/XRP_values.csv")).unwrap(), "XRP");
        assert_eq!(symbol_from_path(Path::new("BTC_values_2022_01.csv")).unwrap(), "BTC");
    }

    #[test]
    fn symbol_without_suffix_uses_stem() {
        assert_eq!(symbol_from_path(Path::new("doge.csv")).unwrap(), "DOGE");
    }

    #[test]
    fn empty_symbol_is_rejected() {
        assert!(matches!(
            symbol_from_path(Path::new("_values.csv")),
            Err(LoaderError::InvalidSourceName(_))
        ));
    }
}
