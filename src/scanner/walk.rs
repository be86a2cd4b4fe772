use crate::config::AppConfig;
use crate::error::Error;
use dashmap::DashMap;
use glob::Pattern;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, warn};

/// Walk every configured unit's template root in parallel and collect the
/// relative paths of the template files under it, keyed by unit name.
/// Relative paths use the configured delimiter regardless of the host
/// separator. A configured unit whose root does not exist yields an empty
/// path set, not a missing key.
pub fn collect_unit_paths(
    config: &AppConfig,
) -> Result<BTreeMap<String, Vec<String>>, Error> {
    let ignore_patterns = compile_patterns(&config.ignore_patterns);
    let map: DashMap<String, Vec<String>> = DashMap::new();

    config.units().into_par_iter().try_for_each(|(unit, root)| {
        let paths = walk_unit_root(unit, root, config, &ignore_patterns)?;
        map.insert(unit.to_string(), paths);
        Ok::<(), Error>(())
    })?;

    Ok(map.into_iter().collect())
}

/// Collect the relative template paths of a single unit.
/// Fails with [`Error::UnknownUnit`] for names that are neither the app
/// sentinel nor a configured plugin.
pub fn collect_unit_paths_for(
    config: &AppConfig,
    unit: &str,
) -> Result<Vec<String>, Error> {
    let root = config
        .unit_root(unit)
        .ok_or_else(|| Error::UnknownUnit(unit.to_string()))?;
    let ignore_patterns = compile_patterns(&config.ignore_patterns);
    walk_unit_root(unit, root, config, &ignore_patterns)
}

fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

fn walk_unit_root(
    unit: &str,
    root: &str,
    config: &AppConfig,
    ignore_patterns: &[Pattern],
) -> Result<Vec<String>, Error> {
    let root_path = Path::new(root);

    if !root_path.exists() {
        warn!("Template root for unit '{}' does not exist: {}", unit, root);
        return Ok(Vec::new());
    }
    if !root_path.is_dir() {
        return Err(Error::BadTemplateRoot {
            unit: unit.to_string(),
            path: root.to_string(),
        });
    }

    let mut paths = Vec::new();
    visit_dir(root_path, root_path, config, ignore_patterns, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn visit_dir(
    dir: &Path,
    root: &Path,
    config: &AppConfig,
    ignore_patterns: &[Pattern],
    paths: &mut Vec<String>,
) -> Result<(), Error> {
    if ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(dir))
    {
        return Ok(());
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() == io::ErrorKind::PermissionDenied {
                error!("Access denied reading directory {}: {}", dir.display(), err);
                return Ok(());
            }
            return Err(io::Error::new(
                err.kind(),
                format!("Error reading directory {}: {}", dir.display(), err),
            )
            .into());
        }
    };

    for entry_result in entries {
        let entry = entry_result.map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error reading entry in directory {}: {}", dir.display(), err),
            )
        })?;

        let path = entry.path();
        let file_type = entry.file_type().map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error getting file type for {}: {}", path.display(), err),
            )
        })?;

        if file_type.is_symlink() {
            continue;
        }

        if file_type.is_dir() {
            visit_dir(&path, root, config, ignore_patterns, paths)?;
            continue;
        }

        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(&path))
        {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !config.is_template(&file_name) {
            continue;
        }

        if let Some(relative) = relative_path(&path, root, config.delimiter) {
            paths.push(relative);
        }
    }

    Ok(())
}

/// Strip the unit root and join the remaining components with the configured
/// delimiter, so `<root>/admin/users/index.twig` becomes
/// `admin/users/index.twig` on every platform.
fn relative_path(path: &Path, root: &Path, delimiter: char) -> Option<String> {
    let stripped = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join(&delimiter.to_string()))
}
