//! Plan serialization and file writing.
//!
//! ## Safety Guarantees
//!
//! - **Deterministic**: plans serialize from ordered maps, so the same
//!   options always produce byte-identical output
//! - **Atomic writes**: content is staged in a hidden sibling file and renamed
//!   into place, so an interrupted run leaves the previous file intact

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{fs, io, process};

use gqlforge_define::GenerationPlan;
use tracing::{debug, info};

use crate::errors::GeneratorError;

/// Serialization format for a written plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFormat {
    /// `codegen.yml` style.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl PlanFormat {
    /// Picks JSON for a `.json` path and YAML otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Serializes a plan in the given format.
///
/// ## Errors
///
/// Returns [`GeneratorError::Serialize`] if the serializer fails.
pub fn render_plan(plan: &GenerationPlan, format: PlanFormat) -> Result<String, GeneratorError> {
    match format {
        PlanFormat::Yaml => plan
            .to_yaml()
            .map_err(|e| GeneratorError::Serialize(e.to_string())),
        PlanFormat::Json => Ok(plan.to_json()?),
    }
}

/// Hidden staging file next to `path`, unique per target file and process.
///
/// `codegen.yml` stages as `.codegen.yml.<pid>.tmp`, so two targets that
/// differ only by extension never share a staging file.
fn staging_path(path: &Path) -> Result<PathBuf, GeneratorError> {
    let name = path.file_name().ok_or_else(|| GeneratorError::InvalidArgument {
        name: "path".to_string(),
        reason: format!("{} does not name a file", path.display()),
    })?;

    let mut staged = OsString::from(".");
    staged.push(name);
    staged.push(format!(".{}.tmp", process::id()));
    Ok(path.with_file_name(staged))
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> GeneratorError + '_ {
    move |source| GeneratorError::WriteError {
        path: path.display().to_string(),
        source,
    }
}

/// Replaces `path` with `content` so readers never see a partial file.
///
/// Missing parent directories are created. The content is staged in a hidden
/// sibling file and renamed over `path`; the staging file is removed if
/// either step fails.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidArgument`] when `path` has no file name,
/// and [`GeneratorError::WriteError`] naming the directory or file that could
/// not be created, written or replaced.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(write_error(dir))?;
    }

    let staged = staging_path(path)?;
    let result = fs::write(&staged, content)
        .map_err(write_error(&staged))
        .and_then(|()| fs::rename(&staged, path).map_err(write_error(path)));

    if result.is_err() {
        // The staging file may never have been created.
        let _ = fs::remove_file(&staged);
    }
    result?;

    debug!(path = %path.display(), bytes = content.len(), "replaced file");
    Ok(())
}

/// Serializes and writes a plan.
///
/// ## Arguments
///
/// * `plan` - The compiled plan
/// * `path` - Destination file
/// * `format` - Serialization format
/// * `dry_run` - If true, return the content without writing
///
/// ## Returns
///
/// The serialized plan.
pub fn write_plan(
    plan: &GenerationPlan,
    path: &Path,
    format: PlanFormat,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let content = render_plan(plan, format)?;

    if dry_run {
        debug!(path = %path.display(), "dry run; plan not written");
    } else {
        write_atomic(path, &content)?;
        info!(path = %path.display(), targets = plan.len(), "wrote generation plan");
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlforge_define::GenerationTarget;
    use tempfile::TempDir;

    fn make_plan() -> GenerationPlan {
        let mut plan = GenerationPlan::default();
        plan.generates.insert(
            "src/graphql/main/".to_string(),
            GenerationTarget {
                preset: Some("client".to_string()),
                ..Default::default()
            },
        );
        plan
    }

    // === PlanFormat ===

    #[test]
    fn format_follows_extension() {
        assert_eq!(PlanFormat::from_path(Path::new("codegen.json")), PlanFormat::Json);
        assert_eq!(PlanFormat::from_path(Path::new("codegen.JSON")), PlanFormat::Json);
        assert_eq!(PlanFormat::from_path(Path::new("codegen.yml")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("codegen")), PlanFormat::Yaml);
    }

    // === render_plan ===

    #[test]
    fn render_plan_yaml_has_generates_map() {
        let yaml = render_plan(&make_plan(), PlanFormat::Yaml).unwrap();
        assert!(yaml.contains("overwrite: true"));
        assert!(yaml.contains("generates:"));
        assert!(yaml.contains("src/graphql/main/"));
        assert!(yaml.contains("preset: client"));
    }

    #[test]
    fn render_plan_json_omits_unset_fields() {
        let json = render_plan(&make_plan(), PlanFormat::Json).unwrap();
        assert!(json.contains(r#""preset": "client""#));
        assert!(!json.contains("plugins"));
        assert!(!json.contains("presetConfig"));
    }

    // === write_atomic ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/deep/codegen.yml");

        write_atomic(&file_path, "generates: {}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "generates: {}");
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_atomic_overwrites_and_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("codegen.yml");
        fs::write(&file_path, "old").unwrap();

        write_atomic(&file_path, "new").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
        assert_eq!(dir_entries(temp_dir.path()), vec!["codegen.yml"]);
    }

    #[test]
    fn write_atomic_leaves_same_stem_siblings_alone() {
        let temp_dir = TempDir::new().unwrap();
        let sibling = temp_dir.path().join("codegen.tmp");
        fs::write(&sibling, "keep me").unwrap();

        write_atomic(&temp_dir.path().join("codegen.yml"), "a").unwrap();
        write_atomic(&temp_dir.path().join("codegen.json"), "b").unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
        assert_eq!(
            dir_entries(temp_dir.path()),
            vec!["codegen.json", "codegen.tmp", "codegen.yml"]
        );
    }

    #[test]
    fn write_atomic_failed_rename_removes_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("codegen.yml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), "x").unwrap();

        let err = write_atomic(&target, "content").unwrap_err();

        assert!(matches!(err, GeneratorError::WriteError { ref path, .. } if path.ends_with("codegen.yml")));
        assert_eq!(dir_entries(temp_dir.path()), vec!["codegen.yml"]);
    }

    #[test]
    fn staging_path_is_hidden_sibling() {
        let staged = staging_path(Path::new("out/codegen.yml")).unwrap();
        let name = staged.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(staged.parent(), Some(Path::new("out")));
        assert!(name.starts_with(".codegen.yml."), "{name}");
        assert!(name.ends_with(".tmp"), "{name}");
    }

    #[test]
    fn staging_path_rejects_paths_without_file_name() {
        assert!(matches!(
            staging_path(Path::new("..")),
            Err(GeneratorError::InvalidArgument { .. })
        ));
    }

    // === write_plan ===

    #[test]
    fn write_plan_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codegen.yml");

        let content = write_plan(&make_plan(), &path, PlanFormat::Yaml, true).unwrap();

        assert!(content.contains("generates:"));
        assert!(!path.exists());
    }

    #[test]
    fn write_plan_writes_rendered_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codegen.json");

        let content = write_plan(&make_plan(), &path, PlanFormat::Json, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
