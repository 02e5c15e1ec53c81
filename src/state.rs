use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::data::catalog::FileCatalog;
use crate::error::{ActionError, PreconditionError, ValidationError};
use crate::projection::Projection;
use crate::session::ThresholdSession;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Files found by the last scan.
    pub catalog: FileCatalog,

    /// Index into `catalog` of the loaded file.
    pub selected: Option<usize>,

    /// Loaded file and its threshold (None until a file is selected).
    pub session: Option<ThresholdSession>,

    /// Contents of the Z value text box.
    pub threshold_input: String,

    /// Bumped on every successful load so plots start with fresh bounds.
    pub load_generation: u64,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,

    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Scan `root` and replace the catalog. The current session is kept.
    ///
    /// On failure the catalog is left empty.
    pub fn choose_root(&mut self, root: &Path) -> Result<usize, ActionError> {
        self.selected = None;
        match FileCatalog::scan(root) {
            Ok(catalog) => {
                self.catalog = catalog;
                self.settings.last_root = Some(root.to_path_buf());
                Ok(self.catalog.len())
            }
            Err(e) => {
                self.catalog = FileCatalog::default();
                Err(e.into())
            }
        }
    }

    /// Load the catalog entry at zero-based `index` into a new session.
    ///
    /// The previous session stays active when loading fails.
    pub fn select_index(&mut self, index: usize) -> Result<usize, ActionError> {
        let entry = self
            .catalog
            .get(index)
            .ok_or(PreconditionError::NoSuchEntry {
                index: index + 1,
                len: self.catalog.len(),
            })?;
        let session = ThresholdSession::select_file(entry)?;
        let count = session.cloud().len();

        self.session = Some(session);
        self.selected = Some(index);
        self.load_generation += 1;
        Ok(count)
    }

    /// Commit the text box as the threshold of the active session.
    pub fn apply_threshold(&mut self) -> Result<f64, ActionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(PreconditionError::NoFileLoaded)?;
        let z = session.set_threshold(&self.threshold_input)?;
        Ok(z)
    }

    /// Save the active session next to its source file.
    pub fn save_current(&self) -> Result<PathBuf, ActionError> {
        self.session
            .as_ref()
            .ok_or(PreconditionError::NoFileLoaded)?
            .save()
    }

    /// Views to plot for the active session; empty when nothing is loaded.
    pub fn projections(&self) -> Vec<Projection> {
        self.session
            .as_ref()
            .map(ThresholdSession::projections)
            .unwrap_or_default()
    }

    /// Turn the outcome of a user action into a status message and a log line.
    pub fn report<T>(
        &mut self,
        action: &str,
        result: Result<T, ActionError>,
        describe: impl FnOnce(&T) -> String,
    ) {
        match result {
            Ok(value) => {
                let msg = describe(&value);
                log::info!("{action}: {msg}");
                self.status = Some(Status::Info(msg));
            }
            Err(e) => {
                match &e {
                    ActionError::Validation(ValidationError { .. }) => {
                        log::warn!("{action} rejected: {e}")
                    }
                    _ => log::error!("{action} failed: {e}"),
                }
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn state_with_root(files: &[(&str, &str)]) -> (tempfile::TempDir, AppState) {
        let dir = tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let mut state = AppState::default();
        state.choose_root(dir.path()).unwrap();
        (dir, state)
    }

    #[test]
    fn failed_scan_leaves_catalog_empty() {
        let (dir, mut state) = state_with_root(&[("a.csv", "1,2,3\n")]);
        assert_eq!(state.catalog.len(), 1);

        let result = state.choose_root(&dir.path().join("missing"));

        assert!(matches!(result, Err(ActionError::Scan(_))));
        assert!(state.catalog.is_empty());
        assert_eq!(state.settings.last_root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn selecting_another_file_drops_threshold() {
        let (_dir, mut state) =
            state_with_root(&[("a.csv", "1,2,3\n"), ("b.csv", "4,5,6\n7,8,9\n")]);
        state.select_index(0).unwrap();
        state.threshold_input = "2".into();
        state.apply_threshold().unwrap();

        assert_eq!(state.select_index(1).unwrap(), 2);

        let session = state.session.as_ref().unwrap();
        assert_eq!(session.threshold(), None);
        assert_eq!(state.selected, Some(1));
        assert!(state.projections().iter().all(|p| p.reference.is_none()));
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let (_dir, mut state) =
            state_with_root(&[("a.csv", "1,2,3\n"), ("b.csv", "X,Y,Z\n")]);
        state.select_index(0).unwrap();
        state.threshold_input = "2.5".into();
        state.apply_threshold().unwrap();
        let generation = state.load_generation;

        let result = state.select_index(1);

        assert!(matches!(result, Err(ActionError::Load(_))));
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.load_generation, generation);
        let session = state.session.as_ref().unwrap();
        assert!(session.source().ends_with("a.csv"));
        assert_eq!(session.threshold(), Some(2.5));
    }

    #[test]
    fn out_of_range_index_is_a_precondition_error() {
        let (_dir, mut state) = state_with_root(&[("a.csv", "1,2,3\n")]);
        let result = state.select_index(5);
        assert!(matches!(
            result,
            Err(ActionError::Precondition(PreconditionError::NoSuchEntry {
                index: 6,
                len: 1
            }))
        ));
    }

    #[test]
    fn actions_without_a_file_fail() {
        let mut state = AppState::default();
        state.threshold_input = "3".into();

        assert!(matches!(
            state.apply_threshold(),
            Err(ActionError::Precondition(PreconditionError::NoFileLoaded))
        ));
        assert!(matches!(
            state.save_current(),
            Err(ActionError::Precondition(PreconditionError::NoFileLoaded))
        ));
        assert!(state.projections().is_empty());
    }

    #[test]
    fn report_sets_status() {
        let mut state = AppState::default();
        state.report("Scan", Ok(3usize), |n| format!("Found {n} CSV files."));
        assert_eq!(state.status, Some(Status::Info("Found 3 CSV files.".into())));

        let err: Result<(), ActionError> = Err(PreconditionError::NoThreshold.into());
        state.report("Save", err, |_| String::new());
        assert_eq!(
            state.status,
            Some(Status::Error("Error: no Z value entered".into()))
        );
    }
}
