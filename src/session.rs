use std::path::{Path, PathBuf};

use crate::data::catalog::CatalogEntry;
use crate::data::loader::load_point_cloud;
use crate::data::model::PointCloud;
use crate::data::writer::{crown_path, write_crown_file};
use crate::error::{ActionError, LoadError, PreconditionError, ValidationError};
use crate::projection::{project, with_reference_line, Projection, ELEVATIONS};

// ---------------------------------------------------------------------------
// ThresholdSession
// ---------------------------------------------------------------------------

/// The file being inspected and the crown height chosen for it.
///
/// A session is created per file: selecting another file builds a new
/// session, so a threshold can never outlive the cloud it was chosen for.
#[derive(Debug, Clone)]
pub struct ThresholdSession {
    source: PathBuf,
    cloud: PointCloud,
    threshold: Option<f64>,
}

/// Borrowed view of everything a save records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedCloud<'a> {
    pub source: &'a Path,
    pub cloud: &'a PointCloud,
    pub threshold: f64,
}

impl ThresholdSession {
    /// Load `entry` into a fresh session with no threshold.
    pub fn select_file(entry: &CatalogEntry) -> Result<Self, LoadError> {
        let cloud = load_point_cloud(&entry.path)?;
        log::info!("Loaded {} points from {}", cloud.len(), entry.path.display());
        Ok(ThresholdSession {
            source: entry.path.clone(),
            cloud,
            threshold: None,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Parse `raw` and make it the active threshold.
    ///
    /// The previous threshold is kept when `raw` is not a finite number.
    pub fn set_threshold(&mut self, raw: &str) -> Result<f64, ValidationError> {
        let z = parse_threshold(raw)?;
        self.threshold = Some(z);
        log::info!("Crown Z for {} set to {z}", self.source.display());
        Ok(z)
    }

    /// XZ and YZ views of the cloud, with the threshold line when one is set.
    pub fn projections(&self) -> Vec<Projection> {
        let projections = project(&self.cloud, &ELEVATIONS);
        log::debug!(
            "Projected {} points onto {} planes",
            self.cloud.len(),
            projections.len()
        );
        with_reference_line(projections, self.threshold)
    }

    /// The points together with the chosen threshold, if one is set.
    pub fn annotated(&self) -> Result<AnnotatedCloud<'_>, PreconditionError> {
        let threshold = self.threshold.ok_or(PreconditionError::NoThreshold)?;
        Ok(AnnotatedCloud {
            source: &self.source,
            cloud: &self.cloud,
            threshold,
        })
    }

    /// Where [`save`](Self::save) writes to.
    pub fn target_path(&self) -> PathBuf {
        crown_path(&self.source)
    }

    /// Write the points and the threshold annotation next to the source file.
    ///
    /// The source is never modified. Saving again overwrites the previous copy.
    pub fn save(&self) -> Result<PathBuf, ActionError> {
        let annotated = self.annotated()?;
        let target = self.target_path();
        write_crown_file(
            &target,
            annotated.source,
            annotated.cloud,
            annotated.threshold,
        )?;
        log::info!(
            "Saved {} points of {} with crown Z {} to {}",
            annotated.cloud.len(),
            annotated.source.display(),
            annotated.threshold,
            target.display()
        );
        Ok(target)
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|z| z.is_finite())
        .ok_or_else(|| ValidationError {
            input: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::data::catalog::FileCatalog;
    use crate::data::model::Point;

    fn entry_for(path: &Path) -> CatalogEntry {
        CatalogEntry {
            path: path.to_path_buf(),
            relative: PathBuf::from(path.file_name().unwrap()),
        }
    }

    fn session_with(content: &str) -> (tempfile::TempDir, ThresholdSession) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.csv");
        fs::write(&path, content).unwrap();
        let session = ThresholdSession::select_file(&entry_for(&path)).unwrap();
        (dir, session)
    }

    #[test]
    fn new_session_has_no_threshold() {
        let (_dir, session) = session_with("0,0,1\n0,0,2\n");
        assert_eq!(session.threshold(), None);
        assert_eq!(session.cloud().len(), 2);
        assert!(session.projections().iter().all(|p| p.reference.is_none()));
    }

    #[test]
    fn invalid_threshold_keeps_previous_value() {
        let (_dir, mut session) = session_with("0,0,1\n");

        assert_eq!(session.set_threshold("12.5").unwrap(), 12.5);
        let err = session.set_threshold("abc").unwrap_err();
        assert_eq!(err.input, "abc");
        assert!(session.set_threshold("").is_err());
        assert!(session.set_threshold("inf").is_err());

        assert_eq!(session.threshold(), Some(12.5));
    }

    #[test]
    fn threshold_is_drawn_on_both_projections() {
        let (_dir, mut session) = session_with("1,2,3\n4,5,6\n");
        session.set_threshold(" 4.5 ").unwrap();

        let projections = session.projections();
        assert_eq!(projections.len(), 2);
        assert!(projections.iter().all(|p| p.reference == Some(4.5)));
        assert!(projections.iter().all(|p| p.points.len() == 2));
    }

    #[test]
    fn save_without_threshold_writes_nothing() {
        let (dir, session) = session_with("1,2,3\n");

        let err = session.save().unwrap_err();

        assert!(matches!(
            err,
            ActionError::Precondition(PreconditionError::NoThreshold)
        ));
        assert!(!dir.path().join("tree_crown.csv").exists());
    }

    #[test]
    fn annotated_exposes_points_and_threshold() {
        let (_dir, mut session) = session_with("1,2,3\n");
        assert_eq!(session.annotated(), Err(PreconditionError::NoThreshold));

        session.set_threshold("2").unwrap();
        let annotated = session.annotated().unwrap();
        assert_eq!(annotated.threshold, 2.0);
        assert_eq!(annotated.cloud.points(), &[Point::new(1.0, 2.0, 3.0)]);
        assert_eq!(annotated.source, session.source());
    }

    #[test]
    fn scan_select_threshold_save() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/p1.csv"), "1,2,10\n1,2,20\n").unwrap();
        fs::write(root.join("b/p2.csv"), "5,5,5\n").unwrap();

        let catalog = FileCatalog::scan(root).unwrap();
        assert_eq!(catalog.len(), 2);

        let entry = catalog
            .entries()
            .iter()
            .find(|e| e.path.ends_with("p1.csv"))
            .unwrap();
        let mut session = ThresholdSession::select_file(entry).unwrap();
        assert_eq!(session.cloud().len(), 2);

        session.set_threshold("15").unwrap();
        let target = session.save().unwrap();

        assert_eq!(target, root.join("a/p1_crown.csv"));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "1,2,10\n1,2,20\n# Crown Z value: 15.0\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("a/p1.csv")).unwrap(),
            "1,2,10\n1,2,20\n"
        );
    }

    #[test]
    fn saved_points_load_back_unchanged() {
        let content = "0.1,-7.25,3\n1e-3,42,1234.5678\n-0,0,0.3333333333333333\n";
        let (_dir, mut session) = session_with(content);
        session.set_threshold("1.75").unwrap();

        let target = session.save().unwrap();
        let reloaded = load_point_cloud(&target).unwrap();

        assert_eq!(reloaded.points(), session.cloud().points());
    }

    #[test]
    fn saving_twice_overwrites_with_same_content() {
        let (dir, mut session) = session_with("1,2,10\n1,2,20\n");
        session.set_threshold("15").unwrap();

        let first_path = session.save().unwrap();
        let first = fs::read_to_string(&first_path).unwrap();
        let second_path = session.save().unwrap();
        let second = fs::read_to_string(&second_path).unwrap();

        assert_eq!(first_path, second_path);
        assert_eq!(first, second);
        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);
    }
}
