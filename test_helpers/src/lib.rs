//! Testing infrastructure for the target list tools.
//!
//! Provides workspace-root discovery, a persistent `test_output/` directory
//! for artifacts worth inspecting by hand (rendered figures, written target
//! lists), and canned archive responses shaped like the real TAP output.
//!
//! # Usage
//! ```rust
//! use test_helpers::{output_path, sample_archive_csv};
//!
//! let body = sample_archive_csv();
//! assert!(body.starts_with("pl_name,hostname"));
//!
//! let path = output_path("target_list.csv");
//! assert!(path.ends_with("target_list.csv"));
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while locating test infrastructure
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No ancestor directory holds a workspace Cargo.toml.
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Walk up from the current directory to the Cargo.toml with a `[workspace]`
/// section.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {e}"))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {e}"))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<workspace>/test_output`, created on first use
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path of an artifact inside the test output directory
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Header row of a full archive response, in query order
pub const ARCHIVE_HEADER: &str = "pl_name,hostname,gaia_dr3_id,gaia_dr2_id,tic_id,hd_name,ra,dec,\
sy_vmag,sy_jmag,sy_kmag,sy_tmag,sy_kepmag,sy_gaiamag,st_teff,st_logg,st_met,st_mass,st_rad,\
st_spectype,st_lum,st_age,st_ageerr1,st_ageerr2,st_rotp,pl_orbper,pl_rade,pl_trandur,\
disc_facility,disc_year";

/// Archive response covering the awkward cases: byte-literal residue,
/// textual missing values, blank numerics, a host with two planets, facility
/// strings naming more than one survey, and an empty facility.
///
/// Expected tags, in row order: Kepler, Kepler, K2, WASP, TESS, HAT, Other, NGTS.
pub fn sample_archive_csv() -> String {
    let rows = [
        "b'Kepler-10 b',b'Kepler-10',b'Gaia DR3 2132155017099178624',Gaia DR2 2132155017099178624,b'TIC 377780790',,285.679,50.241,10.96,9.889,9.496,10.45,10.96,10.9,5708,4.35,-0.15,0.91,1.065,G,0.09,10.6,1.5,-1.3,,0.8375,1.47,1.81,Kepler,2011",
        "Kepler-10 c,Kepler-10,Gaia DR3 2132155017099178624,,TIC 377780790,nan,285.679,50.241,10.96,9.889,9.496,10.45,10.96,10.9,5708,4.35,-0.15,0.91,1.065,G,0.09,10.6,1.5,-1.3,,45.29,2.35,6.9,Kepler,2011",
        "K2-18 b,K2-18,Gaia DR3 3910747531814692736,,TIC 388804061,<NA>,172.56,7.588,13.5,9.763,8.899,11.07,,12.47,3457,4.86,0.12,0.5,0.45,M2.5 V,-1.6,2.4,,-0.6,38.6,32.94,2.61,2.68,K2,2015.0",
        "WASP-12 b,WASP-12,Gaia DR3 3435282862461427072,,TIC 86396382,,97.637,29.672,11.57,10.48,10.19,11.09,,11.48,6300,4.16,0.3,1.38,1.6,F9 V,0.57,2,0.7,-0.7,,1.0914,21.2,3,SuperWASP-North,2008",
        "TOI-700 d,TOI-700,Gaia DR3 5284517766615492736,,TIC 150428135,,97.096,-65.579,13.15,9.469,8.634,11.0,,12.07,3480,4.81,-0.07,0.42,0.42,M2 V,-1.6,1.5,0.5,,,37.42,1.07,3.2,Transiting Exoplanet Survey Satellite (TESS),2020",
        "HAT-P-11 b,HAT-P-11,Gaia DR3 2086512227934198656,,TIC 28230919,HD 186755,297.71,48.08,9.47,7.6,7.01,8.6,9.17,9.2,4780,4.59,0.31,0.81,0.68,K4,-0.58,6.5,5.9,-4.1,29.2,4.8878,4.36,2.34,HATNet,2009",
        "GJ 1214 b,GJ 1214,Gaia DR3 4393265392167891712,,TIC 467929202,,258.83,4.96,14.67,9.75,8.78,11.5,,13.0,3250,5.03,0.29,0.18,0.22,M4.5,-2.4,,,,,1.58,2.74,0.87,,2009",
        "NGTS-1 b,NGTS-1,Gaia DR3 4875693023844840448,,TIC 24662019,,75.0,-36.6,15.5,12.4,11.6,13.8,,14.6,3916,4.7,-0.23,0.62,0.57,M0.5,-1.1,0.08,0.02,-0.05,,2.647,13.1,1.5,Next-Generation Transit Survey (NGTS) with TESS follow-up,2017",
    ];

    let mut body = String::from(ARCHIVE_HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}
