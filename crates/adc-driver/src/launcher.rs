//! Discovery and invocation of the ADCIRC executables.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// How to start the solver in a prepared run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// `mpiexec -n <nproc> padcirc`
    Parallel {
        mpiexec: PathBuf,
        padcirc: PathBuf,
        nproc: usize,
    },
    /// Serial `adcirc`
    Serial { adcirc: PathBuf },
}

impl Launcher {
    pub fn program(&self) -> &Path {
        match self {
            Launcher::Parallel { padcirc, .. } => padcirc,
            Launcher::Serial { adcirc } => adcirc,
        }
    }

    pub fn command(&self, run_dir: &Path) -> Command {
        let mut cmd = match self {
            Launcher::Parallel {
                mpiexec,
                padcirc,
                nproc,
            } => {
                let mut cmd = Command::new(mpiexec);
                cmd.arg("-n").arg(nproc.to_string()).arg(padcirc);
                cmd
            }
            Launcher::Serial { adcirc } => Command::new(adcirc),
        };
        cmd.current_dir(run_dir);
        cmd
    }
}

/// Search a `PATH`-style list of directories for an executable file.
pub fn find_executable(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Prefer parallel `padcirc` (needs `mpiexec`), fall back to serial `adcirc`.
pub fn find_launcher_in(path_var: &OsStr, nproc: usize) -> Option<Launcher> {
    let padcirc = find_executable("padcirc", path_var);
    let mpiexec = find_executable("mpiexec", path_var);
    if let (Some(padcirc), Some(mpiexec)) = (padcirc, mpiexec) {
        return Some(Launcher::Parallel {
            mpiexec,
            padcirc,
            nproc: nproc.max(1),
        });
    }
    find_executable("adcirc", path_var).map(|adcirc| Launcher::Serial { adcirc })
}

pub fn find_launcher(nproc: usize) -> Option<Launcher> {
    let path_var = std::env::var_os("PATH").unwrap_or_else(OsString::new);
    find_launcher_in(&path_var, nproc)
}
