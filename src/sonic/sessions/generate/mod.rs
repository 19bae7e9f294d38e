use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::sonic::sessions::error::Result;
use crate::sonic::sessions::io::{lab, testbed};
use crate::sonic::sessions::model::{LabTables, SessionKind, SessionRecord, TestbedDescriptor};

/// Produces the address tables of a lab inventory.
pub trait LabSource {
    fn load(&mut self, path: &Path) -> Result<LabTables>;
}

/// Reads lab inventories from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLabSource;

impl LabSource for FsLabSource {
    fn load(&mut self, path: &Path) -> Result<LabTables> {
        lab::read_lab(path)
    }
}

/// Memoises lab tables per resolved inventory path for the length of one run.
#[derive(Debug, Default)]
pub struct LabCache<S = FsLabSource> {
    source: S,
    labs: HashMap<PathBuf, LabTables>,
}

impl LabCache<FsLabSource> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: LabSource> LabCache<S> {
    /// Creates a cache backed by a custom source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            labs: HashMap::new(),
        }
    }

    /// Returns the tables for `path`, loading them on first request only.
    pub fn get(&mut self, path: &Path) -> Result<&LabTables> {
        if !self.labs.contains_key(path) {
            let tables = self.source.load(path)?;
            self.labs.insert(path.to_path_buf(), tables);
        } else {
            debug!(path = %path.display(), "lab cache hit");
        }
        Ok(&self.labs[path])
    }

    /// Number of distinct inventories loaded so far.
    pub fn len(&self) -> usize {
        self.labs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Loads the testbed file and joins every testbed against its lab inventory.
///
/// Sessions come out in testbed order; within a testbed the DUTs follow the
/// testbed's `dut` list and the PTF host comes last. Names missing from the
/// lab tables produce no session.
#[instrument(level = "info", skip_all, fields(testbed_file = %testbed_file.display()))]
pub fn generate_sessions<S: LabSource>(
    testbed_file: &Path,
    labs: &mut LabCache<S>,
) -> Result<Vec<SessionRecord>> {
    let testbeds = testbed::read_testbeds(testbed_file)?;
    let base_dir = testbed_file.parent().unwrap_or_else(|| Path::new(""));

    let mut sessions = Vec::new();
    for testbed in &testbeds {
        let Some(inventory) = testbed.inventory.as_deref() else {
            continue;
        };
        let tables = labs.get(&base_dir.join(inventory))?;
        sessions.extend(testbed_sessions(testbed, tables));
    }

    info!(
        session_count = sessions.len(),
        lab_count = labs.len(),
        "generated sessions"
    );
    Ok(sessions)
}

/// Sessions for a single testbed resolved against its lab tables.
pub fn testbed_sessions(testbed: &TestbedDescriptor, tables: &LabTables) -> Vec<SessionRecord> {
    let mut sessions = Vec::new();

    for dut in testbed.duts.iter().flatten() {
        match tables.duts.get(dut) {
            Some(address) => {
                sessions.push(SessionRecord::new(testbed, SessionKind::Dut, dut, address));
            }
            None => debug!(testbed = %testbed.testbed_name, %dut, "DUT not found in lab inventory"),
        }
    }

    if let Some(ptf) = &testbed.ptf {
        match tables.ptfs.get(ptf) {
            Some(address) => {
                sessions.push(SessionRecord::new(testbed, SessionKind::Ptf, ptf, address));
            }
            None => debug!(testbed = %testbed.testbed_name, %ptf, "PTF not found in lab inventory"),
        }
    }

    sessions
}
