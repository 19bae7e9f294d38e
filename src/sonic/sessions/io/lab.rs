use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info, instrument, warn};

use crate::sonic::sessions::error::{Result, ToolError};
use crate::sonic::sessions::io::{present, scalar_text, shape};
use crate::sonic::sessions::model::{HostTable, LabTables};

/// Group whose children list the DUT groups of the lab.
const SONIC_GROUP: &str = "sonic";
/// Ansible's implicit root group.
const ALL_GROUP: &str = "all";
const PTF_GROUP: &str = "ptf";
const CHILDREN_KEY: &str = "children";
const HOSTS_KEY: &str = "hosts";
const ADDRESS_KEY: &str = "ansible_host";

/// Reads a lab inventory file and extracts its DUT and PTF address tables.
///
/// A lab file that does not exist yields empty tables rather than an error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_lab(path: &Path) -> Result<LabTables> {
    if !path.is_file() {
        warn!(path = %path.display(), "lab inventory not found, no sessions will resolve against it");
        return Ok(LabTables::default());
    }

    let source = fs::read_to_string(path)?;
    let mut document: Value = serde_yaml::from_str(&source)?;
    document.apply_merge()?;
    let tables = parse_lab(&document, path)?;
    info!(
        dut_count = tables.duts.len(),
        ptf_count = tables.ptfs.len(),
        "loaded lab inventory"
    );
    Ok(tables)
}

/// Extracts the address tables from an already parsed lab document. `path` is
/// only used for error reporting.
pub fn parse_lab(document: &Value, path: &Path) -> Result<LabTables> {
    if !document.is_mapping() {
        debug!(shape = shape(document), "lab document is not a mapping");
        return Ok(LabTables::default());
    }

    Ok(LabTables {
        duts: parse_duts(document, path)?,
        ptfs: parse_ptfs(document, path)?,
    })
}

/// Collects the hosts of every group listed under `sonic.children` that is
/// also defined at the top level of the document.
fn parse_duts(document: &Value, path: &Path) -> Result<HostTable> {
    let mut duts = HostTable::new();
    let Some(Value::Mapping(groups)) =
        present(document, SONIC_GROUP).and_then(|sonic| present(sonic, CHILDREN_KEY))
    else {
        return Ok(duts);
    };

    for group in groups.keys() {
        let Some(hosts) = present(document, group).and_then(|entry| present(entry, HOSTS_KEY))
        else {
            debug!(?group, "DUT group has no hosts");
            continue;
        };
        collect_addresses(hosts, &mut duts, path)?;
    }

    Ok(duts)
}

/// Collects the hosts under `all.children.ptf.hosts`.
fn parse_ptfs(document: &Value, path: &Path) -> Result<HostTable> {
    let mut ptfs = HostTable::new();
    let hosts = present(document, ALL_GROUP)
        .and_then(|all| present(all, CHILDREN_KEY))
        .and_then(|children| present(children, PTF_GROUP))
        .and_then(|ptf| present(ptf, HOSTS_KEY));

    if let Some(hosts) = hosts {
        collect_addresses(hosts, &mut ptfs, path)?;
    }
    Ok(ptfs)
}

/// Copies each host's `ansible_host` into `table`; hosts without one are left out.
fn collect_addresses(hosts: &Value, table: &mut HostTable, path: &Path) -> Result<()> {
    let Value::Mapping(hosts) = hosts else {
        return Err(ToolError::InvalidLab {
            path: path.to_path_buf(),
            reason: format!("'{HOSTS_KEY}' must be a mapping, found a {}", shape(hosts)),
        });
    };

    for (host, vars) in hosts {
        let Some(host) = scalar_text(host) else {
            continue;
        };
        let Some(address) = present(vars, ADDRESS_KEY) else {
            debug!(%host, "host has no {ADDRESS_KEY}");
            continue;
        };
        let address = scalar_text(address).ok_or_else(|| ToolError::InvalidLab {
            path: path.to_path_buf(),
            reason: format!(
                "host '{host}': '{ADDRESS_KEY}' must be a scalar, found a {}",
                shape(address)
            ),
        })?;
        table.insert(host, address);
    }

    Ok(())
}
