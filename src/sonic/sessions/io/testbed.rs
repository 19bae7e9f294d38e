use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info, instrument};

use crate::sonic::sessions::error::{Result, ToolError};
use crate::sonic::sessions::io::{present, scalar_text, shape};
use crate::sonic::sessions::model::TestbedDescriptor;

/// Key that marks an item as a testbed definition.
pub const CONF_NAME_KEY: &str = "conf-name";
const GROUP_KEY: &str = "group-name";
const TOPO_KEY: &str = "topo";
const SERVER_KEY: &str = "server";
const COMMENT_KEY: &str = "comment";
const PTF_KEY: &str = "ptf";
const DUT_KEY: &str = "dut";
const INVENTORY_KEY: &str = "inv_name";

/// Reads the top-level testbed file and returns the descriptors that reference
/// a lab inventory, in source order.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_testbeds(path: &Path) -> Result<Vec<TestbedDescriptor>> {
    let source = fs::read_to_string(path)?;
    let mut document: Value = serde_yaml::from_str(&source)?;
    document.apply_merge()?;
    let testbeds = parse_testbeds(&document)?;
    info!(testbed_count = testbeds.len(), "loaded testbeds");
    Ok(testbeds)
}

/// Normalises an already parsed testbed document.
///
/// Items without `conf-name` are skipped, as are testbeds without `inv_name`.
/// An empty document yields no testbeds.
pub fn parse_testbeds(document: &Value) -> Result<Vec<TestbedDescriptor>> {
    let items = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        other => {
            return Err(ToolError::InvalidTestbed(format!(
                "expected a sequence of testbeds, found a {}",
                shape(other)
            )));
        }
    };

    let mut testbeds = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(name) = present(item, CONF_NAME_KEY) else {
            debug!(index, "skipping item without {CONF_NAME_KEY}");
            continue;
        };
        let name = scalar_text(name).ok_or_else(|| {
            ToolError::InvalidTestbed(format!(
                "item {index}: '{CONF_NAME_KEY}' must be a scalar, found a {}",
                shape(name)
            ))
        })?;

        let testbed = parse_testbed(item, name)?;
        if testbed.inventory.is_none() {
            debug!(testbed = %testbed.testbed_name, "skipping testbed without {INVENTORY_KEY}");
            continue;
        }
        testbeds.push(testbed);
    }

    Ok(testbeds)
}

fn parse_testbed(item: &Value, name: String) -> Result<TestbedDescriptor> {
    let mut testbed = TestbedDescriptor::new(name);
    let name = testbed.testbed_name.clone();

    copy_if_present(&mut testbed.group, item, GROUP_KEY, &name)?;
    copy_if_present(&mut testbed.topo, item, TOPO_KEY, &name)?;
    copy_if_present(&mut testbed.server, item, SERVER_KEY, &name)?;
    copy_if_present(&mut testbed.owner, item, COMMENT_KEY, &name)?;
    copy_if_present(&mut testbed.ptf, item, PTF_KEY, &name)?;
    testbed.duts = read_duts(item, &name)?;
    copy_if_present(&mut testbed.inventory, item, INVENTORY_KEY, &name)?;

    Ok(testbed)
}

/// Copies `key` from `item` into `target` only when the key is present.
fn copy_if_present(
    target: &mut Option<String>,
    item: &Value,
    key: &str,
    testbed: &str,
) -> Result<()> {
    if let Some(value) = present(item, key) {
        *target = Some(expect_scalar(value, key, testbed)?);
    }
    Ok(())
}

/// `dut` is normally a list; a lone scalar names a single DUT.
fn read_duts(item: &Value, testbed: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = present(item, DUT_KEY) else {
        return Ok(None);
    };

    let duts = match value {
        Value::Sequence(entries) => entries
            .iter()
            .map(|entry| expect_scalar(entry, DUT_KEY, testbed))
            .collect::<Result<Vec<_>>>()?,
        other => vec![expect_scalar(other, DUT_KEY, testbed)?],
    };
    Ok(Some(duts))
}

fn expect_scalar(value: &Value, key: &str, testbed: &str) -> Result<String> {
    scalar_text(value).ok_or_else(|| {
        ToolError::InvalidTestbed(format!(
            "testbed '{testbed}': '{key}' must be a scalar, found a {}",
            shape(value)
        ))
    })
}
