use std::collections::BTreeMap;

use serde::Serialize;

/// Prefix of every session folder, ahead of the topology and testbed names.
pub const FOLDER_PREFIX: &str = "lab";
/// Connection protocol written into every session.
pub const SESSION_PROTOCOL: &str = "SSH2";
/// TCP port written into every session.
pub const SESSION_PORT: u16 = 22;

/// Hostname → management address lookup table.
pub type HostTable = BTreeMap<String, String>;

/// A testbed record normalised from the top-level testbed file.
///
/// Optional fields stay `None` when the source key is absent; no placeholder
/// value is ever written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestbedDescriptor {
    /// Value of the `conf-name` key.
    pub testbed_name: String,
    /// Value of the `group-name` key.
    pub group: Option<String>,
    /// Topology label, e.g. `t0` or `t1-lag`.
    pub topo: Option<String>,
    /// Test server the testbed is attached to.
    pub server: Option<String>,
    /// Value of the `comment` key, conventionally the testbed owner.
    pub owner: Option<String>,
    /// Name of the PTF container host.
    pub ptf: Option<String>,
    /// DUT hostnames in testbed order.
    pub duts: Option<Vec<String>>,
    /// Lab inventory file, relative to the testbed file's directory.
    pub inventory: Option<String>,
}

impl TestbedDescriptor {
    /// Creates a descriptor with only the testbed name populated.
    pub fn new(testbed_name: impl Into<String>) -> Self {
        Self {
            testbed_name: testbed_name.into(),
            ..Self::default()
        }
    }

    /// Folder the testbed's sessions are filed under, always `/`-separated.
    pub fn folder(&self) -> String {
        let topo = self.topo.as_deref().unwrap_or_default();
        format!("{FOLDER_PREFIX}/{topo}/{}", self.testbed_name).replace('\\', "/")
    }
}

/// Address tables extracted from one lab inventory file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabTables {
    /// DUT hostname → `ansible_host`.
    pub duts: HostTable,
    /// PTF hostname → `ansible_host`.
    pub ptfs: HostTable,
}

/// The role of the host a session connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Device under test, reached as `admin`.
    Dut,
    /// Packet test framework host, reached as `root`.
    Ptf,
}

impl SessionKind {
    /// Login user for sessions of this kind.
    pub fn username(self) -> &'static str {
        match self {
            SessionKind::Dut => "admin",
            SessionKind::Ptf => "root",
        }
    }
}

/// One SSH session handed to the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub folder: String,
    pub session_name: String,
    pub host_name: String,
    pub protocol: String,
    pub port: u16,
    pub username: String,
    pub testbed: String,
    pub topo: String,
    /// Serialised as `type` so templates can branch on `session.type`.
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl SessionRecord {
    /// Builds the session for `name` at `address`, belonging to `testbed`.
    pub fn new(
        testbed: &TestbedDescriptor,
        kind: SessionKind,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            folder: testbed.folder(),
            session_name: name.into(),
            host_name: address.into(),
            protocol: SESSION_PROTOCOL.to_string(),
            port: SESSION_PORT,
            username: kind.username().to_string(),
            testbed: testbed.testbed_name.clone(),
            topo: testbed.topo.clone().unwrap_or_default(),
            kind,
        }
    }
}
