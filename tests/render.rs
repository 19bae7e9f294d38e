use std::fs;

use sonic_sessions::ToolError;
use sonic_sessions::export;
use sonic_sessions::io::template::{TemplateSource, render_sessions};
use sonic_sessions::model::{SessionKind, SessionRecord, TestbedDescriptor};
use tempfile::tempdir;

const LINE_TEMPLATE: &str =
    "{% for session in sessions %}{{ session.session_name }} {{ session.host_name }}\n{% endfor %}";

fn sample_sessions() -> Vec<SessionRecord> {
    let testbed = TestbedDescriptor {
        topo: Some("t0".into()),
        ..TestbedDescriptor::new("vms-t0")
    };
    vec![
        SessionRecord::new(&testbed, SessionKind::Dut, "vlab-02", "10.250.0.102"),
        SessionRecord::new(&testbed, SessionKind::Dut, "vlab-01", "10.250.0.101"),
        SessionRecord::new(&testbed, SessionKind::Ptf, "ptf-01", "10.250.0.100"),
    ]
}

#[test]
fn template_emits_one_line_per_session_in_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let template_path = temp_dir.path().join("lines.tera");
    fs::write(&template_path, LINE_TEMPLATE).expect("template written");

    let rendered = render_sessions(&TemplateSource::File(template_path), &sample_sessions())
        .expect("template rendered");

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "vlab-02 10.250.0.102",
            "vlab-01 10.250.0.101",
            "ptf-01 10.250.0.100",
        ]
    );
}

#[test]
fn template_sees_every_session_field() {
    let temp_dir = tempdir().expect("temporary directory");
    let template_path = temp_dir.path().join("fields.tera");
    fs::write(
        &template_path,
        "{% for s in sessions %}{{ s.folder }}|{{ s.protocol }}|{{ s.port }}|{{ s.username }}|{{ s.testbed }}|{{ s.topo }}|{{ s.type }}\n{% endfor %}",
    )
    .expect("template written");

    let rendered = render_sessions(&TemplateSource::File(template_path), &sample_sessions())
        .expect("template rendered");

    assert_eq!(
        rendered.lines().last(),
        Some("lab/t0/vms-t0|SSH2|22|root|vms-t0|t0|ptf")
    );
    assert!(rendered.starts_with("lab/t0/vms-t0|SSH2|22|admin|vms-t0|t0|dut\n"));
}

#[test]
fn bundled_template_lists_sessions_after_header() {
    let rendered =
        render_sessions(&TemplateSource::Bundled, &sample_sessions()).expect("template rendered");

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "folder,session_name,hostname,protocol,port,username",
            "lab/t0/vms-t0,vlab-02,10.250.0.102,SSH2,22,admin",
            "lab/t0/vms-t0,vlab-01,10.250.0.101,SSH2,22,admin",
            "lab/t0/vms-t0,ptf-01,10.250.0.100,SSH2,22,root",
        ]
    );
}

#[test]
fn missing_template_file_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let template_path = temp_dir.path().join("absent.tera");

    let error = render_sessions(&TemplateSource::File(template_path.clone()), &[]).unwrap_err();

    match error {
        ToolError::MissingTemplate(path) => assert_eq!(path, template_path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn template_syntax_error_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let template_path = temp_dir.path().join("broken.tera");
    fs::write(&template_path, "{% for session in sessions %}{{ session.host_name }}")
        .expect("template written");

    let error = render_sessions(&TemplateSource::File(template_path), &sample_sessions())
        .unwrap_err();

    assert!(matches!(error, ToolError::Template(_)));
}

#[test]
fn dump_writes_rendered_sessions() {
    let temp_dir = tempdir().expect("temporary directory");
    let testbed_path = temp_dir.path().join("testbed.yaml");
    fs::write(
        &testbed_path,
        r#"
- conf-name: t1
  topo: t0
  inv_name: lab.yml
  dut: [sw1]
  ptf: ptf1
- conf-name: orphan
  topo: t0
"#,
    )
    .expect("testbed written");
    fs::write(
        temp_dir.path().join("lab.yml"),
        r#"
sonic:
  children:
    grp1:
grp1:
  hosts:
    sw1:
      ansible_host: 10.0.0.1
all:
  children:
    ptf:
      hosts:
        ptf1:
          ansible_host: 10.0.0.2
"#,
    )
    .expect("lab written");
    let template_path = temp_dir.path().join("lines.tera");
    fs::write(&template_path, LINE_TEMPLATE).expect("template written");
    let output_path = temp_dir.path().join("sessions.txt");
    fs::write(&output_path, "stale contents\n").expect("stale output written");

    let count = export::dump(
        &testbed_path,
        &TemplateSource::File(template_path),
        &output_path,
    )
    .expect("sessions dumped");

    assert_eq!(count, 2);
    let written = fs::read_to_string(&output_path).expect("output read");
    assert_eq!(written, "sw1 10.0.0.1\nptf1 10.0.0.2\n");
}

#[test]
fn dump_requires_existing_testbed_file() {
    let temp_dir = tempdir().expect("temporary directory");
    let testbed_path = temp_dir.path().join("absent.yaml");
    let output_path = temp_dir.path().join("sessions.txt");

    let error = export::dump(&testbed_path, &TemplateSource::Bundled, &output_path).unwrap_err();

    assert!(matches!(error, ToolError::MissingInput(path) if path == testbed_path));
    assert!(!output_path.exists());
}
